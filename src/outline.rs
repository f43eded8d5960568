use pdf_writer::{Finish, Name, Pdf, Ref, TextStr};

use crate::refs::{ObjectReferences, RefType};
use crate::PDFError;

/// A flat document outline (bookmarks), in the order entries were added
#[derive(Default, Debug)]
pub struct Outline {
    pub entries: Vec<OutlineEntry>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OutlineEntry {
    pub page_index: usize,
    pub title: String,
}

impl Outline {
    pub fn add_bookmark(&mut self, page_index: usize, title: String) {
        self.entries.push(OutlineEntry { page_index, title });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the outline, returning its root reference. Nothing is written for an
    /// empty outline.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        writer: &mut Pdf,
    ) -> Result<Option<Ref>, PDFError> {
        if self.is_empty() {
            return Ok(None);
        }

        // generate IDs for everything
        let outlines_id = refs.gen(RefType::Outlines);
        let entry_ids: Vec<Ref> = (0..self.entries.len())
            .map(|i| refs.gen(RefType::OutlineEntry(i)))
            .collect();

        // write the root outline
        let mut outline = writer.outline(outlines_id);
        outline.first(entry_ids[0]);
        outline.last(entry_ids[entry_ids.len() - 1]);
        outline.count(self.entries.len() as i32);
        outline.finish();

        for (i, entry) in self.entries.iter().enumerate() {
            let page_id = refs
                .get(RefType::Page(entry.page_index))
                .ok_or(PDFError::UnresolvedReference("bookmarked page"))?;

            let mut item = writer.outline_item(entry_ids[i]);
            item.parent(outlines_id);
            item.title(TextStr(entry.title.as_str()));
            if i > 0 {
                item.prev(entry_ids[i - 1]);
            }
            if let Some(next) = entry_ids.get(i + 1) {
                item.next(*next);
            }
            item.insert(Name(b"Dest"))
                .array()
                .item(page_id)
                .item(Name(b"Fit"));
            item.finish();
        }

        Ok(Some(outlines_id))
    }
}
