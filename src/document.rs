use crate::{
    font::Font,
    image::Image,
    info::Info,
    outline::Outline,
    page::Page,
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document is the main object that stores all the contents of the PDF
/// then renders it out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
    pub outline: Outline,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document, returning its id
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// The number of pages in the document
    pub fn page_count(&self) -> usize {
        self.page_order.len()
    }

    /// Get the page at the given 0-based position in the document
    pub fn page(&self, page_index: usize) -> Option<&Page> {
        self.page_order
            .get(page_index)
            .and_then(|id| self.pages.get(*id))
    }

    /// Get a mutable reference to the page at the given 0-based position in the document
    pub fn page_mut(&mut self, page_index: usize) -> Option<&mut Page> {
        let id = *self.page_order.get(page_index)?;
        self.pages.get_mut(id)
    }

    /// Iterate over the pages in document order
    pub fn iter_pages(&self) -> impl Iterator<Item = &Page> {
        self.page_order.iter().filter_map(|id| self.pages.get(*id))
    }

    /// Add a font to the document structure. Fonts are stored "globally" within
    /// the document, such that any page can refer to it by its id.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document structure. Images are stored once and may be
    /// drawn on any number of pages.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Add a top-level bookmark in the document outline pointing to the page with the
    /// given index. Navigating to the bookmark fits the entire page into view.
    pub fn add_bookmark<S: ToString>(&mut self, title: S, page_index: usize) {
        self.outline.add_bookmark(page_index, title.to_string());
    }

    /// Write the entire document to the writer. Note: although this can write to arbitrary
    /// streams, the entire document is "rendered" in memory first.
    ///
    /// Until `write` is called, all references are un-resolved. Calling `write` will
    /// automatically generate PDF objects and corresponding references to those objects.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
            outline,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        // page refs are keyed by position in the document (not arena index) so that
        // bookmarks can reference pages by where they appear
        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer)?;
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages
                .get(*id)
                .ok_or(PDFError::UnresolvedReference("page"))?;
            page.write(&mut refs, page_index, &fonts, &images, &mut writer)?;
        }

        let outlines_id = outline.write(&mut refs, &mut writer)?;

        let mut catalog = writer.catalog(catalog_id);
        catalog.pages(page_tree_id);
        if let Some(outlines_id) = outlines_id {
            catalog.outlines(outlines_id);
        }
        catalog.finish();

        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}
