use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::units::*;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf};

/// A font and size to render a span of text with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text in a single font and colour, positioned at its baseline start
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    pub coords: (Pt, Pt),
}

/// An image drawn to fill `position`
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

/// An outlined (unfilled) rectangle
#[derive(Clone, PartialEq, Debug)]
pub struct StrokeLayout {
    pub rect: Rect,
    pub colour: Colour,
    pub line_width: Pt,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
    Stroke(StrokeLayout),
}

/// A single page of the document. Contents are painted in the order they were added.
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    /// Where content can live, i.e. within the margins
    pub content_box: Rect,
    /// The laid out contents
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(size: PageSize, margins: Option<Margins>) -> Page {
        let margins = margins.unwrap_or_else(Margins::empty);
        Page {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: size.0,
                y2: size.1,
            },
            content_box: Rect {
                x1: margins.left,
                y1: margins.bottom,
                x2: size.0 - margins.right,
                y2: size.1 - margins.top,
            },
            contents: Vec::default(),
        }
    }

    pub fn width(&self) -> Pt {
        self.media_box.width()
    }

    pub fn height(&self) -> Pt {
        self.media_box.height()
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    pub fn add_stroke(&mut self, stroke: StrokeLayout) {
        self.contents.push(PageContents::Stroke(stroke));
    }

    /// All text spans on the page, in painting order
    pub fn spans(&self) -> impl Iterator<Item = &SpanLayout> {
        self.contents
            .iter()
            .filter_map(|content| match content {
                PageContents::Text(spans) => Some(spans.iter()),
                _ => None,
            })
            .flatten()
    }

    /// All images on the page, in painting order
    pub fn images(&self) -> impl Iterator<Item = &ImageLayout> {
        self.contents.iter().filter_map(|content| match content {
            PageContents::Image(image) => Some(image),
            _ => None,
        })
    }

    /// Whether any span on the page reads exactly `text`
    pub fn has_text(&self, text: &str) -> bool {
        self.spans().any(|span| span.text == text)
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let id = refs
            .get(RefType::Page(page_index))
            .ok_or(PDFError::UnresolvedReference("page"))?;
        let page_tree = refs
            .get(RefType::PageTree)
            .ok_or(PDFError::UnresolvedReference("page tree"))?;
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.art_box(self.content_box.into());
        page.parent(page_tree);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            let font_ref = refs
                .get(RefType::Font(font_id.index()))
                .ok_or(PDFError::UnresolvedReference("font"))?;
            resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            let image_ref = refs
                .get(RefType::Image(image_id.index()))
                .ok_or(PDFError::UnresolvedReference("image"))?;
            resource_xobjects.pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        let rendered = render_contents(&self.contents, fonts)?;
        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            &rendered,
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(content_id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        Ok(())
    }
}
