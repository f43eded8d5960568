//! A fixed-size drawing surface addressed in millimetres from the top-left corner.
//!
//! Every drawing call takes its position explicitly; the canvas keeps no cursor. All
//! text handed to the canvas is passed through [sanitize](crate::sanitize::sanitize)
//! before it is measured or drawn.

use crate::colour::{colours, Colour};
use crate::document::Document;
use crate::font::Font;
use crate::image::Image;
use crate::info::Info;
use crate::layout::{width_of_text, wrap_text, Margins};
use crate::page::{ImageLayout, Page, SpanFont, SpanLayout, StrokeLayout};
use crate::pagesize::{PageOrientation, LETTER};
use crate::rect::Rect;
use crate::sanitize::sanitize;
use crate::units::{Mm, Pt};
use crate::PDFError;
use id_arena::Id;
use log::debug;

/// Width of every page: US Letter, landscape
pub const PAGE_WIDTH: Mm = Mm(279.4);
/// Height of every page: US Letter, landscape
pub const PAGE_HEIGHT: Mm = Mm(215.9);

/// Space between a cell's border and its text
const CELL_PADDING: Mm = Mm(1.0);
const BORDER_WIDTH: Mm = Mm(0.2);

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

/// The font, size and colour of a piece of text
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TextStyle {
    pub font: Id<Font>,
    pub size: Pt,
    pub colour: Colour,
}

impl TextStyle {
    pub fn new(font: Id<Font>, size: Pt) -> TextStyle {
        TextStyle {
            font,
            size,
            colour: colours::BLACK,
        }
    }
}

/// How a cell's text is drawn and whether the cell is outlined
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct CellStyle {
    pub text: TextStyle,
    pub align: Align,
    pub border: Option<Colour>,
}

/// Builds a [Document] one page at a time
#[derive(Default)]
pub struct Canvas {
    document: Document,
    current: Option<Page>,
}

impl Canvas {
    pub fn new() -> Canvas {
        Canvas::default()
    }

    /// Register a font for use on any page
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.document.add_font(font)
    }

    pub fn font(&self, id: Id<Font>) -> Option<&Font> {
        self.document.fonts.get(id)
    }

    /// Set the document's metadata
    pub fn set_info(&mut self, info: Info) {
        self.document.set_info(info);
    }

    /// Register an image once so it can be drawn on any number of pages
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.document.add_image(image)
    }

    /// Finish the current page (if any) and start a new one, filling it edge to
    /// edge with `background` when given
    pub fn new_page(&mut self, background: Option<Id<Image>>) {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }

        let margins = Margins::trbl(Mm(20.0), Mm(20.0), Mm(15.0), Mm(20.0));
        let mut page = Page::new(LETTER.landscape(), Some(margins));
        if let Some(image_id) = background {
            page.add_image(ImageLayout {
                image_id,
                position: page.media_box,
            });
        }
        self.current = Some(page);
        debug!("started page {}", self.page_count());
    }

    /// The number of pages started so far, including the current one
    pub fn page_count(&self) -> usize {
        self.document.page_count() + usize::from(self.current.is_some())
    }

    /// The lowest point flowing content may reach before breaking onto a new page
    pub fn content_bottom(&self) -> Mm {
        PAGE_HEIGHT - Mm(15.0)
    }

    fn page(&mut self) -> &mut Page {
        self.current.get_or_insert_with(|| {
            debug!("drawing before any page was started, starting a blank page");
            Page::new(LETTER.landscape(), None)
        })
    }

    /// The width of `text` in the given style
    pub fn measure_width(&self, style: &TextStyle, text: &str) -> Mm {
        match self.font(style.font) {
            Some(font) => width_of_text(&sanitize(text), font, style.size).into(),
            None => Mm(0.0),
        }
    }

    /// Break `text` into lines no wider than `max_width` in the given style
    pub fn wrap_lines(&self, style: &TextStyle, text: &str, max_width: Mm) -> Vec<String> {
        match self.font(style.font) {
            Some(font) => wrap_text(&sanitize(text), font, style.size, max_width.into()),
            None => Vec::new(),
        }
    }

    /// Break `text` into the lines [Canvas::place_line] can draw in a column of
    /// `column_width` without crossing the cell padding
    pub fn column_lines(&self, style: &TextStyle, text: &str, column_width: Mm) -> Vec<String> {
        self.wrap_lines(style, text, column_width - CELL_PADDING * 2.0)
    }

    fn ascent_and_descent(&self, style: &TextStyle) -> (Mm, Mm) {
        match self.font(style.font) {
            Some(font) => (
                font.ascent(style.size).into(),
                font.descent(style.size).into(),
            ),
            None => (Mm::from(style.size), Mm(0.0)),
        }
    }

    fn push_span(&mut self, x: Mm, baseline: Mm, style: &TextStyle, text: String) {
        if text.is_empty() {
            return;
        }
        let span = SpanLayout {
            text,
            font: SpanFont {
                id: style.font,
                size: style.size,
            },
            colour: style.colour,
            coords: (Pt::from(x), Pt::from(PAGE_HEIGHT - baseline)),
        };
        self.page().add_span(span);
    }

    /// Draw a single line of text with the top of the text at (`x`, `y`)
    pub fn place_text(&mut self, x: Mm, y: Mm, style: &TextStyle, text: &str) {
        let (ascent, _) = self.ascent_and_descent(style);
        self.push_span(x, y + ascent, style, sanitize(text));
    }

    /// Draw `text` word-wrapped to `max_width`, one line every `line_height` starting
    /// at `y`. Returns the y position just below the last line.
    #[allow(clippy::too_many_arguments)]
    pub fn place_wrapped_text(
        &mut self,
        x: Mm,
        y: Mm,
        max_width: Mm,
        line_height: Mm,
        style: &TextStyle,
        text: &str,
        align: Align,
    ) -> Mm {
        let lines = self.column_lines(style, text, max_width);
        let mut y = y;
        for line in lines {
            self.place_line(x, y, max_width, line_height, style, &line, align);
            y += line_height;
        }
        y
    }

    /// Draw one line of text vertically centred in the box at (`x`, `y`), aligned
    /// horizontally within `width` (inset by the cell padding)
    #[allow(clippy::too_many_arguments)]
    pub fn place_line(
        &mut self,
        x: Mm,
        y: Mm,
        width: Mm,
        height: Mm,
        style: &TextStyle,
        text: &str,
        align: Align,
    ) {
        let text = sanitize(text);
        let text_width = self.measure_width(style, &text);
        let text_x = match align {
            Align::Left => x + CELL_PADDING,
            Align::Center => x + (width - text_width) / 2.0,
            Align::Right => x + width - CELL_PADDING - text_width,
        };
        let (ascent, descent) = self.ascent_and_descent(style);
        let baseline = y + height / 2.0 + (ascent + descent) / 2.0;
        self.push_span(text_x, baseline, style, text);
    }

    /// Draw a table cell: an optional outline with the text vertically centred
    pub fn draw_cell(&mut self, x: Mm, y: Mm, width: Mm, height: Mm, text: &str, style: &CellStyle) {
        if let Some(colour) = style.border {
            let rect = Rect {
                x1: Pt::from(x),
                y1: Pt::from(PAGE_HEIGHT - y - height),
                x2: Pt::from(x + width),
                y2: Pt::from(PAGE_HEIGHT - y),
            };
            self.page().add_stroke(StrokeLayout {
                rect,
                colour,
                line_width: BORDER_WIDTH.into(),
            });
        }
        self.place_line(x, y, width, height, &style.text, text, style.align);
    }

    /// Draw a registered image into the box with its top-left corner at (`x`, `y`)
    pub fn place_image(&mut self, x: Mm, y: Mm, width: Mm, height: Mm, image_id: Id<Image>) {
        let position = Rect {
            x1: Pt::from(x),
            y1: Pt::from(PAGE_HEIGHT - y - height),
            x2: Pt::from(x + width),
            y2: Pt::from(PAGE_HEIGHT - y),
        };
        self.page().add_image(ImageLayout { image_id, position });
    }

    /// Add an outline entry pointing at the current page
    pub fn bookmark(&mut self, title: &str) {
        let page_index = self.page_count().saturating_sub(1);
        self.document.add_bookmark(sanitize(title), page_index);
    }

    /// Finish the current page and hand back the assembled document
    pub fn finish(mut self) -> Document {
        if let Some(page) = self.current.take() {
            self.document.add_page(page);
        }
        self.document
    }

    /// Finish the document and serialize it to PDF bytes
    pub fn serialize(self) -> Result<Vec<u8>, PDFError> {
        let mut bytes = Vec::new();
        self.finish().write(&mut bytes)?;
        Ok(bytes)
    }
}
