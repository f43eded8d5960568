//! Fixed-column-width bordered tables that continue onto new pages when they run
//! out of room.

use crate::canvas::{Align, Canvas, CellStyle, TextStyle};
use crate::colour::Colour;
use crate::image::Image;
use crate::units::Mm;
use id_arena::Id;
use log::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub width: Mm,
    /// Alignment of the body cells; headers are always centred
    pub align: Align,
}

impl Column {
    pub fn new<S: ToString>(header: S, width: Mm, align: Align) -> Column {
        Column {
            header: header.to_string(),
            width,
            align,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct TableStyle {
    pub header: TextStyle,
    pub body: TextStyle,
    pub row_height: Mm,
    pub border: Colour,
}

/// How a table continues when the next row would cross the bottom of the page
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Continuation {
    /// Background of each continuation page
    pub background: Option<Id<Image>>,
    /// Where the repeated header row starts on a continuation page
    pub top: Mm,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Table {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Missing trailing cells are drawn empty and extra cells are ignored.
    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn width(&self) -> Mm {
        self.columns.iter().map(|c| c.width).sum()
    }

    fn draw_header(&self, canvas: &mut Canvas, x: Mm, y: Mm, style: &TableStyle) {
        let cell = CellStyle {
            text: style.header,
            align: Align::Center,
            border: Some(style.border),
        };
        let mut cx = x;
        for column in &self.columns {
            canvas.draw_cell(cx, y, column.width, style.row_height, &column.header, &cell);
            cx += column.width;
        }
    }

    fn draw_row(&self, canvas: &mut Canvas, x: Mm, y: Mm, style: &TableStyle, row: &[String]) {
        let mut cx = x;
        for (i, column) in self.columns.iter().enumerate() {
            let cell = CellStyle {
                text: style.body,
                align: column.align,
                border: Some(style.border),
            };
            let text = row.get(i).map(String::as_str).unwrap_or_default();
            canvas.draw_cell(cx, y, column.width, style.row_height, text, &cell);
            cx += column.width;
        }
    }

    /// Draw the table with its top-left corner at (`x`, `y`) on the current page.
    /// Whenever the next row would cross [Canvas::content_bottom], a new page is
    /// started and the header row repeated at `continuation.top`. Returns the y
    /// position just below the last row.
    pub fn render(
        &self,
        canvas: &mut Canvas,
        x: Mm,
        y: Mm,
        style: &TableStyle,
        continuation: &Continuation,
    ) -> Mm {
        let bottom = canvas.content_bottom();
        let mut y = y;

        if y + style.row_height > bottom {
            canvas.new_page(continuation.background);
            y = continuation.top;
        }
        self.draw_header(canvas, x, y, style);
        y += style.row_height;

        for row in &self.rows {
            if y + style.row_height > bottom {
                debug!("table continues on page {}", canvas.page_count() + 1);
                canvas.new_page(continuation.background);
                y = continuation.top;
                self.draw_header(canvas, x, y, style);
                y += style.row_height;
            }
            self.draw_row(canvas, x, y, style, row);
            y += style.row_height;
        }

        y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colour::colours;
    use crate::font::{BuiltinFont, Font};
    use crate::page::PageContents;
    use crate::units::Pt;

    fn setup() -> (Canvas, TableStyle) {
        let mut canvas = Canvas::new();
        let regular = canvas.add_font(Font::builtin(BuiltinFont::Helvetica));
        let bold = canvas.add_font(Font::builtin(BuiltinFont::HelveticaBold));
        let style = TableStyle {
            header: TextStyle::new(bold, Pt(10.0)),
            body: TextStyle::new(regular, Pt(10.0)),
            row_height: Mm(8.0),
            border: colours::GRID,
        };
        (canvas, style)
    }

    fn roster_table(rows: usize) -> Table {
        let mut table = Table::new(vec![
            Column::new("Round-Easel", Mm(40.0), Align::Center),
            Column::new("Artist Name", Mm(130.0), Align::Left),
        ]);
        for i in 0..rows {
            table.push_row(vec![format!("1-{}", i + 1), format!("Artist {}", i + 1)]);
        }
        table
    }

    const CONTINUATION: Continuation = Continuation {
        background: None,
        top: Mm(20.0),
    };

    #[test]
    fn draws_a_bordered_grid() {
        let (mut canvas, style) = setup();
        canvas.new_page(None);
        let table = roster_table(3);
        assert_eq!(table.width(), Mm(170.0));
        let end = table.render(&mut canvas, Mm(20.0), Mm(40.0), &style, &CONTINUATION);
        assert_eq!(end, Mm(72.0));

        let doc = canvas.finish();
        assert_eq!(doc.page_count(), 1);
        let page = doc.page(0).unwrap();
        let strokes = page
            .contents
            .iter()
            .filter(|c| matches!(c, PageContents::Stroke(_)))
            .count();
        assert_eq!(strokes, 8);
        assert!(page.has_text("Round-Easel"));
        assert!(page.has_text("1-3"));
        assert!(page.has_text("Artist 3"));
        // header in the bold face
        let header = page.spans().find(|s| s.text == "Artist Name").unwrap();
        assert_eq!(header.font.id, style.header.font);
    }

    #[test]
    fn long_tables_continue_with_repeated_headers() {
        let (mut canvas, style) = setup();
        canvas.new_page(None);
        let table = roster_table(40);
        table.render(&mut canvas, Mm(20.0), Mm(40.0), &style, &CONTINUATION);

        let doc = canvas.finish();
        assert!(doc.page_count() >= 2);
        for page in doc.iter_pages() {
            assert!(page.has_text("Round-Easel"));
        }
        let rows: usize = doc
            .iter_pages()
            .map(|p| p.spans().filter(|s| s.text.starts_with("Artist ") && s.text != "Artist Name").count())
            .sum();
        assert_eq!(rows, 40);
        // every row lies above the bottom margin
        let floor = Pt::from(Mm(15.0));
        for page in doc.iter_pages() {
            assert!(page.spans().all(|s| s.coords.1 > floor));
        }
    }

    #[test]
    fn short_rows_are_padded() {
        let (mut canvas, style) = setup();
        canvas.new_page(None);
        let mut table = roster_table(0);
        table.push_row(vec!["2-1".into()]);
        table.render(&mut canvas, Mm(20.0), Mm(40.0), &style, &CONTINUATION);
        let doc = canvas.finish();
        assert!(doc.page(0).unwrap().has_text("2-1"));
    }
}
