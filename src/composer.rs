//! Sequences the pages of one event's paperwork: the artist roster, the auction
//! ledger, the bio summaries (one group per round, then the additional artists) and
//! finally one detail page per roster artist.
//!
//! Missing assets never stop the composition: a missing font falls back to a built-in
//! face, a missing background leaves the page blank and a QR code that can't be
//! encoded is left out. The only failure [render_paperwork] reports is the document
//! failing to serialize.

use crate::assets::{AssetProvider, Background, FontFace};
use crate::canvas::{Align, Canvas, TextStyle, PAGE_WIDTH};
use crate::colour::colours;
use crate::config::LayoutConfig;
use crate::document::Document;
use crate::error::PaperworkError;
use crate::font::{BuiltinFont, Font};
use crate::grouping::{BioGroup, Partition};
use crate::image::Image;
use crate::info::Info;
use crate::layout::{fit_font_size, truncate_to_width, FitRange};
use crate::model::{Artist, AuctionLot, Event, HistoricalEvent};
use crate::qr;
use crate::sanitize::sanitize;
use crate::table::{Column, Continuation, Table, TableStyle};
use crate::units::{Mm, Pt};
use id_arena::Id;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::Arc;

const LEFT: Mm = Mm(20.0);
const TITLE_TOP: Mm = Mm(20.0);
const TITLE_HEIGHT: Mm = Mm(10.0);
const TABLE_TOP: Mm = Mm(40.0);
const ROW_HEIGHT: Mm = Mm(8.0);

const BIO_TOP: Mm = Mm(40.0);
const BIO_NAME_HEIGHT: Mm = Mm(8.0);
const BIO_LINE_HEIGHT: Mm = Mm(6.0);
const BIO_GAP: Mm = Mm(4.0);
const BIO_PLACEHOLDER_GAP: Mm = Mm(10.0);

const QR_X: Mm = Mm(20.0);
const QR_Y: Mm = Mm(45.0);
const QR_SIZE: Mm = Mm(42.0);
const NAME_X: Mm = Mm(70.0);
const NAME_Y: Mm = Mm(48.0);
const NAME_FIT: FitRange = FitRange {
    max: Pt(49.0),
    min: Pt(20.0),
    step: Pt(2.0),
};
const COLUMNS_TOP: Mm = Mm(118.0);
const HISTORY_WIDTH: Mm = Mm(115.0);
const COLUMN_GAP: Mm = Mm(10.0);
const DETAIL_LINE_HEIGHT: Mm = Mm(6.0);
const HISTORY_FONT_SIZE: f32 = 12.0;
const HISTORY_SUB_COLUMNS: usize = 2;

const NO_BIO: &str = "No bio available";

/// The symbol printed before auction amounts
pub fn currency_symbol(currency: &str) -> &'static str {
    match currency.trim() {
        "EUR" => "€",
        "GBP" => "£",
        _ => "$",
    }
}

/// The "Top Bid" cell: the highest bid with no decimals, or "-" when nothing was bid
pub fn format_top_bid(symbol: &str, highest_bid: f64) -> String {
    if highest_bid > 0.0 {
        format!("{symbol}{highest_bid:.0}")
    } else {
        "-".to_string()
    }
}

fn dash_if_empty(text: &str) -> String {
    if text.trim().is_empty() {
        "-".to_string()
    } else {
        text.trim().to_string()
    }
}

/// One auction ledger row for a roster artist and their lot, if they have one
pub fn ledger_row(eid: &str, artist: &Artist, lot: Option<&AuctionLot>, symbol: &str) -> Vec<String> {
    let (round, easel) = artist.slot();
    let (bids, top_bid, bidder, payment) = match lot {
        None => ("0".to_string(), "-".to_string(), "-".to_string(), "-".to_string()),
        Some(lot) => {
            let (bidder, payment) = match &lot.winning_bid {
                Some(bid) => (
                    dash_if_empty(bid.bidder_display()),
                    dash_if_empty(&bid.payment_status),
                ),
                None => ("-".to_string(), "-".to_string()),
            };
            (
                lot.bid_count.to_string(),
                format_top_bid(symbol, lot.highest_bid),
                bidder,
                payment,
            )
        }
    };

    vec![
        format!("{eid}-{round}-{easel}"),
        artist.display_name(),
        bids,
        top_bid,
        bidder,
        payment,
    ]
}

/// The condensed history lines of a detail page: at most `cap` events as
/// `<EID> R<round>-E<easel>` (with " W" for wins), then a single summary line for
/// any that didn't make the cut
pub fn format_history(history: &[HistoricalEvent], cap: usize) -> Vec<String> {
    let mut lines: Vec<String> = history
        .iter()
        .take(cap)
        .map(|event| {
            format!(
                "{} R{}-E{}{}",
                event.event_eid,
                event.round,
                event.easel_number,
                if event.is_winner { " W" } else { "" }
            )
        })
        .collect();
    if history.len() > cap {
        lines.push(format!("... and {} more events", history.len() - cap));
    }
    lines
}

struct Fonts {
    medium: Id<Font>,
    bold: Id<Font>,
    semibold: Id<Font>,
}

/// Composes paperwork documents from event data, loading fonts and backgrounds from
/// an [AssetProvider]. Each call to [PaperworkComposer::compose] builds an
/// independent document.
pub struct PaperworkComposer<'a> {
    assets: &'a dyn AssetProvider,
    layout: LayoutConfig,
}

impl<'a> PaperworkComposer<'a> {
    pub fn new(assets: &'a dyn AssetProvider, layout: LayoutConfig) -> Self {
        PaperworkComposer { assets, layout }
    }

    /// Lay out the full paperwork document for an event
    pub fn compose(&self, event: &Event, artists: &[Artist], lots: &[AuctionLot]) -> Document {
        self.draw(event, artists, lots).finish()
    }

    fn draw(&self, event: &Event, artists: &[Artist], lots: &[AuctionLot]) -> Canvas {
        let mut session = Session::new(self.assets, &self.layout);
        let partition = Partition::new(artists, self.layout.round_count);

        let mut info = Info::new();
        info.title(sanitize(&format!("{} Paperwork", event.name)))
            .subject(sanitize(&format!("Event {}", event.eid)));
        session.canvas.set_info(info);

        session.roster_page(event, &partition.roster);
        session.auction_page(event, &partition.roster, lots);
        for group in partition.bio_groups() {
            session.bio_summary(event, &group);
        }
        for artist in &partition.roster {
            session.detail_page(event, artist);
        }

        debug!(
            "composed {} pages for event {}",
            session.canvas.page_count(),
            event.eid
        );
        session.canvas
    }
}

/// Compose and serialize one event's paperwork
pub fn render_paperwork(
    assets: &dyn AssetProvider,
    layout: &LayoutConfig,
    event: &Event,
    artists: &[Artist],
    lots: &[AuctionLot],
) -> Result<Vec<u8>, PaperworkError> {
    let bytes = PaperworkComposer::new(assets, layout.clone())
        .draw(event, artists, lots)
        .serialize()?;
    info!("rendered paperwork for {} ({} bytes)", event.eid, bytes.len());
    Ok(bytes)
}

/// The state of one composition: the canvas, its fonts and the backgrounds loaded
/// so far
struct Session<'a> {
    assets: &'a dyn AssetProvider,
    layout: &'a LayoutConfig,
    canvas: Canvas,
    fonts: Fonts,
    backgrounds: HashMap<Background, Option<Id<Image>>>,
}

impl<'a> Session<'a> {
    fn new(assets: &'a dyn AssetProvider, layout: &'a LayoutConfig) -> Self {
        debug!("loading assets from {}", assets.name());
        let mut canvas = Canvas::new();
        let fonts = Fonts {
            medium: Self::load_font(&mut canvas, assets, FontFace::Medium),
            bold: Self::load_font(&mut canvas, assets, FontFace::Bold),
            semibold: Self::load_font(&mut canvas, assets, FontFace::Semibold),
        };
        Session {
            assets,
            layout,
            canvas,
            fonts,
            backgrounds: HashMap::new(),
        }
    }

    fn load_font(canvas: &mut Canvas, assets: &dyn AssetProvider, face: FontFace) -> Id<Font> {
        let fallback = match face {
            FontFace::Medium => BuiltinFont::Helvetica,
            FontFace::Bold | FontFace::Semibold => BuiltinFont::HelveticaBold,
        };
        let font = match assets.load_font(face) {
            Ok(data) => match Font::load(Arc::unwrap_or_clone(data)) {
                Ok(font) => {
                    debug!("registered {face:?} font '{}'", font.name());
                    font
                }
                Err(e) => {
                    warn!("{face:?} font could not be parsed ({e}), using {fallback:?}");
                    Font::builtin(fallback)
                }
            },
            Err(e) => {
                warn!("{face:?} font unavailable ({e}), using {fallback:?}");
                Font::builtin(fallback)
            }
        };
        canvas.add_font(font)
    }

    /// Each background is decoded and embedded at most once per document
    fn background(&mut self, background: Background) -> Option<Id<Image>> {
        if let Some(id) = self.backgrounds.get(&background) {
            return *id;
        }

        let id = match self.assets.load_background(background) {
            Ok(data) => match Image::from_bytes(Arc::unwrap_or_clone(data)) {
                Ok(image) => {
                    debug!("added {background:?} background");
                    Some(self.canvas.add_image(image))
                }
                Err(e) => {
                    debug!("{background:?} background could not be decoded ({e}), using blank page");
                    None
                }
            },
            Err(e) => {
                debug!("{background:?} background not found ({e}), using blank page");
                None
            }
        };
        self.backgrounds.insert(background, id);
        id
    }

    fn style(&self, font: Id<Font>, size: f32) -> TextStyle {
        TextStyle::new(font, Pt(size))
    }

    fn placeholder_style(&self, size: f32) -> TextStyle {
        TextStyle {
            colour: colours::MUTED,
            ..self.style(self.fonts.medium, size)
        }
    }

    fn title(&mut self, text: &str, size: f32) {
        let style = self.style(self.fonts.bold, size);
        self.canvas.place_line(
            LEFT,
            TITLE_TOP,
            PAGE_WIDTH - LEFT * 2.0,
            TITLE_HEIGHT,
            &style,
            text,
            Align::Left,
        );
    }

    fn table_style(&self, size: f32) -> TableStyle {
        TableStyle {
            header: self.style(self.fonts.semibold, size),
            body: self.style(self.fonts.medium, size),
            row_height: ROW_HEIGHT,
            border: colours::GRID,
        }
    }

    fn roster_page(&mut self, event: &Event, roster: &[&Artist]) {
        let background = self.background(Background::Roster);
        self.canvas.new_page(background);
        self.canvas.bookmark("Artist List");
        self.title(&event.name, 24.0);

        let mut table = Table::new(vec![
            Column::new("Round-Easel", Mm(40.0), Align::Center),
            Column::new("Artist Name", Mm(130.0), Align::Left),
        ]);
        for artist in roster {
            table.push_row(vec![
                format!("{}-{}", artist.round_number, artist.easel_number),
                artist.display_name(),
            ]);
        }

        let style = self.table_style(10.0);
        table.render(
            &mut self.canvas,
            LEFT,
            TABLE_TOP,
            &style,
            &Continuation {
                background,
                top: TITLE_TOP,
            },
        );
    }

    fn auction_page(&mut self, event: &Event, roster: &[&Artist], lots: &[AuctionLot]) {
        let background = self.background(Background::Auction);
        self.canvas.new_page(background);
        self.canvas.bookmark("Auction & Bidding Information");
        self.title("Auction & Bidding Information", 20.0);

        let lots: HashMap<(u32, u32), &AuctionLot> =
            lots.iter().map(|lot| (lot.slot(), lot)).collect();
        let symbol = currency_symbol(&event.currency);

        let mut table = Table::new(vec![
            Column::new("EID-Round-Easel", Mm(40.0), Align::Center),
            Column::new("Artist Name", Mm(60.0), Align::Left),
            Column::new("# Bids", Mm(20.0), Align::Center),
            Column::new("Top Bid", Mm(25.0), Align::Center),
            Column::new("Bidder Info", Mm(60.0), Align::Left),
            Column::new("Payment Status", Mm(35.0), Align::Center),
        ]);
        for artist in roster {
            let lot = lots.get(&artist.slot()).copied();
            table.push_row(ledger_row(&event.eid, artist, lot, symbol));
        }

        let style = self.table_style(9.0);
        table.render(
            &mut self.canvas,
            LEFT,
            TABLE_TOP,
            &style,
            &Continuation {
                background,
                top: TITLE_TOP,
            },
        );
    }

    fn start_bio_page(&mut self, title: &str) -> Mm {
        let background = self.background(Background::BioSummary);
        self.canvas.new_page(background);
        self.title(title, 24.0);
        BIO_TOP
    }

    fn bio_summary(&mut self, event: &Event, group: &BioGroup) {
        let title = group.kind.title(&event.name);
        let width = PAGE_WIDTH - LEFT * 2.0;
        let bottom = self.canvas.content_bottom();
        let name_style = self.style(self.fonts.semibold, 12.0);
        let bio_style = self.style(self.fonts.medium, 10.0);

        let mut y = self.start_bio_page(&title);
        self.canvas.bookmark(&group.kind.label());

        for artist in &group.artists {
            let lines = artist
                .bio()
                .map(|bio| self.canvas.column_lines(&bio_style, bio, width))
                .unwrap_or_default();

            // keep a name together with the first line beneath it
            if y + BIO_NAME_HEIGHT + BIO_LINE_HEIGHT > bottom {
                debug!("{title} continues on page {}", self.canvas.page_count() + 1);
                y = self.start_bio_page(&title);
            }
            self.canvas.place_line(
                LEFT,
                y,
                width,
                BIO_NAME_HEIGHT,
                &name_style,
                &artist.display_name(),
                Align::Left,
            );
            y += BIO_NAME_HEIGHT;

            if lines.is_empty() {
                let style = self.placeholder_style(10.0);
                self.canvas
                    .place_line(LEFT, y, width, BIO_LINE_HEIGHT, &style, NO_BIO, Align::Left);
                y += BIO_PLACEHOLDER_GAP;
                continue;
            }

            for line in &lines {
                if y + BIO_LINE_HEIGHT > bottom {
                    debug!("{title} continues on page {}", self.canvas.page_count() + 1);
                    y = self.start_bio_page(&title);
                }
                self.canvas
                    .place_line(LEFT, y, width, BIO_LINE_HEIGHT, &bio_style, line, Align::Left);
                y += BIO_LINE_HEIGHT;
            }
            y += BIO_GAP;
        }
    }

    fn detail_page(&mut self, event: &Event, artist: &Artist) {
        let background = self.background(Background::Detail);
        self.canvas.new_page(background);

        let name = artist.display_name();
        let (round, easel) = artist.slot();
        let round_label = format!("Round {round} - Easel {easel}");
        if name.is_empty() {
            self.canvas.bookmark(&round_label);
        } else {
            self.canvas.bookmark(&name);
        }

        let url = qr::qr_target(Some(artist.instagram.as_str()), &event.eid);
        match qr::generate(&url, self.layout.qr_pixels) {
            Ok(code) => {
                let image = self.canvas.add_image(Image::new_raster(code));
                self.canvas.place_image(QR_X, QR_Y, QR_SIZE, QR_SIZE, image);
            }
            Err(e) => warn!("no QR code for '{name}' ({url}): {e}"),
        }

        let available = PAGE_WIDTH - NAME_X - LEFT;
        let size = match self.canvas.font(self.fonts.bold) {
            Some(font) => {
                let fit = fit_font_size(&sanitize(&name), font, available.into(), NAME_FIT);
                if !fit.fits {
                    debug!("'{name}' overflows even at {}", fit.size);
                }
                fit.size
            }
            None => NAME_FIT.max,
        };
        let name_style = TextStyle::new(self.fonts.bold, size);
        self.canvas
            .place_line(NAME_X, NAME_Y, available, Mm(10.0), &name_style, &name, Align::Left);

        let event_style = self.style(self.fonts.medium, 18.0);
        self.canvas
            .place_text(NAME_X + Mm(1.0), Mm(69.5), &event_style, &event.name);
        let round_style = self.style(self.fonts.medium, 21.0);
        self.canvas
            .place_line(NAME_X, Mm(77.0), available, Mm(8.0), &round_style, &round_label, Align::Left);

        self.history_column(artist);
        self.bio_column(artist);
    }

    /// The capped history, flowed top to bottom into as many side-by-side
    /// sub-columns as needed. Past [HISTORY_SUB_COLUMNS] the rows are tightened
    /// (text shrinking with them) so the list never crosses the bottom margin.
    fn history_column(&mut self, artist: &Artist) {
        let lines = format_history(&artist.event_history, self.layout.history_cap);
        if lines.is_empty() {
            return;
        }

        let available = self.canvas.content_bottom() - COLUMNS_TOP;
        let fitting_rows = ((available.0 / DETAIL_LINE_HEIGHT.0) as usize).max(1);
        let columns = lines.len().div_ceil(fitting_rows).clamp(1, HISTORY_SUB_COLUMNS);
        let rows = lines.len().div_ceil(columns);
        let line_height = if rows > fitting_rows {
            available / rows as f32
        } else {
            DETAIL_LINE_HEIGHT
        };
        if columns > 1 {
            debug!(
                "history of '{}' flowed into {columns} columns of {rows} rows",
                artist.display_name()
            );
        }

        let scale = line_height.0 / DETAIL_LINE_HEIGHT.0;
        let style = self.style(self.fonts.medium, HISTORY_FONT_SIZE * scale);
        let column_width = HISTORY_WIDTH / columns as f32;
        for (i, line) in lines.iter().enumerate() {
            let x = LEFT + column_width * (i / rows) as f32;
            let y = COLUMNS_TOP + line_height * (i % rows) as f32;
            self.canvas
                .place_line(x, y, column_width, line_height, &style, line, Align::Left);
        }
    }

    fn bio_column(&mut self, artist: &Artist) {
        let style = self.style(self.fonts.medium, 14.0);
        let x = LEFT + HISTORY_WIDTH + COLUMN_GAP;
        let width = PAGE_WIDTH - x - LEFT;
        let bottom = self.canvas.content_bottom();

        // a bio made only of stripped characters has no lines either
        let bio = artist.bio().unwrap_or_default();
        let mut lines = self.canvas.column_lines(&style, bio, width);
        if lines.is_empty() {
            let style = self.placeholder_style(14.0);
            self.canvas
                .place_line(x, COLUMNS_TOP, width, DETAIL_LINE_HEIGHT, &style, NO_BIO, Align::Left);
            return;
        }

        let rows = ((bottom - COLUMNS_TOP).0 / DETAIL_LINE_HEIGHT.0) as usize;
        if lines.len() <= rows {
            self.canvas
                .place_wrapped_text(x, COLUMNS_TOP, width, DETAIL_LINE_HEIGHT, &style, bio, Align::Left);
            return;
        }

        debug!(
            "bio of '{}' cut to {rows} of {} lines",
            artist.display_name(),
            lines.len()
        );
        lines.truncate(rows);
        if let (Some(last), Some(font)) = (lines.last_mut(), self.canvas.font(style.font)) {
            let text_width = width - Mm(2.0);
            *last = truncate_to_width(last.as_str(), "...", font, style.size, text_width.into());
        }

        let mut y = COLUMNS_TOP;
        for line in &lines {
            self.canvas
                .place_line(x, y, width, DETAIL_LINE_HEIGHT, &style, line, Align::Left);
            y += DETAIL_LINE_HEIGHT;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::InMemoryAssets;
    use crate::model::{Bid, ParticipationStatus};
    use crate::page::SpanLayout;

    fn artist(name: &str, round: u32, easel: u32) -> Artist {
        Artist {
            display_name: name.into(),
            round_number: round,
            easel_number: easel,
            ..Default::default()
        }
    }

    fn event() -> Event {
        Event {
            eid: "AB2995".into(),
            name: "Art Battle Test".into(),
            currency: "USD".into(),
        }
    }

    fn history(count: usize) -> Vec<HistoricalEvent> {
        (0..count)
            .map(|i| HistoricalEvent {
                event_eid: format!("AB{}", 1000 + i),
                round: 1,
                easel_number: (i % 12) as u32 + 1,
                is_winner: i == 0,
                ..Default::default()
            })
            .collect()
    }

    #[test]
    fn currency_symbols() {
        assert_eq!(currency_symbol("EUR"), "€");
        assert_eq!(currency_symbol("GBP"), "£");
        assert_eq!(currency_symbol("USD"), "$");
        assert_eq!(currency_symbol("CAD"), "$");
        assert_eq!(currency_symbol(""), "$");
    }

    #[test]
    fn top_bids_have_no_decimals() {
        assert_eq!(format_top_bid("$", 250.0), "$250");
        assert_eq!(format_top_bid("€", 99.6), "€100");
        assert_eq!(format_top_bid("$", 0.0), "-");
    }

    #[test]
    fn ledger_rows_with_and_without_lots() {
        let jane = artist("Jane Doe", 1, 3);
        assert_eq!(
            ledger_row("AB2995", &jane, None, "$"),
            vec!["AB2995-1-3", "Jane Doe", "0", "-", "-", "-"]
        );

        let lot = AuctionLot {
            round: 1,
            easel_number: 3,
            bid_count: 4,
            highest_bid: 250.0,
            winning_bid: Some(Bid {
                amount: 250.0,
                bidder_email: "bidder@example.com".into(),
                payment_status: "paid".into(),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(
            ledger_row("AB2995", &jane, Some(&lot), "$"),
            vec!["AB2995-1-3", "Jane Doe", "4", "$250", "bidder@example.com", "paid"]
        );

        let unpaid = AuctionLot {
            winning_bid: Some(Bid::default()),
            ..lot
        };
        let row = ledger_row("AB2995", &jane, Some(&unpaid), "$");
        assert_eq!(row[4], "-");
        assert_eq!(row[5], "-");
    }

    #[test]
    fn history_is_capped_with_a_summary_line() {
        let lines = format_history(&history(25), 20);
        assert_eq!(lines.len(), 21);
        assert_eq!(lines[0], "AB1000 R1-E1 W");
        assert_eq!(lines[1], "AB1001 R1-E2");
        assert_eq!(lines[20], "... and 5 more events");

        assert_eq!(format_history(&history(3), 20).len(), 3);
        assert!(format_history(&[], 20).is_empty());
    }

    #[test]
    fn composes_pages_in_order() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let artists = vec![
            artist("Jane Doe", 1, 1),
            artist("Sam Smith", 2, 1),
            Artist {
                status: ParticipationStatus::ConfirmedOnly,
                ..artist("John Q. Public", 2, 2)
            },
        ];
        let doc = composer.compose(&event(), &artists, &[]);

        // roster, ledger, round 1, round 2, additional, two detail pages
        assert_eq!(doc.page_count(), 7);
        let titles: Vec<&str> = doc.outline.entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "Artist List",
                "Auction & Bidding Information",
                "Round 1 Bios",
                "Round 2 Bios",
                "Additional Bios",
                "Jane Doe",
                "Sam Smith"
            ]
        );
        assert!(doc.page(0).unwrap().has_text("Art Battle Test"));
        assert!(!doc.page(0).unwrap().has_text("John Q. Public"));
        assert!(doc.page(4).unwrap().has_text("John Q. Public"));
        let placeholder = doc.page(4).unwrap().spans().find(|s| s.text == NO_BIO).unwrap();
        assert_eq!(placeholder.colour, colours::MUTED);
        assert!(doc.page(5).unwrap().has_text("Round 1 - Easel 1"));
        let info = doc.info.as_ref().unwrap();
        assert_eq!(info.title.as_deref(), Some("Art Battle Test Paperwork"));
        assert_eq!(info.subject.as_deref(), Some("Event AB2995"));
    }

    #[test]
    fn detail_pages_carry_a_qr_code() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let doc = composer.compose(&event(), &[artist("Jane Doe", 1, 1)], &[]);
        let detail = doc.page(doc.page_count() - 1).unwrap();
        assert_eq!(detail.images().count(), 1);
        // no background was available, so the only image on the page is the QR code
        assert_eq!(doc.images.len(), 1);
    }

    #[test]
    fn backgrounds_are_embedded_once() {
        let mut png = std::io::Cursor::new(Vec::new());
        image::DynamicImage::new_rgb8(8, 6)
            .write_to(&mut png, image::ImageOutputFormat::Png)
            .unwrap();
        let assets = InMemoryAssets::new().with_background(Background::Detail, png.into_inner());
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let artists = vec![artist("A", 1, 1), artist("B", 1, 2), artist("C", 1, 3)];
        let doc = composer.compose(&event(), &artists, &[]);

        // one background plus three QR codes
        assert_eq!(doc.images.len(), 4);
        let background = doc.page(doc.page_count() - 1).unwrap().images().next().unwrap().image_id;
        for page in doc.iter_pages().skip(doc.page_count() - 3) {
            assert_eq!(page.images().next().unwrap().image_id, background);
        }
        // pages without their background are blank
        assert_eq!(doc.page(0).unwrap().images().count(), 0);
    }

    #[test]
    fn long_names_shrink_to_fit() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let long = "Bartholomew Maximilian Featherstonehaugh-Cholmondeley";
        let doc = composer.compose(&event(), &[artist("Jo", 1, 1), artist(long, 1, 2)], &[]);
        let count = doc.page_count();
        let size_of = |page: usize, text: &str| {
            doc.page(page)
                .unwrap()
                .spans()
                .find(|s| s.text == text)
                .map(|s| s.font.size)
                .unwrap()
        };
        assert_eq!(size_of(count - 2, "Jo"), Pt(49.0));
        let shrunk = size_of(count - 1, long);
        assert!(shrunk < Pt(49.0) && shrunk >= Pt(20.0));
    }

    #[test]
    fn long_bios_paginate_on_summary_pages_and_truncate_on_detail_pages() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let mut artists: Vec<Artist> = (0..4)
            .map(|i| Artist {
                bio: lipsum::lipsum(400),
                ..artist(&format!("Artist {i}"), 1, i + 1)
            })
            .collect();
        artists[0].bio = "Short bio.".into();
        let doc = composer.compose(&event(), &artists, &[]);

        // roster + ledger + at least two round 1 pages + four detail pages
        assert!(doc.page_count() >= 8);
        let round_pages: Vec<_> = doc
            .iter_pages()
            .filter(|p| p.has_text("Art Battle Test - Round 1 Artist Bios"))
            .collect();
        assert!(round_pages.len() >= 2);

        let floor = Pt::from(Mm(15.0));
        for page in doc.iter_pages() {
            assert!(page.spans().all(|s| s.coords.1 > floor));
        }

        let detail = doc.page(doc.page_count() - 1).unwrap();
        assert!(detail.spans().any(|s| s.text.ends_with("...")));
        let short = doc.page(doc.page_count() - 4).unwrap();
        assert!(short.has_text("Short bio."));
    }

    #[test]
    fn detail_history_keeps_the_configured_cap() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let jane = Artist {
            event_history: history(25),
            ..artist("Jane Doe", 1, 1)
        };
        let doc = composer.compose(&event(), &[jane], &[]);
        let detail = doc.page(doc.page_count() - 1).unwrap();

        let events: Vec<&SpanLayout> = detail
            .spans()
            .filter(|s| s.text.starts_with("AB1"))
            .collect();
        assert_eq!(events.len(), 20);
        let summaries: Vec<&str> = detail
            .spans()
            .filter(|s| s.text.contains(" more events"))
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(summaries, vec!["... and 5 more events"]);

        // two columns side by side, nothing below the bottom margin
        let floor = Pt::from(Mm(15.0));
        assert!(detail.spans().all(|s| s.coords.1 > floor));
        let left = Pt::from(LEFT + Mm(1.0));
        assert!(events.iter().any(|s| (s.coords.0 .0 - left.0).abs() < 0.01));
        assert!(events.iter().any(|s| s.coords.0 > left));
        assert!(events.iter().all(|s| s.coords.0 < Pt::from(LEFT + HISTORY_WIDTH)));
    }

    #[test]
    fn short_histories_use_one_column() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let jane = Artist {
            event_history: history(5),
            ..artist("Jane Doe", 1, 1)
        };
        let doc = composer.compose(&event(), &[jane], &[]);
        let detail = doc.page(doc.page_count() - 1).unwrap();
        let xs: Vec<Pt> = detail
            .spans()
            .filter(|s| s.text.starts_with("AB1"))
            .map(|s| s.coords.0)
            .collect();
        assert_eq!(xs.len(), 5);
        assert!(xs.iter().all(|x| *x == xs[0]));
    }

    #[test]
    fn very_long_capped_histories_shrink_to_stay_on_the_page() {
        let assets = InMemoryAssets::new();
        let layout = LayoutConfig {
            history_cap: 60,
            ..LayoutConfig::default()
        };
        let composer = PaperworkComposer::new(&assets, layout);
        let jane = Artist {
            event_history: history(80),
            ..artist("Jane Doe", 1, 1)
        };
        let doc = composer.compose(&event(), &[jane], &[]);
        let detail = doc.page(doc.page_count() - 1).unwrap();
        assert_eq!(detail.spans().filter(|s| s.text.starts_with("AB1")).count(), 60);
        assert!(detail.has_text("... and 20 more events"));
        let floor = Pt::from(Mm(15.0));
        assert!(detail.spans().all(|s| s.coords.1 > floor));
    }

    #[test]
    fn bios_that_sanitize_to_nothing_get_the_placeholder() {
        let assets = InMemoryAssets::new();
        let composer = PaperworkComposer::new(&assets, LayoutConfig::default());
        let jane = Artist {
            bio: "\0\0".into(),
            ..artist("Jane Doe", 1, 1)
        };
        let doc = composer.compose(&event(), &[jane], &[]);
        let detail = doc.page(doc.page_count() - 1).unwrap();
        assert!(detail.has_text(NO_BIO));
    }

    #[test]
    fn renders_pdf_bytes() {
        let assets = InMemoryAssets::new();
        let bytes = render_paperwork(
            &assets,
            &LayoutConfig::default(),
            &event(),
            &[artist("Jane Doe", 1, 1)],
            &[],
        )
        .unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
