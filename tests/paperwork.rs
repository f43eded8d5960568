use paperwork_gen::assets::{AssetProvider, Background, FilesystemAssets, FontFace, InMemoryAssets};
use paperwork_gen::composer::format_history;
use paperwork_gen::config::{LayoutConfig, PaperworkConfig};
use paperwork_gen::model::{
    Artist, AuctionLot, Bid, Event, HistoricalEvent, ParticipationStatus, PaperworkData,
};
use paperwork_gen::source::{JsonDirSource, PaperworkSource};
use paperwork_gen::{generate_event_paperwork, render_paperwork, Document, PaperworkComposer};
use std::fs;

fn scenario() -> (Event, Vec<Artist>, Vec<AuctionLot>) {
    let event = Event {
        eid: "AB2995".into(),
        name: "Art Battle 2995".into(),
        currency: "USD".into(),
    };
    let artists = vec![
        Artist {
            round_number: 1,
            easel_number: 1,
            display_name: "Jane Doe".into(),
            bio: "Jane paints large abstract landscapes.".into(),
            instagram: "@janedoe".into(),
            ..Default::default()
        },
        Artist {
            round_number: 2,
            easel_number: 1,
            display_name: "John Q. Public".into(),
            status: ParticipationStatus::ConfirmedOnly,
            ..Default::default()
        },
    ];
    let lots = vec![AuctionLot {
        round: 1,
        easel_number: 1,
        bid_count: 3,
        highest_bid: 250.0,
        winning_bid: Some(Bid {
            amount: 250.0,
            bidder_name: "Pat Bidder".into(),
            payment_status: "paid".into(),
            ..Default::default()
        }),
        ..Default::default()
    }];
    (event, artists, lots)
}

fn compose(assets: &dyn AssetProvider) -> Document {
    let (event, artists, lots) = scenario();
    PaperworkComposer::new(assets, LayoutConfig::default()).compose(&event, &artists, &lots)
}

#[test]
fn confirmed_only_artists_only_appear_in_bio_summaries() {
    let doc = compose(&InMemoryAssets::new());

    // roster, ledger, round 1 bios, additional bios, one detail page
    assert_eq!(doc.page_count(), 5);

    let roster = doc.page(0).unwrap();
    assert!(roster.has_text("Art Battle 2995"));
    assert!(roster.has_text("Jane Doe"));
    assert!(roster.has_text("1-1"));
    assert!(!roster.has_text("John Q. Public"));

    let ledger = doc.page(1).unwrap();
    assert!(ledger.has_text("Auction & Bidding Information"));
    assert!(ledger.has_text("AB2995-1-1"));
    assert!(ledger.has_text("$250"));
    assert!(ledger.has_text("Pat Bidder"));
    assert!(ledger.has_text("paid"));
    assert!(!ledger.has_text("John Q. Public"));

    let round_one = doc.page(2).unwrap();
    assert!(round_one.has_text("Art Battle 2995 - Round 1 Artist Bios"));
    assert!(round_one.has_text("Jane Doe"));
    assert!(round_one.has_text("Jane paints large abstract landscapes."));

    let additional = doc.page(3).unwrap();
    assert!(additional.has_text("Art Battle 2995 - Additional Artist Bios"));
    assert!(additional.has_text("John Q. Public"));
    assert!(additional.has_text("No bio available"));

    let detail = doc.page(4).unwrap();
    assert!(detail.has_text("Jane Doe"));
    assert!(detail.has_text("Art Battle 2995"));
    assert!(detail.has_text("Round 1 - Easel 1"));
    assert!(detail.has_text("Jane paints large abstract landscapes."));
    assert_eq!(detail.images().count(), 1);
    assert!(!doc.iter_pages().skip(4).any(|p| p.has_text("John Q. Public")));
}

#[test]
fn history_beyond_the_cap_is_summarized() {
    let history: Vec<HistoricalEvent> = (0..25)
        .map(|i| HistoricalEvent {
            event_eid: format!("AB{}", 2000 + i),
            round: 2,
            easel_number: 4,
            is_winner: i % 5 == 0,
            ..Default::default()
        })
        .collect();

    let lines = format_history(&history, 20);
    assert_eq!(lines.len(), 21);
    assert!(lines[..20].iter().all(|l| l.starts_with("AB") && l.contains(" R2-E4")));
    assert_eq!(lines.iter().filter(|l| l.ends_with(" W")).count(), 4);
    assert_eq!(lines[20], "... and 5 more events");
}

#[test]
fn detail_pages_print_the_whole_capped_history() {
    let (event, mut artists, lots) = scenario();
    artists[0].event_history = (0..25)
        .map(|i| HistoricalEvent {
            event_eid: format!("AB{}", 2000 + i),
            round: 2,
            easel_number: 4,
            ..Default::default()
        })
        .collect();
    let assets = InMemoryAssets::new();
    let doc = PaperworkComposer::new(&assets, LayoutConfig::default()).compose(&event, &artists, &lots);

    let detail = doc.page(doc.page_count() - 1).unwrap();
    assert!(detail.has_text("Jane Doe"));
    assert_eq!(detail.spans().filter(|s| s.text.ends_with(" R2-E4")).count(), 20);
    assert_eq!(
        detail.spans().filter(|s| s.text == "... and 5 more events").count(),
        1
    );
}

#[test]
fn missing_assets_degrade_instead_of_failing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = PaperworkConfig::default();
    config.assets.templates_path = dir.path().to_path_buf();
    let assets = FilesystemAssets::new(config.assets.clone());

    let (event, artists, lots) = scenario();
    let bytes = render_paperwork(&assets, &config.layout, &event, &artists, &lots).unwrap();
    assert!(bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&bytes);
    assert!(text.contains("/Helvetica-Bold"));
    assert!(text.contains("/Count 5"));
}

#[test]
fn unreadable_fonts_fall_back_to_builtin_faces() {
    let assets = InMemoryAssets::new().with_font(FontFace::Bold, b"not a font".to_vec());
    let doc = compose(&assets);
    assert!(doc.fonts.iter().all(|(_, font)| !font.is_embedded()));
}

#[test]
fn backgrounds_are_shared_between_pages() {
    let mut png = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgba8(10, 8)
        .write_to(&mut png, image::ImageOutputFormat::Png)
        .unwrap();
    let png = png.into_inner();
    let assets = InMemoryAssets::new()
        .with_background(Background::Roster, png.clone())
        .with_background(Background::Auction, png.clone())
        .with_background(Background::BioSummary, png.clone())
        .with_background(Background::Detail, png);

    let doc = compose(&assets);
    // four backgrounds and one QR code
    assert_eq!(doc.images.len(), 5);
    for page in doc.iter_pages() {
        let background = page.images().next().unwrap();
        assert_eq!(background.position, page.media_box);
    }

    let mut bytes = Vec::new();
    doc.write(&mut bytes).unwrap();
    // the alpha channel is written as a soft mask
    assert!(String::from_utf8_lossy(&bytes).contains("/SMask"));
}

#[test]
fn generates_from_a_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let (event, artists, lots) = scenario();
    let data = PaperworkData {
        event,
        total_artists: artists.len() as u32,
        total_bids: 3,
        artists,
        auction_lots: lots,
        generated_at: "2024-05-01T00:00:00Z".into(),
    };
    fs::write(
        dir.path().join("AB2995.json"),
        serde_json::to_string(&data).unwrap(),
    )
    .unwrap();

    let source = JsonDirSource::new(dir.path());
    assert_eq!(source.fetch("AB2995").unwrap(), data);

    let paperwork = generate_event_paperwork(
        &source,
        &InMemoryAssets::new(),
        &PaperworkConfig::default(),
        "AB2995",
    )
    .unwrap();
    assert_eq!(paperwork.filename, "artbattle_AB2995_paperwork.pdf");
    assert!(paperwork.bytes.starts_with(b"%PDF-"));
    let text = String::from_utf8_lossy(&paperwork.bytes);
    assert!(text.contains("(Art Battle 2995 Paperwork)"));
}
