use paperwork_gen::assets::InMemoryAssets;
use paperwork_gen::config::LayoutConfig;
use paperwork_gen::model::{Artist, AuctionLot, Bid, Event, HistoricalEvent, ParticipationStatus};
use paperwork_gen::{paperwork_filename, render_paperwork};

fn artist(name: &str, round: u32, easel: u32, bio: &str) -> Artist {
    Artist {
        display_name: name.to_string(),
        round_number: round,
        easel_number: easel,
        bio: bio.to_string(),
        ..Default::default()
    }
}

fn main() {
    env_logger::init();

    // no fonts or backgrounds are supplied, so the builtin Helvetica faces are used
    // and the pages are left without backgrounds
    let assets = InMemoryAssets::new();
    let layout = LayoutConfig::default();

    let event = Event {
        eid: "AB2995".to_string(),
        name: "Art Battle Toronto".to_string(),
        currency: "CAD".to_string(),
    };

    let mut jane = artist(
        "Jane Doe",
        1,
        1,
        "Jane paints \u{201c}fast\u{201d} city scenes in acrylic \u{2014} usually at night.",
    );
    jane.instagram = "@janedoe".to_string();
    jane.event_history = (0..25)
        .map(|i| HistoricalEvent {
            event_eid: format!("AB{}", 2000 + i),
            round: 1,
            easel_number: i % 12 + 1,
            is_winner: i % 5 == 0,
            ..Default::default()
        })
        .collect();

    let artists = vec![
        jane,
        artist("John Smith", 1, 2, ""),
        artist("Ana Lima", 2, 1, "Muralist from S\u{e3}o Paulo."),
        Artist {
            status: ParticipationStatus::ConfirmedOnly,
            ..artist("Sam Lee", 0, 0, "Alternate for the final round.")
        },
    ];

    let lots = vec![AuctionLot {
        round: 1,
        easel_number: 1,
        bid_count: 3,
        highest_bid: 250.0,
        winning_bid: Some(Bid {
            amount: 250.0,
            bidder_name: "Pat Morgan".to_string(),
            payment_status: "paid".to_string(),
            ..Default::default()
        }),
        all_bids: Vec::new(),
    }];

    let bytes = render_paperwork(&assets, &layout, &event, &artists, &lots)
        .expect("can render paperwork");

    // save the result next to wherever the example was run from
    let filename = paperwork_filename(&event.eid);
    std::fs::write(&filename, bytes).expect("can write pdf");
    println!("wrote {filename}");
}
