//! Partitioning of the artist list into the views the composer draws from.

use crate::model::Artist;
use log::warn;
use std::collections::BTreeMap;

/// Which bio summary a group of artists belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BioGroupKind {
    Round(u32),
    /// Confirmed-only artists
    Additional,
}

impl BioGroupKind {
    /// The heading used for the group's summary pages
    pub fn title(&self, event_name: &str) -> String {
        match self {
            BioGroupKind::Round(round) => format!("{event_name} - Round {round} Artist Bios"),
            BioGroupKind::Additional => format!("{event_name} - Additional Artist Bios"),
        }
    }

    /// The label used for the group's bookmark
    pub fn label(&self) -> String {
        match self {
            BioGroupKind::Round(round) => format!("Round {round} Bios"),
            BioGroupKind::Additional => "Additional Bios".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BioGroup<'a> {
    pub kind: BioGroupKind,
    pub artists: Vec<&'a Artist>,
}

/// The views of one artist list. Every artist is in exactly one of `roster` and
/// `additional`, and each roster artist is in exactly one of `rounds` and `unplaced`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Partition<'a> {
    /// All artists that aren't confirmed-only, in input order. Drives the roster,
    /// the auction ledger and the detail pages.
    pub roster: Vec<&'a Artist>,
    /// Roster artists keyed by round, for rounds `1..=round_count`
    pub rounds: BTreeMap<u32, Vec<&'a Artist>>,
    /// Confirmed-only artists, whatever their round
    pub additional: Vec<&'a Artist>,
    /// Roster artists whose round is outside `1..=round_count`. They still appear
    /// on the roster and ledger but in no bio summary.
    pub unplaced: Vec<&'a Artist>,
}

impl<'a> Partition<'a> {
    /// Partition `artists` for an event with `round_count` rounds
    pub fn new(artists: &'a [Artist], round_count: u32) -> Partition<'a> {
        let mut partition = Partition::default();

        for artist in artists {
            if artist.is_confirmed_only() {
                partition.additional.push(artist);
                continue;
            }

            partition.roster.push(artist);
            if (1..=round_count).contains(&artist.round_number) {
                partition
                    .rounds
                    .entry(artist.round_number)
                    .or_default()
                    .push(artist);
            } else {
                warn!(
                    "artist '{}' is in round {} which is outside rounds 1..={round_count}; omitting from bio summaries",
                    artist.display_name(),
                    artist.round_number
                );
                partition.unplaced.push(artist);
            }
        }

        partition
    }

    /// The non-empty bio summary groups, in page order: rounds ascending, then
    /// additional artists
    pub fn bio_groups(&self) -> Vec<BioGroup<'a>> {
        self.rounds
            .iter()
            .filter(|(_, artists)| !artists.is_empty())
            .map(|(round, artists)| BioGroup {
                kind: BioGroupKind::Round(*round),
                artists: artists.clone(),
            })
            .chain((!self.additional.is_empty()).then(|| BioGroup {
                kind: BioGroupKind::Additional,
                artists: self.additional.clone(),
            }))
            .collect()
    }
}
