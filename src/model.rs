//! The event payload consumed by the composer.
//!
//! These types deserialize directly from the JSON returned by the upstream data
//! source. Unknown keys are ignored and `null` strings read as empty strings, so
//! a sparse or partially-populated record never fails to load.

use serde::{Deserialize, Deserializer, Serialize};

fn nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn nullable_vec<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The event the paperwork is being produced for
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Short public code, e.g. `AB2995`
    #[serde(default, deserialize_with = "nullable_string")]
    pub eid: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub name: String,
    /// ISO 4217 currency code, e.g. `USD`
    #[serde(default, deserialize_with = "nullable_string")]
    pub currency: String,
}

/// How an artist takes part in the event
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "String")]
pub enum ParticipationStatus {
    /// Assigned to a round and easel
    #[default]
    Ready,
    /// Confirmed to attend but without a competitive slot: listed in the bio
    /// summaries only
    ConfirmedOnly,
    /// Any other upstream status, treated like [ParticipationStatus::Ready]
    Other(String),
}

impl From<Option<String>> for ParticipationStatus {
    fn from(status: Option<String>) -> Self {
        match status.as_deref().map(str::trim) {
            None | Some("") | Some("ready") => ParticipationStatus::Ready,
            Some("confirmed-only") => ParticipationStatus::ConfirmedOnly,
            Some(other) => ParticipationStatus::Other(other.to_string()),
        }
    }
}

impl From<ParticipationStatus> for String {
    fn from(status: ParticipationStatus) -> Self {
        match status {
            ParticipationStatus::Ready => "ready".to_string(),
            ParticipationStatus::ConfirmedOnly => "confirmed-only".to_string(),
            ParticipationStatus::Other(other) => other,
        }
    }
}

/// A past event the artist competed in
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoricalEvent {
    #[serde(default, deserialize_with = "nullable_string")]
    pub event_eid: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub event_name: String,
    #[serde(default, rename = "round_number")]
    pub round: u32,
    #[serde(default)]
    pub easel_number: u32,
    #[serde(default)]
    pub is_winner: bool,
}

/// One roster entry: an artist in a given round at a given easel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    #[serde(default, deserialize_with = "nullable_string")]
    pub contestant_id: String,
    #[serde(default)]
    pub round_number: u32,
    #[serde(default)]
    pub easel_number: u32,
    #[serde(default, deserialize_with = "nullable_string")]
    pub display_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub artist_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub bio: String,
    /// Social handle or profile URL, used as the QR code target
    #[serde(default, deserialize_with = "nullable_string")]
    pub instagram: String,
    #[serde(default)]
    pub status: ParticipationStatus,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub event_history: Vec<HistoricalEvent>,
}

impl Artist {
    /// The name to print for this artist: the display name, else the artist name,
    /// else the legal first and last names. Empty only when all of them are.
    pub fn display_name(&self) -> String {
        if !self.display_name.trim().is_empty() {
            return self.display_name.trim().to_string();
        }
        if !self.artist_name.trim().is_empty() {
            return self.artist_name.trim().to_string();
        }
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
            .trim()
            .to_string()
    }

    pub fn is_confirmed_only(&self) -> bool {
        self.status == ParticipationStatus::ConfirmedOnly
    }

    /// The (round, easel) pair identifying this entry and its auction lot
    pub fn slot(&self) -> (u32, u32) {
        (self.round_number, self.easel_number)
    }

    /// The biography, if there is any non-blank text
    pub fn bio(&self) -> Option<&str> {
        let bio = self.bio.trim();
        (!bio.is_empty()).then_some(bio)
    }
}

/// A single bid on a lot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    #[serde(default)]
    pub amount: f64,
    #[serde(default, deserialize_with = "nullable_string")]
    pub bidder_name: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub bidder_email: String,
    #[serde(default, deserialize_with = "nullable_string")]
    pub payment_status: String,
}

impl Bid {
    /// The bidder's name, falling back to their email address
    pub fn bidder_display(&self) -> &str {
        if self.bidder_name.trim().is_empty() {
            self.bidder_email.trim()
        } else {
            self.bidder_name.trim()
        }
    }
}

/// Aggregated auction results for one (round, easel) slot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuctionLot {
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub easel_number: u32,
    #[serde(default)]
    pub bid_count: u32,
    #[serde(default)]
    pub highest_bid: f64,
    #[serde(default)]
    pub winning_bid: Option<Bid>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub all_bids: Vec<Bid>,
}

impl AuctionLot {
    pub fn slot(&self) -> (u32, u32) {
        (self.round, self.easel_number)
    }
}

/// Everything needed to produce one event's paperwork
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PaperworkData {
    pub event: Event,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub artists: Vec<Artist>,
    #[serde(default, deserialize_with = "nullable_vec")]
    pub auction_lots: Vec<AuctionLot>,
    #[serde(default)]
    pub total_artists: u32,
    #[serde(default)]
    pub total_bids: u32,
    #[serde(default, deserialize_with = "nullable_string")]
    pub generated_at: String,
}
