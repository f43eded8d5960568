//! Where event data comes from, and the request pipeline that turns an event code
//! into a finished document.

use crate::assets::AssetProvider;
use crate::composer::render_paperwork;
use crate::config::PaperworkConfig;
use crate::error::PaperworkError;
use crate::model::PaperworkData;
use log::info;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("event not found: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse event data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Fetches everything needed to produce one event's paperwork
pub trait PaperworkSource {
    fn fetch(&self, eid: &str) -> Result<PaperworkData, SourceError>;
}

/// Reads event payloads saved as `<dir>/<EID>.json`
#[derive(Debug, Clone)]
pub struct JsonDirSource {
    dir: PathBuf,
}

impl JsonDirSource {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        JsonDirSource {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, eid: &str) -> Option<PathBuf> {
        let file = format!("{eid}.json");
        // the event code must name a file directly inside the directory
        let mut components = Path::new(&file).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Some(self.dir.join(file)),
            _ => None,
        }
    }
}

impl PaperworkSource for JsonDirSource {
    fn fetch(&self, eid: &str) -> Result<PaperworkData, SourceError> {
        let path = self
            .path_for(eid)
            .ok_or_else(|| SourceError::NotFound(eid.to_string()))?;
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(SourceError::NotFound(eid.to_string()))
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_str(&content)?)
    }
}

/// The name a generated document is saved or downloaded as
pub fn paperwork_filename(eid: &str) -> String {
    format!("artbattle_{eid}_paperwork.pdf")
}

/// A finished document
#[derive(Debug, Clone)]
pub struct GeneratedPaperwork {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Fetch an event's data, validate it and render its paperwork
pub fn generate_event_paperwork(
    source: &dyn PaperworkSource,
    assets: &dyn AssetProvider,
    config: &PaperworkConfig,
    eid: &str,
) -> Result<GeneratedPaperwork, PaperworkError> {
    let eid = eid.trim();
    if eid.is_empty() {
        return Err(PaperworkError::MissingEid);
    }

    info!("fetching paperwork data for event {eid}");
    let data = source.fetch(eid)?;
    info!(
        "fetched event '{}': {} artists, {} auction lots, {} bids",
        data.event.name,
        data.artists.len(),
        data.auction_lots.len(),
        data.total_bids
    );

    if data.artists.is_empty() {
        return Err(PaperworkError::NoArtists(eid.to_string()));
    }

    let bytes = render_paperwork(
        assets,
        &config.layout,
        &data.event,
        &data.artists,
        &data.auction_lots,
    )?;

    Ok(GeneratedPaperwork {
        filename: paperwork_filename(eid),
        bytes,
    })
}
