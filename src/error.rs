use thiserror::Error;

use crate::source::SourceError;

/// Errors raised while building or serializing a PDF document
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to parse the image
    Image(#[from] image::ImageError),

    #[error("object reference for {0} was never generated")]
    /// A page or resource referred to an object that was not written
    UnresolvedReference(&'static str),
}

/// The failures a caller of the paperwork pipeline can observe
#[derive(Error, Debug)]
pub enum PaperworkError {
    #[error("event EID is required")]
    MissingEid,

    #[error("event not found: {0}")]
    EventNotFound(String),

    #[error("failed to fetch event data: {0}")]
    Fetch(#[source] SourceError),

    #[error("no artists found for event {0}")]
    NoArtists(String),

    #[error("failed to generate PDF: {0}")]
    Generation(#[from] PDFError),
}

impl From<SourceError> for PaperworkError {
    fn from(err: SourceError) -> Self {
        match err {
            SourceError::NotFound(eid) => PaperworkError::EventNotFound(eid),
            other => PaperworkError::Fetch(other),
        }
    }
}
