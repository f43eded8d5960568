//! Event paperwork PDFs: artist rosters, auction ledgers, bio summaries and per-artist
//! detail pages with QR codes, laid out on US Letter landscape pages.
//!
//! The lower layers ([Document], [Page], [Font], [Image]) are a small PDF object model
//! serialized with [pdf_writer]. [canvas::Canvas] puts a millimetre, top-left
//! addressed drawing surface on top of it, and [composer] sequences the paperwork
//! pages from an event's data.

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Utility functions and structures to layout objects (most text) on pages
pub mod layout;

mod outline;
pub use outline::*;

mod page;
pub use page::*;

/// Standard page sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod units;
pub use units::*;

mod error;
pub use error::*;

pub mod assets;
pub mod canvas;
pub mod composer;
pub mod config;
pub mod grouping;
pub mod model;
pub mod qr;
pub mod sanitize;
pub mod source;
pub mod table;

pub use composer::{render_paperwork, PaperworkComposer};
pub use source::{generate_event_paperwork, paperwork_filename};

/// Re-export PDF-writer functionality
pub use pdf_writer;
