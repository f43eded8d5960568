//! Text measurement and layout utilities.
//!
//! Everything here is a pure function of a [`Font`](crate::Font), a size and the text
//! itself, so layouts can be computed before (and independently of) drawing:
//!
//! - [`width_of_text`] measures a single line
//! - [`wrap_text`] breaks text into word-aware lines for a bounded column
//! - [`fit_font_size`] shrinks a font size step by step until a line fits
//!
//! # Example
//!
//! ```
//! use paperwork_gen::{BuiltinFont, Font, Pt};
//! use paperwork_gen::layout::{fit_font_size, wrap_text, FitRange};
//!
//! let font = Font::builtin(BuiltinFont::HelveticaBold);
//! let fit = fit_font_size(
//!     "A Very Long Artist Name Indeed",
//!     &font,
//!     Pt(300.0),
//!     FitRange { max: Pt(49.0), min: Pt(20.0), step: Pt(2.0) },
//! );
//! assert!(fit.size < Pt(49.0));
//!
//! let lines = wrap_text("one two three four five", &font, Pt(12.0), Pt(60.0));
//! assert!(lines.len() > 1);
//! ```

mod margins;
mod text;

pub use margins::*;
pub use text::*;
