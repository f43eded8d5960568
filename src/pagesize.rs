//! Page sizes.
//!
//! Sizes are given portrait (width ≤ height); the paperwork turns them with
//! [`PageOrientation::landscape`].
//!
//! ```
//! use paperwork_gen::pagesize::{LETTER, PageOrientation};
//!
//! let landscape = LETTER.landscape();
//! assert!(landscape.0 > landscape.1);
//! ```

use crate::units::*;

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// US Letter, 8.5 x 11 inches
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

pub trait PageOrientation {
    /// The size with its longer side as the width
    fn landscape(self) -> Self;
}

impl PageOrientation for PageSize {
    fn landscape(self) -> PageSize {
        if self.0 >= self.1 {
            self
        } else {
            (self.1, self.0)
        }
    }
}
