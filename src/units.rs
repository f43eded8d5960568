//! Length units used throughout the crate.
//!
//! PDF content is always written in points ([Pt]), while the paperwork layouts are
//! designed in millimetres ([Mm]) measured from the top-left corner of the page.

use derive_more::{Add, AddAssign, Deref, Display, From, Into, Sub, SubAssign, Sum};
use std::ops::{Div, Mul};

const POINTS_PER_MM: f32 = 72.0 / 25.4;

/// A length in PDF points (1/72 inch)
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, AddAssign, SubAssign, Sum,
    Deref, Display, From, Into,
)]
#[display("{_0}pt")]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(
    Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, AddAssign, SubAssign, Sum,
    Deref, Display, From, Into,
)]
#[display("{_0}mm")]
pub struct Mm(pub f32);

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Pt {
        Pt(mm.0 * POINTS_PER_MM)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Mm {
        Mm(pt.0 / POINTS_PER_MM)
    }
}

impl Mul<f32> for Pt {
    type Output = Pt;

    fn mul(self, rhs: f32) -> Pt {
        Pt(self.0 * rhs)
    }
}

impl Div<f32> for Pt {
    type Output = Pt;

    fn div(self, rhs: f32) -> Pt {
        Pt(self.0 / rhs)
    }
}

impl Mul<f32> for Mm {
    type Output = Mm;

    fn mul(self, rhs: f32) -> Mm {
        Mm(self.0 * rhs)
    }
}

impl Div<f32> for Mm {
    type Output = Mm;

    fn div(self, rhs: f32) -> Mm {
        Mm(self.0 / rhs)
    }
}
