/// A fill or stroke colour
#[derive(Copy, Clone, PartialEq, Debug)]
pub enum Colour {
    /// DeviceRGB; each component ranges from 0.0 to 1.0
    RGB { r: f32, g: f32, b: f32 },
    /// DeviceGray; 0.0 is black, 1.0 is white
    Grey { g: f32 },
}

/// The colours the paperwork is drawn in
pub mod colours {
    use super::*;

    pub const BLACK: Colour = Colour::Grey { g: 0.0 };
    /// Table borders, (200, 200, 200)
    pub const GRID: Colour = Colour::Grey { g: 200.0 / 255.0 };
    /// Text of placeholders such as a missing bio
    pub const MUTED: Colour = Colour::RGB {
        r: 0.35,
        g: 0.35,
        b: 0.35,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_is_light_grey() {
        assert_eq!(colours::GRID, Colour::Grey { g: 200.0 / 255.0 });
        assert_ne!(colours::GRID, colours::BLACK);
    }
}
