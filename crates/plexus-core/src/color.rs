//! Color values for drawing.

use ratatui::style::Color;

/// An sRGB color with a straight alpha channel in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Fully opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Same color with the given alpha, clamped to `0.0..=1.0`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Composite this color over an opaque background.
    pub fn over(self, background: Rgba) -> Rgba {
        let mix = |fg: u8, bg: u8| -> u8 {
            let v = fg as f32 * self.a + bg as f32 * (1.0 - self.a);
            v.round().clamp(0.0, 255.0) as u8
        };
        Rgba::rgb(
            mix(self.r, background.r),
            mix(self.g, background.g),
            mix(self.b, background.b),
        )
    }

    /// Convert to a terminal color, flattening alpha against `background`.
    ///
    /// Terminals have no notion of translucency, so faint lines are rendered
    /// as a blend toward the backdrop color instead.
    pub fn to_color(self, background: Rgba) -> Color {
        let flat = self.over(background);
        Color::Rgb(flat.r, flat.g, flat.b)
    }
}

/// Which of the two palette colors a particle was given at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Primary,
    Secondary,
}
