//! Color themes for the backdrop.

use serde::{Deserialize, Serialize};

use crate::color::{ColorTag, Rgba};

/// The colors a field draws with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    /// First particle color.
    pub primary: Rgba,
    /// Second particle color.
    pub secondary: Rgba,
    /// Base color of connection lines; opacity is applied per line.
    pub line: Rgba,
    /// Backdrop color that translucent strokes blend toward.
    pub background: Rgba,
}

impl Palette {
    /// Resolve a particle's color tag.
    pub fn color(&self, tag: ColorTag) -> Rgba {
        match tag {
            ColorTag::Primary => self.primary,
            ColorTag::Secondary => self.secondary,
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Theme::default().palette()
    }
}

/// Named color theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Slate and indigo.
    #[default]
    Slate,
    Ocean,
    Ember,
}

impl Theme {
    /// Cycle to the next theme.
    pub fn next(self) -> Self {
        match self {
            Theme::Slate => Theme::Ocean,
            Theme::Ocean => Theme::Ember,
            Theme::Ember => Theme::Slate,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Theme::Slate => "slate",
            Theme::Ocean => "ocean",
            Theme::Ember => "ember",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Theme::Slate => Palette {
                primary: Rgba::rgb(0x94, 0xa3, 0xb8),
                secondary: Rgba::rgb(0x81, 0x8c, 0xf8),
                line: Rgba::rgb(148, 163, 184),
                background: Rgba::rgb(15, 23, 42),
            },
            Theme::Ocean => Palette {
                primary: Rgba::rgb(56, 189, 248),
                secondary: Rgba::rgb(45, 212, 191),
                line: Rgba::rgb(125, 211, 252),
                background: Rgba::rgb(8, 47, 73),
            },
            Theme::Ember => Palette {
                primary: Rgba::rgb(251, 146, 60),
                secondary: Rgba::rgb(248, 113, 113),
                line: Rgba::rgb(253, 186, 116),
                background: Rgba::rgb(41, 20, 12),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_cycle_returns_to_start() {
        let start = Theme::default();
        assert_eq!(start.next().next().next(), start);
    }

    #[test]
    fn test_palette_resolves_tags() {
        let p = Theme::Slate.palette();
        assert_eq!(p.color(ColorTag::Primary), Rgba::rgb(0x94, 0xa3, 0xb8));
        assert_eq!(p.color(ColorTag::Secondary), Rgba::rgb(0x81, 0x8c, 0xf8));
    }
}
