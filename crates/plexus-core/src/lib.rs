//! Core types shared by the plexus crates.
//!
//! Geometry, colors, themes and the tunable settings of the particle field
//! and the tilt effect live here so that the simulation, the tilt controller
//! and the configuration loader agree on a single vocabulary.

mod color;
mod geometry;
mod settings;
mod theme;

pub use color::{ColorTag, Rgba};
pub use geometry::{Bounds, Point};
pub use settings::{FieldSettings, TiltSettings};
pub use theme::{Palette, Theme};
