//! Tunables for the particle field and the tilt effect.

use serde::{Deserialize, Serialize};

/// Particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSettings {
    /// Particles generated on every resize.
    pub particle_count: usize,
    /// Pairs closer than this are connected by a line.
    pub connection_distance: f64,
    /// Upper bound of each velocity component, per frame.
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    /// Stroke width of connection lines.
    pub line_width: f64,
    /// Opacity of a line between two coincident particles.
    pub line_opacity: f32,
    /// Fixed seed for reproducible layouts; entropy when unset.
    pub seed: Option<u64>,
}

impl Default for FieldSettings {
    fn default() -> Self {
        Self {
            particle_count: 45,
            connection_distance: 160.0,
            max_speed: 0.4,
            min_radius: 1.0,
            max_radius: 3.0,
            line_width: 0.5,
            line_opacity: 0.3,
            seed: None,
        }
    }
}

/// Tilt effect parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltSettings {
    /// Rotation in degrees when the pointer sits on an edge.
    pub max_angle: f64,
    /// Perspective distance in pixels.
    pub perspective: f64,
    /// Upward shift of a tilted card in pixels.
    pub lift: f64,
}

impl Default for TiltSettings {
    fn default() -> Self {
        Self {
            max_angle: 2.0,
            perspective: 1000.0,
            lift: 5.0,
        }
    }
}
