//! A single drifting particle.

use plexus_core::{ColorTag, FieldSettings, Point};
use rand::Rng;

/// State for a single particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    /// Horizontal displacement per frame.
    pub vx: f64,
    /// Vertical displacement per frame.
    pub vy: f64,
    /// Disc radius, fixed at creation.
    pub radius: f64,
    pub color: ColorTag,
}

impl Particle {
    /// Spawn a particle uniformly inside a `width` x `height` viewport.
    pub fn random<R: Rng>(
        rng: &mut R,
        width: f64,
        height: f64,
        settings: &FieldSettings,
    ) -> Self {
        let speed = settings.max_speed;
        let radius_span = settings.max_radius - settings.min_radius;
        Self {
            x: rng.random::<f64>() * width,
            y: rng.random::<f64>() * height,
            vx: (rng.random::<f64>() - 0.5) * 2.0 * speed,
            vy: (rng.random::<f64>() - 0.5) * 2.0 * speed,
            radius: settings.min_radius + rng.random::<f64>() * radius_span,
            color: if rng.random_bool(0.5) {
                ColorTag::Primary
            } else {
                ColorTag::Secondary
            },
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Advance one frame and bounce off the viewport edges.
    ///
    /// Only the velocity is reflected. The position may overshoot an edge by
    /// one frame's displacement and is left there.
    pub fn update(&mut self, width: f64, height: f64) {
        self.x += self.vx;
        self.y += self.vy;

        if self.x < 0.0 || self.x > width {
            self.vx = -self.vx;
        }
        if self.y < 0.0 || self.y > height {
            self.vy = -self.vy;
        }
    }
}
