//! Animated particle field for the plexus backdrop.
//!
//! A [`ParticleField`] owns a batch of drifting particles that bounce off the
//! viewport edges. Every frame it paints the particles as discs and links each
//! pair closer than the connection distance with a line that fades out as the
//! pair drifts apart. Painting goes through the [`Surface`] trait and timing
//! through the [`Scheduler`] trait, so the simulation runs the same against a
//! terminal canvas, a window, or a recording in tests.

mod field;
mod particle;
mod schedule;
mod surface;

pub use field::{Connection, ParticleField};
pub use particle::Particle;
pub use schedule::{Animation, FrameClock, ManualTicks, Scheduler};
pub use surface::{DrawCommand, RecordingSurface, Surface};
