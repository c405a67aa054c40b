//! Pointer-driven 3D tilt for card elements.
//!
//! Each pointer move over a card rotates it slightly toward the pointer and
//! lifts it; leaving the card puts it back flat. The host supplies the cards
//! as [`TiltTarget`]s and forwards pointer events to the [`TiltController`].

mod controller;
mod transform;

pub use controller::{TiltController, TiltTarget};
pub use transform::{Transform, tilt_for};
