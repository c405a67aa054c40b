//! Pointer event handling for tilt targets.

use plexus_core::{Bounds, Point, TiltSettings};
use tracing::{debug, trace};

use crate::transform::{Transform, tilt_for};

/// An element that can be tilted.
pub trait TiltTarget {
    /// Current bounding box in the same units as pointer coordinates.
    fn bounds(&self) -> Bounds;

    /// Transform currently applied.
    fn transform(&self) -> Transform;

    /// Overwrite the applied transform.
    fn set_transform(&mut self, transform: Transform);
}

/// Applies the tilt effect to a fixed set of targets.
///
/// The set is whatever the host passes in at construction; targets added to
/// the host later are not picked up. Whether a target is tilted is read from
/// its own transform, the controller keeps no per-target state.
#[derive(Debug)]
pub struct TiltController<T> {
    targets: Vec<T>,
    settings: TiltSettings,
}

impl<T: TiltTarget> TiltController<T> {
    pub fn new(targets: Vec<T>, settings: TiltSettings) -> Self {
        if targets.is_empty() {
            debug!("no tilt targets, pointer handling disabled");
        }
        Self { targets, settings }
    }

    /// False when there is nothing to tilt; hosts skip pointer wiring then.
    pub fn is_active(&self) -> bool {
        !self.targets.is_empty()
    }

    /// Pointer moved over target `index`: recompute and apply its tilt.
    pub fn on_pointer_move(&mut self, index: usize, pointer: Point) {
        let settings = &self.settings;
        if let Some(target) = self.targets.get_mut(index) {
            let transform = tilt_for(pointer, target.bounds(), settings);
            trace!(index, %transform, "tilt");
            target.set_transform(transform);
        }
    }

    /// Pointer left target `index`: put it back to neutral.
    pub fn on_pointer_leave(&mut self, index: usize) {
        let neutral = Transform::neutral(self.settings.perspective);
        if let Some(target) = self.targets.get_mut(index) {
            target.set_transform(neutral);
        }
    }

    /// Route a pointer position from a global event stream.
    ///
    /// Targets under the pointer get a move; tilted targets the pointer is no
    /// longer over get a leave. Returns whether any transform was written.
    pub fn pointer_moved(&mut self, pointer: Point) -> bool {
        let mut changed = false;
        for index in 0..self.targets.len() {
            let target = &self.targets[index];
            if target.bounds().contains(pointer) {
                self.on_pointer_move(index, pointer);
                changed = true;
            } else if !target.transform().is_neutral() {
                self.on_pointer_leave(index);
                changed = true;
            }
        }
        changed
    }

    /// Reset every target, e.g. when the pointer leaves the window.
    pub fn leave_all(&mut self) {
        for index in 0..self.targets.len() {
            self.on_pointer_leave(index);
        }
    }

    pub fn settings(&self) -> &TiltSettings {
        &self.settings
    }

    pub fn targets(&self) -> &[T] {
        &self.targets
    }

    /// Mutable access, e.g. to update target geometry after a relayout.
    pub fn targets_mut(&mut self) -> &mut [T] {
        &mut self.targets
    }
}
