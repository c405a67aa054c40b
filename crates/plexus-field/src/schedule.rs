//! Frame scheduling and the animation driver.

use std::ops::ControlFlow;
use std::thread;
use std::time::{Duration, Instant};

use crate::field::ParticleField;
use crate::surface::Surface;

/// Source of display refresh signals.
pub trait Scheduler {
    /// Time left until the next refresh is due.
    fn until_next(&self) -> Duration;

    /// Returns true, and arms the following refresh, once a refresh is due.
    fn poll_tick(&mut self) -> bool;
}

/// Wall-clock refresh cadence.
///
/// A host that falls behind gets one tick for the backlog; missed refreshes
/// are dropped, never replayed in a burst.
#[derive(Debug, Clone)]
pub struct FrameClock {
    interval: Duration,
    deadline: Instant,
}

impl FrameClock {
    /// The first tick is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            deadline: Instant::now(),
        }
    }

    /// Clock ticking `fps` times per second.
    pub fn from_fps(fps: u32) -> Self {
        Self::new(Duration::from_secs(1) / fps.max(1))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl Scheduler for FrameClock {
    fn until_next(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }

    fn poll_tick(&mut self) -> bool {
        let now = Instant::now();
        if now < self.deadline {
            return false;
        }
        self.deadline += self.interval;
        if self.deadline <= now {
            self.deadline = now + self.interval;
        }
        true
    }
}

/// Scheduler that ticks on every poll, for headless runs and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualTicks;

impl Scheduler for ManualTicks {
    fn until_next(&self) -> Duration {
        Duration::ZERO
    }

    fn poll_tick(&mut self) -> bool {
        true
    }
}

/// Drives a [`ParticleField`] from a [`Scheduler`].
///
/// The field never stops its own animation. It runs for as long as the host
/// keeps pumping it; ending the loop is the host's decision alone.
#[derive(Debug)]
pub struct Animation<S> {
    field: ParticleField,
    scheduler: S,
    frames: u64,
}

impl<S: Scheduler> Animation<S> {
    pub fn new(field: ParticleField, scheduler: S) -> Self {
        Self {
            field,
            scheduler,
            frames: 0,
        }
    }

    /// Step the field if a refresh is due. Returns whether it advanced.
    ///
    /// Hosts that paint on their own schedule call this from their event
    /// loop, then [`render`](ParticleField::render) when convenient.
    pub fn pump(&mut self) -> bool {
        if !self.scheduler.poll_tick() {
            return false;
        }
        self.field.step();
        self.frames += 1;
        true
    }

    /// Blocking loop: step, render, wait for the next refresh, repeat.
    ///
    /// `keep_going` is consulted after each rendered frame.
    pub fn run<Sf, F>(&mut self, surface: &mut Sf, mut keep_going: F)
    where
        Sf: Surface + ?Sized,
        F: FnMut(&ParticleField) -> ControlFlow<()>,
    {
        loop {
            if self.pump() {
                self.field.render(surface);
                if keep_going(&self.field).is_break() {
                    return;
                }
            } else {
                thread::sleep(self.scheduler.until_next());
            }
        }
    }

    /// Time the host may block before the next refresh is due.
    pub fn until_next(&self) -> Duration {
        self.scheduler.until_next()
    }

    /// Frames produced so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut ParticleField {
        &mut self.field
    }
}
