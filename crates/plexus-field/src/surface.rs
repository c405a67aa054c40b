//! Drawing surface abstraction.

use plexus_core::{Point, Rgba};

/// Something a [`ParticleField`](crate::ParticleField) can paint on.
///
/// Coordinates are viewport units with the origin at the top-left corner.
pub trait Surface {
    /// Erase everything drawn so far.
    fn clear(&mut self);

    /// Paint a filled disc.
    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba);

    /// Stroke a straight line segment.
    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64);
}

/// A single recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    Disc {
        center: Point,
        radius: f64,
        color: Rgba,
    },
    Line {
        from: Point,
        to: Point,
        color: Rgba,
        width: f64,
    },
}

/// Surface that records operations instead of rasterizing them.
///
/// `clear` drops the commands recorded so far, so after a render the
/// recording holds exactly the last frame.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Operations since the last clear, starting with the clear itself.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// How many times the surface was cleared, i.e. frames rendered.
    pub fn clears(&self) -> usize {
        self.clears
    }

    pub fn discs(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Disc { .. }))
    }

    pub fn lines(&self) -> impl Iterator<Item = &DrawCommand> {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Line { .. }))
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear);
        self.clears += 1;
    }

    fn fill_disc(&mut self, center: Point, radius: f64, color: Rgba) {
        self.commands.push(DrawCommand::Disc {
            center,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, width: f64) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }
}
