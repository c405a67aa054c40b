//! Particle field rendering onto a ratatui braille canvas.

use plexus_core::{Point, Rgba};
use plexus_field::{ParticleField, Surface};
use ratatui::{
    Frame,
    layout::Rect,
    symbols::Marker,
    widgets::canvas::{Canvas, Context, Line as CanvasLine, Points},
};
use tracing::debug;

/// [`Surface`] adapter over a canvas painting context.
///
/// The canvas y axis grows upward while the field's grows downward, so every
/// coordinate is flipped against the viewport height. Terminal cells have no
/// alpha channel; colors are flattened against the backdrop instead.
pub struct CanvasSurface<'a, 'b> {
    ctx: &'a mut Context<'b>,
    height: f64,
    background: Rgba,
}

impl<'a, 'b> CanvasSurface<'a, 'b> {
    pub fn new(ctx: &'a mut Context<'b>, height: f64, background: Rgba) -> Self {
        Self {
            ctx,
            height,
            background,
        }
    }

    fn flip(&self, p: Point) -> (f64, f64) {
        (p.x, self.height - p.y)
    }
}

impl Surface for CanvasSurface<'_, '_> {
    fn clear(&mut self) {
        // The canvas starts blank on every terminal draw.
    }

    fn fill_disc(&mut self, center: Point, _radius: f64, color: Rgba) {
        // A braille dot already spans several viewport units.
        let coords = [self.flip(center)];
        self.ctx.draw(&Points {
            coords: &coords,
            color: color.to_color(self.background),
        });
    }

    fn stroke_line(&mut self, from: Point, to: Point, color: Rgba, _width: f64) {
        let (x1, y1) = self.flip(from);
        let (x2, y2) = self.flip(to);
        self.ctx.draw(&CanvasLine::new(
            x1,
            y1,
            x2,
            y2,
            color.to_color(self.background),
        ));
    }
}

/// Paint the field across `area`, behind whatever is drawn afterwards.
pub fn render(frame: &mut Frame, area: Rect, field: &ParticleField) {
    if area.is_empty() || field.width() == 0 || field.height() == 0 {
        debug!(
            cols = area.width,
            rows = area.height,
            width = field.width(),
            height = field.height(),
            "skipping backdrop without a drawable viewport"
        );
        return;
    }

    let width = field.width() as f64;
    let height = field.height() as f64;
    let background = field.palette().background;

    let canvas = Canvas::default()
        .marker(Marker::Braille)
        .background_color(background.to_color(background))
        .x_bounds([0.0, width])
        .y_bounds([0.0, height])
        .paint(|ctx| {
            let mut surface = CanvasSurface::new(ctx, height, background);
            field.render(&mut surface);
        });

    frame.render_widget(canvas, area);
}
