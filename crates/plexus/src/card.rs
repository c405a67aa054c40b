//! Tiltable cards drawn over the backdrop.

use plexus_core::{Bounds, TiltSettings};
use plexus_tilt::{TiltTarget, Transform};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Color, Style, Stylize},
    text::Line,
    widgets::{Block, BorderType, Clear, Paragraph, Wrap},
};

/// A bordered panel that leans toward the mouse.
#[derive(Debug, Clone)]
pub struct Card {
    title: &'static str,
    /// Resting position in terminal cells.
    area: Rect,
    /// Virtual pixels per column and per row.
    cell: (f64, f64),
    transform: Transform,
}

impl Card {
    pub fn new(title: &'static str, cell: (f64, f64), tilt: &TiltSettings) -> Self {
        Self {
            title,
            area: Rect::default(),
            cell,
            transform: Transform::neutral(tilt.perspective),
        }
    }

    pub fn area(&self) -> Rect {
        self.area
    }

    pub fn set_area(&mut self, area: Rect) {
        self.area = area;
    }

    /// Where the card is drawn this frame: lifted cards rise by whole rows.
    pub fn drawn_area(&self) -> Rect {
        if self.transform.translate_y >= 0.0 {
            return self.area;
        }
        let rows = (-self.transform.translate_y / self.cell.1).ceil() as u16;
        Rect {
            y: self.area.y.saturating_sub(rows),
            ..self.area
        }
    }

    /// Draw the card with `body` inside, in `accent` color.
    pub fn render(&self, frame: &mut Frame, body: Vec<Line<'static>>, accent: Color) {
        let area = self.drawn_area();
        if area.is_empty() {
            return;
        }

        let t = &self.transform;
        let tilted = !t.is_neutral();
        let lean = (t.rotate_x.abs() + t.rotate_y.abs()) / 4.0;
        let border = if tilted {
            Style::new().fg(brighten(accent, lean)).bold()
        } else {
            Style::new().fg(accent)
        };

        let mut block = Block::bordered()
            .border_type(if tilted {
                BorderType::Thick
            } else {
                BorderType::Rounded
            })
            .border_style(border)
            .title(Line::from(format!(" {} ", self.title)).bold());
        if tilted {
            block = block.title_bottom(
                Line::from(format!(" x {:+.1}° y {:+.1}° ", t.rotate_x, t.rotate_y))
                    .right_aligned()
                    .dark_gray(),
            );
        }

        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(body).wrap(Wrap { trim: true }).block(block),
            area,
        );
    }
}

impl TiltTarget for Card {
    fn bounds(&self) -> Bounds {
        let (cw, ch) = self.cell;
        Bounds::new(
            self.area.x as f64 * cw,
            self.area.y as f64 * ch,
            self.area.width as f64 * cw,
            self.area.height as f64 * ch,
        )
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }
}

/// Blend an accent toward white by `amount` (0..=1).
fn brighten(color: Color, amount: f64) -> Color {
    match color {
        Color::Rgb(r, g, b) => {
            let lift = |c: u8| (c as f64 + (255.0 - c as f64) * amount.clamp(0.0, 1.0)) as u8;
            Color::Rgb(lift(r), lift(g), lift(b))
        }
        other => other,
    }
}
