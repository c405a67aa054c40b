use std::io;

use color_eyre::eyre::WrapErr;
use crossterm::{
    event::{
        self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
        Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
};
use plexus_config::Config;
use plexus_core::{Point, Theme};
use plexus_field::{Animation, FrameClock, ParticleField};
use plexus_tilt::{TiltController, TiltTarget};
use ratatui::{
    DefaultTerminal, Frame,
    layout::{Constraint, Layout, Rect},
    style::{Color, Stylize},
    text::Line,
};
use tracing::{info, warn};

use crate::card::Card;

mod backdrop;
mod card;
mod telemetry;

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    telemetry::init();

    let config = Config::load().wrap_err("failed to load configuration")?;
    let app = App::new(config);
    let pointer = app.wants_pointer();

    let terminal = ratatui::init();
    let result = set_pointer_capture(pointer).and_then(|()| app.run(terminal));
    if pointer {
        if let Err(err) = execute!(io::stdout(), DisableMouseCapture, DisableFocusChange) {
            warn!(%err, "failed to disable mouse capture");
        }
    }
    ratatui::restore();
    result
}

fn set_pointer_capture(enabled: bool) -> color_eyre::Result<()> {
    if enabled {
        execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
            .wrap_err("failed to enable mouse capture")?;
    }
    Ok(())
}

/// The main application which holds the state and logic of the application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    running: bool,
    config: Config,
    /// Current color theme.
    theme: Theme,
    /// Particle backdrop and its refresh clock.
    animation: Animation<FrameClock>,
    /// The two cards and their tilt handling.
    tilt: TiltController<Card>,
    /// Terminal size the field and cards were last laid out for.
    viewport: (u16, u16),
}

impl App {
    /// Construct a new instance of [`App`].
    pub fn new(config: Config) -> Self {
        let theme = config.display.theme;
        let field = ParticleField::new(config.field.clone(), theme.palette());
        let animation = Animation::new(field, FrameClock::from_fps(config.display.fps));

        let cell = (config.display.cell_width, config.display.cell_height);
        let cards = vec![
            Card::new("plexus", cell, &config.tilt),
            Card::new("tilt", cell, &config.tilt),
        ];
        let tilt = TiltController::new(cards, config.tilt.clone());

        Self {
            running: false,
            config,
            theme,
            animation,
            tilt,
            viewport: (0, 0),
        }
    }

    /// Whether mouse events need to be captured at all.
    pub fn wants_pointer(&self) -> bool {
        self.tilt.is_active()
    }

    /// Run the application's main loop.
    pub fn run(mut self, mut terminal: DefaultTerminal) -> color_eyre::Result<()> {
        let size = terminal.size()?;
        self.resize(size.width, size.height);
        info!(
            width = size.width,
            height = size.height,
            theme = self.theme.name(),
            "starting"
        );

        self.running = true;
        while self.running {
            self.animation.pump();
            terminal.draw(|frame| self.render(frame))?;
            self.handle_crossterm_events()?;
        }
        Ok(())
    }

    /// Lay out cards and regenerate the field for a terminal of the given size.
    fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport = (cols, rows);

        let display = &self.config.display;
        let width = (cols as f64 * display.cell_width) as u32;
        let height = (rows as f64 * display.cell_height) as u32;
        self.animation.field_mut().resize(width, height);

        let [left, right] = card_areas(Rect::new(0, 0, cols, rows));
        let cards = self.tilt.targets_mut();
        cards[0].set_area(left);
        cards[1].set_area(right);
        self.tilt.leave_all();
    }

    /// Renders the user interface.
    fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();
        if (area.width, area.height) != self.viewport {
            self.resize(area.width, area.height);
        }

        backdrop::render(frame, area, self.animation.field());

        let palette = self.theme.palette();
        let accent = palette.secondary.to_color(palette.background);
        let cards = self.tilt.targets();
        cards[0].render(frame, self.stats_lines(accent), accent);
        cards[1].render(frame, self.tilt_lines(&cards[1], accent), accent);

        let [_, help_area] =
            Layout::vertical([Constraint::Fill(1), Constraint::Length(1)]).areas(area);
        let help = Line::from(vec![
            "q".bold().fg(accent),
            " quit  ".dark_gray(),
            "c".bold().fg(accent),
            " cycle theme  ".dark_gray(),
            "r".bold().fg(accent),
            " regenerate".dark_gray(),
        ])
        .centered();
        frame.render_widget(help, help_area);
    }

    fn stats_lines(&self, accent: Color) -> Vec<Line<'static>> {
        let field = self.animation.field();
        let stat = |name: &str, value: String| {
            Line::from(vec![format!("{name:<10}").dark_gray(), value.fg(accent)])
        };
        vec![
            stat("particles", field.len().to_string()),
            stat("links", field.connections().count().to_string()),
            stat(
                "viewport",
                format!("{}x{}", field.width(), field.height()),
            ),
            stat("frames", self.animation.frames().to_string()),
            stat("theme", self.theme.name().to_string()),
        ]
    }

    fn tilt_lines(&self, card: &Card, accent: Color) -> Vec<Line<'static>> {
        vec![
            Line::from("hover a card to tilt it".dark_gray()),
            Line::from(""),
            Line::from(format!("{:.2}", card.transform()).fg(accent)),
        ]
    }

    /// Reads the crossterm events and updates the state of [`App`].
    /// Waits no longer than the next animation frame.
    fn handle_crossterm_events(&mut self) -> color_eyre::Result<()> {
        if event::poll(self.animation.until_next())? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.on_key_event(key),
                Event::Mouse(mouse) => self.on_mouse_event(mouse),
                Event::Resize(cols, rows) => self.resize(cols, rows),
                Event::FocusLost => self.tilt.leave_all(),
                _ => {}
            }
        }
        Ok(())
    }

    /// Handles the key events and updates the state of [`App`].
    fn on_key_event(&mut self, key: KeyEvent) {
        match (key.modifiers, key.code) {
            (_, KeyCode::Esc | KeyCode::Char('q'))
            | (KeyModifiers::CONTROL, KeyCode::Char('c') | KeyCode::Char('C')) => self.quit(),
            (_, KeyCode::Char('c')) => self.cycle_theme(),
            (_, KeyCode::Char('r')) => self.regenerate(),
            _ => {}
        }
    }

    fn on_mouse_event(&mut self, mouse: MouseEvent) {
        if matches!(mouse.kind, MouseEventKind::Moved | MouseEventKind::Drag(_)) {
            self.on_pointer(mouse.column, mouse.row);
        }
    }

    /// Forward a pointer over cell (`col`, `row`) to the tilt controller.
    fn on_pointer(&mut self, col: u16, row: u16) {
        let display = &self.config.display;
        let pointer = Point::new(
            (col as f64 + 0.5) * display.cell_width,
            (row as f64 + 0.5) * display.cell_height,
        );
        self.tilt.pointer_moved(pointer);
    }

    /// Cycle through available color themes.
    fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.animation.field_mut().set_palette(self.theme.palette());
    }

    /// Throw the particles away and spawn a fresh batch.
    fn regenerate(&mut self) {
        let (cols, rows) = self.viewport;
        self.resize(cols, rows);
    }

    /// Set running to false to quit the application.
    fn quit(&mut self) {
        self.running = false;
    }
}

/// Resting areas of the two cards: side by side, centered above the help line.
fn card_areas(area: Rect) -> [Rect; 2] {
    let [_, row, _, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(9),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);
    let [_, left, _, right, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(34),
        Constraint::Length(4),
        Constraint::Length(34),
        Constraint::Fill(1),
    ])
    .areas(row);
    [left, right]
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;

    fn app() -> App {
        let mut config = Config::default();
        config.field.seed = Some(1);
        App::new(config)
    }

    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_first_render_sizes_field() {
        let mut app = app();
        let screen = draw(&mut app, 100, 30);
        let field = app.animation.field();
        assert_eq!(field.len(), 45);
        assert_eq!((field.width(), field.height()), (800, 480));
        assert!(screen.contains("plexus"));
        assert!(screen.contains("tilt"));
        assert!(screen.contains("quit"));
    }

    #[test]
    fn test_resize_event_regenerates() {
        let mut app = app();
        app.resize(100, 30);
        let before = app.animation.field().particles().to_vec();
        app.resize(120, 40);
        let field = app.animation.field();
        assert_eq!(field.len(), 45);
        assert_eq!(field.width(), 960);
        assert_ne!(before, field.particles());
    }

    #[test]
    fn test_pointer_tilts_hovered_card() {
        let mut app = app();
        app.resize(100, 30);
        let area = app.tilt.targets()[0].area();
        app.on_pointer(area.x + 1, area.y + 1);
        assert!(!app.tilt.targets()[0].transform().is_neutral());
        assert!(app.tilt.targets()[1].transform().is_neutral());

        app.on_pointer(0, 0);
        assert!(app.tilt.targets()[0].transform().is_neutral());
    }

    #[test]
    fn test_tilted_card_renders_angles() {
        let mut app = app();
        app.resize(100, 30);
        let area = app.tilt.targets()[1].area();
        app.on_pointer(area.x + 1, area.y + 1);
        let screen = draw(&mut app, 100, 30);
        assert!(screen.contains("rotateX"));
        assert!(screen.contains('°'));
    }

    #[test]
    fn test_cycle_theme_keeps_particles() {
        let mut app = app();
        app.resize(100, 30);
        let before = app.animation.field().particles().to_vec();
        app.on_key_event(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert_eq!(app.theme, Theme::Ocean);
        assert_eq!(app.animation.field().palette(), &Theme::Ocean.palette());
        assert_eq!(before, app.animation.field().particles());
    }

    #[test]
    fn test_regenerate_keeps_count() {
        let mut app = app();
        app.resize(100, 30);
        app.on_key_event(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::NONE));
        assert_eq!(app.animation.field().len(), 45);
        assert_eq!(app.viewport, (100, 30));
    }

    #[test]
    fn test_quit_keys() {
        for key in [
            KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
        ] {
            let mut app = app();
            app.running = true;
            app.on_key_event(key);
            assert!(!app.running);
        }
    }

    #[test]
    fn test_tiny_terminal_does_not_panic() {
        let mut app = app();
        draw(&mut app, 3, 2);
        assert_eq!(app.animation.field().len(), 45);
    }
}
