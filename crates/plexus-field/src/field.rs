//! Particle field state, simulation and rendering.

use plexus_core::{FieldSettings, Palette};
use rand::{SeedableRng, rngs::StdRng};
use tracing::debug;

use crate::particle::Particle;
use crate::surface::Surface;

/// A line between two particles that are close enough to connect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    /// Index of the first particle, always below `b`.
    pub a: usize,
    pub b: usize,
    /// Stroke opacity, fading linearly to zero at the connection distance.
    pub opacity: f32,
}

/// Full-viewport particle simulation.
#[derive(Debug)]
pub struct ParticleField {
    settings: FieldSettings,
    palette: Palette,
    /// Viewport width in viewport units.
    width: u32,
    /// Viewport height in viewport units.
    height: u32,
    particles: Vec<Particle>,
    rng: StdRng,
}

impl ParticleField {
    /// Create an empty field. Call [`resize`](Self::resize) before the first
    /// frame to populate it.
    ///
    /// Uses `settings.seed` when present, entropy otherwise.
    pub fn new(settings: FieldSettings, palette: Palette) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(settings, palette, rng)
    }

    /// Create an empty field with a fixed seed.
    pub fn with_seed(settings: FieldSettings, palette: Palette, seed: u64) -> Self {
        Self::with_rng(settings, palette, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: FieldSettings, palette: Palette, rng: StdRng) -> Self {
        Self {
            settings,
            palette,
            width: 0,
            height: 0,
            particles: Vec::new(),
            rng,
        }
    }

    /// Adopt new viewport dimensions and regenerate every particle.
    ///
    /// Nothing carries over from the previous batch.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;

        let (w, h) = (width as f64, height as f64);
        let count = self.settings.particle_count;
        let rng = &mut self.rng;
        let settings = &self.settings;
        self.particles = (0..count)
            .map(|_| Particle::random(&mut *rng, w, h, settings))
            .collect();

        debug!(width, height, count, "regenerated particles");
    }

    /// Advance every particle by one frame.
    pub fn step(&mut self) {
        let (w, h) = (self.width as f64, self.height as f64);
        for particle in &mut self.particles {
            particle.update(w, h);
        }
    }

    /// Every pair of particles close enough to be linked, with its opacity.
    pub fn connections(&self) -> impl Iterator<Item = Connection> + '_ {
        let threshold = self.settings.connection_distance;
        let max_opacity = self.settings.line_opacity;
        let particles = &self.particles;

        (0..particles.len()).flat_map(move |a| {
            ((a + 1)..particles.len()).filter_map(move |b| {
                let dist = particles[a].position().distance(particles[b].position());
                (dist < threshold).then(|| Connection {
                    a,
                    b,
                    opacity: connection_opacity(dist, threshold, max_opacity),
                })
            })
        })
    }

    /// Paint the current state: clear, then discs, then connection lines.
    pub fn render<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear();

        for p in &self.particles {
            surface.fill_disc(p.position(), p.radius, self.palette.color(p.color));
        }

        let line = self.palette.line;
        let width = self.settings.line_width;
        for c in self.connections() {
            surface.stroke_line(
                self.particles[c.a].position(),
                self.particles[c.b].position(),
                line.with_alpha(c.opacity),
                width,
            );
        }
    }

    /// One animation frame: [`step`](Self::step) then [`render`](Self::render).
    pub fn frame<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.step();
        self.render(surface);
    }

    /// Switch colors; existing particles keep their color tags.
    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn settings(&self) -> &FieldSettings {
        &self.settings
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Mutable access to the live particles, e.g. to place them by hand.
    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}

/// Linear fade from `max_opacity` at distance zero to nothing at `threshold`.
fn connection_opacity(dist: f64, threshold: f64, max_opacity: f32) -> f32 {
    ((1.0 - dist / threshold) as f32) * max_opacity
}

#[cfg(test)]
mod tests {
    use plexus_core::{ColorTag, Theme};

    use super::*;
    use crate::surface::{DrawCommand, RecordingSurface};

    fn field() -> ParticleField {
        ParticleField::with_seed(FieldSettings::default(), Theme::Slate.palette(), 9)
    }

    /// A field holding exactly two still particles `dist` apart.
    fn pair(dist: f64) -> ParticleField {
        let mut f = field();
        f.resize(800, 600);
        f.particles.truncate(2);
        for (p, x) in f.particles.iter_mut().zip([100.0, 100.0 + dist]) {
            p.x = x;
            p.y = 300.0;
            p.vx = 0.0;
            p.vy = 0.0;
        }
        f
    }

    #[test]
    fn test_new_field_is_empty() {
        let f = field();
        assert!(f.is_empty());
        assert_eq!((f.width(), f.height()), (0, 0));
    }

    #[test]
    fn test_resize_regenerates_configured_count() {
        let mut f = field();
        f.resize(800, 600);
        assert_eq!(f.len(), 45);

        f.particles.truncate(3);
        f.resize(1024, 768);
        assert_eq!(f.len(), 45);
        assert_eq!((f.width(), f.height()), (1024, 768));
    }

    #[test]
    fn test_resize_replaces_particles() {
        let mut f = field();
        f.resize(800, 600);
        let before = f.particles().to_vec();
        f.resize(800, 600);
        assert_ne!(before, f.particles());
    }

    #[test]
    fn test_seeded_fields_match() {
        let mut a = field();
        let mut b = field();
        a.resize(640, 480);
        b.resize(640, 480);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_seed_from_settings() {
        let settings = FieldSettings {
            seed: Some(5),
            ..FieldSettings::default()
        };
        let mut a = ParticleField::new(settings.clone(), Palette::default());
        let mut b = ParticleField::new(settings, Palette::default());
        a.resize(100, 100);
        b.resize(100, 100);
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_step_does_not_change_count() {
        let mut f = field();
        f.resize(300, 200);
        for _ in 0..1000 {
            f.step();
        }
        assert_eq!(f.len(), 45);
    }

    #[test]
    fn test_connection_at_threshold_is_not_drawn() {
        assert_eq!(pair(160.0).connections().count(), 0);
    }

    #[test]
    fn test_connection_just_inside_threshold() {
        let conns: Vec<_> = pair(159.99).connections().collect();
        assert_eq!(conns.len(), 1);
        assert!(conns[0].opacity > 0.0);
        assert_eq!((conns[0].a, conns[0].b), (0, 1));
    }

    #[test]
    fn test_coincident_particles_have_full_line_opacity() {
        let conns: Vec<_> = pair(0.0).connections().collect();
        assert_eq!(conns.len(), 1);
        assert_eq!(conns[0].opacity, 0.3);
    }

    #[test]
    fn test_opacity_fades_linearly() {
        assert_eq!(connection_opacity(80.0, 160.0, 0.3), 0.15);
        assert_eq!(connection_opacity(0.0, 160.0, 0.3), 0.3);
    }

    #[test]
    fn test_connections_cover_each_pair_once() {
        let mut f = field();
        f.resize(50, 50);
        // Every pair fits within 160 units in a 50x50 viewport.
        let n = f.len();
        assert_eq!(f.connections().count(), n * (n - 1) / 2);
        assert!(f.connections().all(|c| c.a < c.b));
    }

    #[test]
    fn test_render_order() {
        let mut f = pair(10.0);
        f.particles[0].color = ColorTag::Primary;
        f.particles[1].color = ColorTag::Secondary;

        let mut surface = RecordingSurface::new();
        f.render(&mut surface);

        let palette = Theme::Slate.palette();
        let cmds = surface.commands();
        assert_eq!(cmds.len(), 4);
        assert_eq!(surface.discs().count(), 2);
        assert_eq!(surface.lines().count(), 1);
        assert_eq!(cmds[0], DrawCommand::Clear);
        assert!(matches!(cmds[1], DrawCommand::Disc { color, .. } if color == palette.primary));
        assert!(matches!(cmds[2], DrawCommand::Disc { color, .. } if color == palette.secondary));
        match &cmds[3] {
            DrawCommand::Line {
                from,
                to,
                color,
                width,
            } => {
                assert_eq!((from.x, to.x), (100.0, 110.0));
                assert_eq!((color.r, color.g, color.b), (148, 163, 184));
                assert!(color.a > 0.0 && color.a < 0.3);
                assert_eq!(*width, 0.5);
            }
            other => panic!("expected a line, got {other:?}"),
        }
    }

    #[test]
    fn test_chain_links_only_neighbours() {
        let mut f = field();
        f.resize(800, 600);
        f.particles.truncate(3);
        for (p, x) in f.particles_mut().iter_mut().zip([100.0, 250.0, 400.0]) {
            p.x = x;
            p.y = 300.0;
        }

        let pairs: Vec<_> = f.connections().map(|c| (c.a, c.b)).collect();
        assert_eq!(pairs, [(0, 1), (1, 2)]);

        let mut surface = RecordingSurface::new();
        f.render(&mut surface);
        assert_eq!(surface.lines().count(), 2);
        assert_eq!(surface.discs().count(), 3);
    }

    #[test]
    fn test_frame_steps_before_drawing() {
        let mut f = pair(10.0);
        f.particles[0].vx = 1.0;
        let mut surface = RecordingSurface::new();
        f.frame(&mut surface);

        let first_disc = surface.discs().next().cloned();
        match first_disc {
            Some(DrawCommand::Disc { center, .. }) => assert_eq!(center.x, 101.0),
            other => panic!("expected a disc, got {other:?}"),
        }
    }

    #[test]
    fn test_set_palette_keeps_particles() {
        let mut f = field();
        f.resize(400, 300);
        let before = f.particles().to_vec();
        f.set_palette(Theme::Ember.palette());
        assert_eq!(before, f.particles());

        let mut surface = RecordingSurface::new();
        f.render(&mut surface);
        let ember = Theme::Ember.palette();
        assert!(surface.discs().all(|d| matches!(
            d,
            DrawCommand::Disc { color, .. } if *color == ember.primary || *color == ember.secondary
        )));
    }

    #[test]
    fn test_render_empty_field_only_clears() {
        let f = field();
        let mut surface = RecordingSurface::new();
        f.render(&mut surface);
        assert_eq!(surface.commands(), &[DrawCommand::Clear]);
    }
}
