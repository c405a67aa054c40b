//! Tilt geometry.

use std::fmt;

use plexus_core::{Bounds, Point, TiltSettings};

/// Perspective rotation plus vertical lift applied to a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Perspective distance in pixels.
    pub perspective: f64,
    /// Rotation about the horizontal axis, degrees.
    pub rotate_x: f64,
    /// Rotation about the vertical axis, degrees.
    pub rotate_y: f64,
    /// Vertical offset in pixels, negative is up.
    pub translate_y: f64,
}

impl Transform {
    /// Flat, unlifted resting state.
    pub const fn neutral(perspective: f64) -> Self {
        Self {
            perspective,
            rotate_x: 0.0,
            rotate_y: 0.0,
            translate_y: 0.0,
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.rotate_x == 0.0 && self.rotate_y == 0.0 && self.translate_y == 0.0
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::neutral(TiltSettings::default().perspective)
    }
}

/// CSS transform syntax, e.g.
/// `perspective(1000px) rotateX(-1deg) rotateY(2deg) translateY(-5px)`.
///
/// A precision (`{:.2}`) applies to every number.
impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Transform {
            perspective,
            rotate_x,
            rotate_y,
            translate_y,
        } = *self;
        match f.precision() {
            Some(p) => write!(
                f,
                "perspective({perspective:.p$}px) rotateX({rotate_x:.p$}deg) \
                 rotateY({rotate_y:.p$}deg) translateY({translate_y:.p$}px)"
            ),
            None => write!(
                f,
                "perspective({perspective}px) rotateX({rotate_x}deg) \
                 rotateY({rotate_y}deg) translateY({translate_y}px)"
            ),
        }
    }
}

/// Compute the tilt for a pointer over an element occupying `bounds`.
///
/// The pointer's offset from the center, as a fraction of the half extent,
/// scales `max_angle`: vertical offset tips the card about X (top edge away
/// from the viewer when the pointer is above center), horizontal offset turns
/// it about Y. Inside the box both angles stay within `±max_angle`.
///
/// A box without area has no center to tilt around and yields the neutral
/// transform.
pub fn tilt_for(pointer: Point, bounds: Bounds, settings: &TiltSettings) -> Transform {
    if bounds.is_degenerate() {
        return Transform::neutral(settings.perspective);
    }

    let x = pointer.x - bounds.left;
    let y = pointer.y - bounds.top;
    let center_x = bounds.width / 2.0;
    let center_y = bounds.height / 2.0;

    // `+ 0.0` folds -0.0 into 0.0 so a centered pointer prints as `0deg`.
    let rotate_x = ((y - center_y) / center_y) * -settings.max_angle + 0.0;
    let rotate_y = ((x - center_x) / center_x) * settings.max_angle + 0.0;

    Transform {
        perspective: settings.perspective,
        rotate_x,
        rotate_y,
        translate_y: -settings.lift,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> Bounds {
        Bounds::new(100.0, 50.0, 300.0, 200.0)
    }

    #[test]
    fn test_center_is_flat() {
        let t = tilt_for(Point::new(250.0, 150.0), card(), &TiltSettings::default());
        assert_eq!(t.rotate_x, 0.0);
        assert_eq!(t.rotate_y, 0.0);
        assert_eq!(t.translate_y, -5.0);
        assert!(!t.is_neutral());
    }

    #[test]
    fn test_corners_hit_max_angle() {
        let s = TiltSettings::default();
        let top_left = tilt_for(Point::new(100.0, 50.0), card(), &s);
        assert_eq!((top_left.rotate_x, top_left.rotate_y), (2.0, -2.0));

        let bottom_right = tilt_for(Point::new(400.0, 250.0), card(), &s);
        assert_eq!((bottom_right.rotate_x, bottom_right.rotate_y), (-2.0, 2.0));
    }

    #[test]
    fn test_angles_bounded_inside_box() {
        let s = TiltSettings::default();
        let b = card();
        for i in 0..=30 {
            for j in 0..=20 {
                let p = Point::new(b.left + i as f64 * 10.0, b.top + j as f64 * 10.0);
                let t = tilt_for(p, b, &s);
                assert!((-2.0..=2.0).contains(&t.rotate_x), "{t:?}");
                assert!((-2.0..=2.0).contains(&t.rotate_y), "{t:?}");
            }
        }
    }

    #[test]
    fn test_degenerate_box_is_neutral() {
        let s = TiltSettings::default();
        let hidden = Bounds::new(10.0, 10.0, 0.0, 0.0);
        let t = tilt_for(Point::new(10.0, 10.0), hidden, &s);
        assert!(t.is_neutral());
        assert!(!t.rotate_x.is_nan());
    }

    #[test]
    fn test_display_css() {
        let t = tilt_for(Point::new(100.0, 150.0), card(), &TiltSettings::default());
        assert_eq!(
            t.to_string(),
            "perspective(1000px) rotateX(0deg) rotateY(-2deg) translateY(-5px)"
        );
        assert_eq!(
            format!("{t:.1}"),
            "perspective(1000.0px) rotateX(0.0deg) rotateY(-2.0deg) translateY(-5.0px)"
        );
        assert_eq!(
            Transform::default().to_string(),
            "perspective(1000px) rotateX(0deg) rotateY(0deg) translateY(0px)"
        );
    }
}
