use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{constants::AU, trajectory::Trajectory};

/// Minimum number of trajectory points before a path is worth drawing.
pub const MIN_PATH_POINTS: usize = 3;

/// Default display scale: one astronomical unit spans 250 screen units.
pub const DEFAULT_SCALE: f64 = 250.0 / AU;

/// Opaque RGB colour attached to a body and passed through to renderers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Color {
    #[allow(missing_docs)]
    pub r: u8,
    #[allow(missing_docs)]
    pub g: u8,
    #[allow(missing_docs)]
    pub b: u8,
}

impl Color {
    #[allow(missing_docs)]
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    #[allow(missing_docs)]
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    #[allow(missing_docs)]
    pub const BLUE: Self = Self::rgb(100, 149, 237);
    #[allow(missing_docs)]
    pub const RED: Self = Self::rgb(188, 39, 50);
    #[allow(missing_docs)]
    pub const DARK_GREY: Self = Self::rgb(80, 78, 81);

    /// Creates a new [`Color`] from its red, green and blue components.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::rgb(r, g, b)
    }
}

impl From<Color> for [u8; 3] {
    #[inline]
    fn from(color: Color) -> Self {
        [color.r, color.g, color.b]
    }
}

/// Affine transform from simulation coordinates (meters) to screen coordinates.
///
/// `screen = position * scale + origin`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Screen units per meter.
    pub scale: f64,
    /// Screen position of the simulation origin.
    pub origin: DVec2,
}

impl Projection {
    /// Creates a new [`Projection`].
    #[inline]
    pub const fn new(scale: f64, origin: DVec2) -> Self {
        Self { scale, origin }
    }

    /// Creates a [`Projection`] placing the simulation origin at the centre of a `width` by
    /// `height` screen.
    #[inline]
    pub fn centered(width: f64, height: f64, scale: f64) -> Self {
        Self::new(scale, DVec2::new(width / 2.0, height / 2.0))
    }

    /// Projects a simulation position to screen space.
    #[inline]
    pub fn to_screen(&self, position: DVec2) -> DVec2 {
        position * self.scale + self.origin
    }
}

/// Per-tick snapshot of a body, everything a [`Renderer`] needs to draw it.
#[derive(Clone, Copy, Debug)]
pub struct Drawable<'a> {
    /// Display name of the body.
    pub name: &'a str,
    /// Position in simulation coordinates.
    pub position: DVec2,
    /// Rendering radius.
    pub radius: f64,
    /// Rendering colour.
    pub color: Color,
    /// Whether the body is the anchor.
    pub is_anchor: bool,
    /// Recorded positions, oldest first.
    pub trajectory: &'a Trajectory,
    /// Last computed distance to the anchor, in meters.
    pub distance_to_anchor: Option<f64>,
}

impl Drawable<'_> {
    /// Returns `true` if the trajectory has enough points to be drawn as a path.
    #[inline]
    pub fn path_visible(&self) -> bool {
        self.trajectory.len() >= MIN_PATH_POINTS
    }

    /// Returns the distance label of a non-anchor body, in kilometers with one decimal.
    pub fn label(&self) -> Option<String> {
        if self.is_anchor {
            return None;
        }

        self.distance_to_anchor
            .map(|distance| format!("{:.1} km", distance / 1000.0))
    }
}

/// Collaborator that draws the snapshots produced by a [`Simulation`](crate::Simulation).
///
/// Implementors own every display resource (window, font, screen size...). The simulation only
/// hands them [`Drawable`]s.
pub trait Renderer {
    /// Called once before the drawables of a frame.
    #[inline]
    fn begin_frame(&mut self) {}

    /// Draws a single body.
    fn draw(&mut self, drawable: &Drawable<'_>);

    /// Called once after the drawables of a frame.
    #[inline]
    fn end_frame(&mut self) {}
}

impl<R: Renderer + ?Sized> Renderer for &mut R {
    #[inline]
    fn begin_frame(&mut self) {
        (**self).begin_frame()
    }

    #[inline]
    fn draw(&mut self, drawable: &Drawable<'_>) {
        (**self).draw(drawable)
    }

    #[inline]
    fn end_frame(&mut self) {
        (**self).end_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory::HistoryLimit;

    fn drawable(trajectory: &Trajectory, is_anchor: bool, distance: Option<f64>) -> Drawable<'_> {
        Drawable {
            name: "Earth",
            position: DVec2::ZERO,
            radius: 16.0,
            color: Color::BLUE,
            is_anchor,
            trajectory,
            distance_to_anchor: distance,
        }
    }

    #[test]
    fn centered_projection() {
        let projection = Projection::centered(800.0, 800.0, DEFAULT_SCALE);

        assert_eq!(projection.to_screen(DVec2::ZERO), DVec2::new(400.0, 400.0));
        assert!(projection
            .to_screen(DVec2::new(-AU, AU))
            .abs_diff_eq(DVec2::new(150.0, 650.0), 1e-9));
    }

    #[test]
    fn path_needs_three_points() {
        let mut trajectory = Trajectory::new(HistoryLimit::Unbounded);
        trajectory.push(DVec2::X);
        trajectory.push(DVec2::Y);
        assert!(!drawable(&trajectory, false, None).path_visible());

        trajectory.push(DVec2::ONE);
        assert!(drawable(&trajectory, false, None).path_visible());
    }

    #[test]
    fn label_in_kilometers() {
        let trajectory = Trajectory::default();

        let earth = drawable(&trajectory, false, Some(AU));
        assert_eq!(earth.label().as_deref(), Some("149600000.0 km"));

        let close = drawable(&trajectory, false, Some(1_234_567.0));
        assert_eq!(close.label().as_deref(), Some("1234.6 km"));
    }

    #[test]
    fn no_label_for_anchor_or_unknown_distance() {
        let trajectory = Trajectory::default();

        assert_eq!(drawable(&trajectory, true, Some(1.0)).label(), None);
        assert_eq!(drawable(&trajectory, false, None).label(), None);
    }

    #[test]
    fn color_array_conversion() {
        assert_eq!(Color::from([255, 255, 0]), Color::YELLOW);
        assert_eq!(<[u8; 3]>::from(Color::RED), [188, 39, 50]);
    }
}
