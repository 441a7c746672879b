use std::fmt;

use glam::DVec2;
use orrery::{
    render::{Drawable, Projection, Renderer},
    Simulation,
};

const PATH: char = '.';
const ANCHOR: char = '*';

/// Character grid renderer.
///
/// Bodies are drawn with the first letter of their name, the anchor with `*`, and paths with
/// dots. Distance labels are listed below the grid.
#[derive(Clone, Debug)]
pub struct Canvas {
    width: usize,
    height: usize,
    projection: Projection,
    cells: Vec<char>,
    labels: Vec<String>,
}

impl Canvas {
    pub fn new(width: usize, height: usize, scale: f64) -> Self {
        Self {
            width,
            height,
            projection: Projection::centered(width as f64, height as f64, scale),
            cells: vec![' '; width * height],
            labels: Vec::new(),
        }
    }

    /// Creates a [`Canvas`] whose scale fits every position and path of `simulation`.
    pub fn fitting(width: usize, height: usize, simulation: &Simulation) -> Self {
        let extent = simulation
            .bodies()
            .iter()
            .flat_map(|body| body.trajectory().iter().chain([body.position()]))
            .map(|p| p.abs().max_element())
            .fold(0.0, f64::max);

        let half = (width.min(height) as f64 / 2.0 - 1.0).max(1.0);
        let scale = if extent > 0.0 { half / extent } else { 1.0 };

        Self::new(width, height, scale)
    }

    fn plot(&mut self, position: DVec2, c: char) {
        let screen = self.projection.to_screen(position).round();

        if screen.x < 0.0 || screen.y < 0.0 {
            return;
        }

        let (x, y) = (screen.x as usize, screen.y as usize);
        if x < self.width && y < self.height {
            self.cells[y * self.width + x] = c;
        }
    }
}

impl Renderer for Canvas {
    fn begin_frame(&mut self) {
        self.cells.fill(' ');
        self.labels.clear();
    }

    fn draw(&mut self, drawable: &Drawable<'_>) {
        if drawable.path_visible() {
            for point in drawable.trajectory.iter() {
                self.plot(point, PATH);
            }
        }

        let glyph = if drawable.is_anchor {
            ANCHOR
        } else {
            drawable.name.chars().next().unwrap_or('?')
        };
        self.plot(drawable.position, glyph);

        if let Some(label) = drawable.label() {
            self.labels.push(format!("{}: {label}", drawable.name));
        }
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.width.max(1)) {
            writeln!(f, "{}", row.iter().collect::<String>().trim_end())?;
        }

        for label in &self.labels {
            writeln!(f, "{label}")?;
        }

        Ok(())
    }
}
