//! # Orrery
//!
//! Orrery is a small gravitational N-body simulator for star systems. It advances a set of
//! bodies under mutual Newtonian gravitation with a semi-implicit Euler step, records the path
//! of every body and tracks each body's distance to a distinguished anchor (the star).
//!
//! Drawing is left to the caller: a [`Simulation`] hands per-body [`Drawable`](render::Drawable)
//! snapshots to any type implementing [`Renderer`](render::Renderer).
//!
//! # Using Orrery
//!
//! ## Creating bodies
//!
//! A [`Body`](body::Body) is validated on construction: its mass and radius must be finite and
//! strictly positive, and its position and velocity finite.
//!
//! ```
//! # use orrery::prelude::*;
//! # use glam::DVec2;
//! let sun = Body::new("Sun", DVec2::ZERO, 1.98892e30, 30.0, Color::YELLOW)?.anchor();
//! let earth = Body::new("Earth", DVec2::new(-AU, 0.0), 5.9742e24, 16.0, Color::BLUE)?
//!     .with_velocity(DVec2::new(0.0, 29.783e3))?;
//! # Ok::<(), orrery::Error>(())
//! ```
//!
//! ## Setting up the simulation
//!
//! Bodies are added to a [`Simulation`] along with its [`Parameters`](simulation::Parameters).
//! Their index in the simulation is their identity, and at most one of them can be the anchor.
//!
//! ```
//! # use orrery::prelude::*;
//! # use glam::DVec2;
//! # let sun = Body::new("Sun", DVec2::ZERO, 1.98892e30, 30.0, Color::YELLOW)?.anchor();
//! let parameters = Parameters {
//!     history: HistoryLimit::Bounded(365),
//!     ..Default::default()
//! };
//!
//! let mut simulation = Simulation::new(parameters);
//! simulation.add_body(sun)?;
//! # Ok::<(), orrery::Error>(())
//! ```
//!
//! Scenarios can also be loaded from YAML with [`ScenarioConfig`](config::ScenarioConfig), and
//! [`config::inner_solar_system`] describes the sun and the four inner planets.
//!
//! ## Ticking and drawing
//!
//! Each [`tick`](Simulation::tick) computes every net force from the positions at the start of
//! the tick before moving any body. A tick that would produce an infinite or NaN state fails
//! without modifying the simulation.
//!
//! ```
//! # use orrery::prelude::*;
//! struct Labels(Vec<String>);
//!
//! impl Renderer for Labels {
//!     fn draw(&mut self, drawable: &Drawable<'_>) {
//!         self.0.extend(drawable.label());
//!     }
//! }
//!
//! let mut simulation = config::inner_solar_system().build()?;
//! simulation.run(10)?;
//!
//! let mut labels = Labels(Vec::new());
//! simulation.render(&mut labels);
//! assert_eq!(labels.0.len(), 4);
//! # Ok::<(), orrery::Error>(())
//! ```

#![warn(missing_docs)]

/// Point masses and their integration step.
pub mod body;

/// Scenario files and presets.
pub mod config;

/// Physical constants.
pub mod constants;

/// Error type of the crate.
pub mod error;

/// Pairwise interactions and the algorithms summing them.
pub mod gravity;

/// Contract between a simulation and whatever draws it.
pub mod render;

/// Tick driver.
pub mod simulation;

/// Position history of a body.
pub mod trajectory;

pub use error::{Error, Result};
pub use simulation::Simulation;

/// Everything needed to use the crate.
pub mod prelude {
    pub use crate::body::Body;
    pub use crate::config::{self, ScenarioConfig};
    pub use crate::constants::{AU, DAY, G};
    pub use crate::error::{Error, Result};
    pub use crate::gravity::{Between, BruteForce, Interaction, NewtonianForce};
    pub use crate::render::{Color, Drawable, Projection, Renderer};
    pub use crate::simulation::{
        BodyId, Parameters, Simulation, SimulationState, SingularityPolicy, UpdateOrder,
    };
    pub use crate::trajectory::{HistoryLimit, Trajectory};
}
