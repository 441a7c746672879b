use glam::DVec2;

use crate::{
    error::{Error, Result},
    render::Color,
    trajectory::{HistoryLimit, Trajectory},
};

/// A point mass with rendering attributes and a recorded trajectory.
///
/// # Example
///
/// ```
/// use orrery::prelude::*;
/// use glam::DVec2;
///
/// let earth = Body::new("Earth", DVec2::new(-AU, 0.0), 5.9742e24, 16.0, Color::BLUE)?
///     .with_velocity(DVec2::new(0.0, 29.783e3))?;
///
/// assert_eq!(earth.mass(), 5.9742e24);
/// assert!(earth.trajectory().is_empty());
/// # Ok::<(), orrery::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Body {
    name: String,
    position: DVec2,
    velocity: DVec2,
    mass: f64,
    radius: f64,
    color: Color,
    is_anchor: bool,
    distance_to_anchor: Option<f64>,
    trajectory: Trajectory,
    own_history: bool,
}

impl Body {
    /// Creates a new [`Body`] at rest.
    ///
    /// Fails if `mass` or `radius` is not finite and strictly positive, or if `position` is not
    /// finite.
    pub fn new(
        name: impl Into<String>,
        position: DVec2,
        mass: f64,
        radius: f64,
        color: Color,
    ) -> Result<Self> {
        let name = name.into();

        if !(mass.is_finite() && mass > 0.0) {
            return Err(Error::InvalidMass { name, mass });
        }

        if !(radius.is_finite() && radius > 0.0) {
            return Err(Error::InvalidRadius { name, radius });
        }

        if !position.is_finite() {
            return Err(Error::NonFiniteInitialState { name });
        }

        Ok(Self {
            name,
            position,
            velocity: DVec2::ZERO,
            mass,
            radius,
            color,
            is_anchor: false,
            distance_to_anchor: None,
            trajectory: Trajectory::default(),
            own_history: false,
        })
    }

    /// Sets the initial velocity.
    pub fn with_velocity(mut self, velocity: DVec2) -> Result<Self> {
        if !velocity.is_finite() {
            return Err(Error::NonFiniteInitialState { name: self.name });
        }

        self.velocity = velocity;
        Ok(self)
    }

    /// Marks this body as the anchor other bodies track their distance to.
    #[inline]
    pub fn anchor(mut self) -> Self {
        self.is_anchor = true;
        self
    }

    /// Sets how much of the trajectory is kept, overriding the limit of the simulation the body
    /// is added to.
    #[inline]
    pub fn with_history(mut self, limit: HistoryLimit) -> Self {
        self.trajectory.set_limit(limit);
        self.own_history = true;
        self
    }

    #[inline]
    #[allow(missing_docs)]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn velocity(&self) -> DVec2 {
        self.velocity
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn mass(&self) -> f64 {
        self.mass
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn radius(&self) -> f64 {
        self.radius
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Returns `true` if this body is the anchor.
    #[inline]
    pub const fn is_anchor(&self) -> bool {
        self.is_anchor
    }

    /// Distance to the anchor as of the last tick, in meters.
    ///
    /// `None` before the first tick, for the anchor itself, or if there is no anchor.
    #[inline]
    pub const fn distance_to_anchor(&self) -> Option<f64> {
        self.distance_to_anchor
    }

    /// Recorded positions of this body, oldest first.
    #[inline]
    pub const fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Euclidean distance between this body and `other`.
    #[inline]
    pub fn distance_to(&self, other: &Body) -> f64 {
        self.position.distance(other.position)
    }

    /// Gravitational force `other` exerts on this body, pointing from this body toward `other`.
    ///
    /// The magnitude is `g * m1 * m2 / d²`. If both bodies share the same position the result
    /// is not finite; see [`NewtonianForce::checked`](crate::gravity::NewtonianForce::checked)
    /// for a variant that returns zero instead.
    #[inline]
    pub fn force_from(&self, other: &Body, g: f64) -> DVec2 {
        let delta = other.position - self.position;
        let distance_squared = delta.length_squared();
        let distance = distance_squared.sqrt();

        let magnitude = g * self.mass * other.mass / distance_squared;

        delta * (magnitude / distance)
    }

    /// Velocity and position this body would have after a semi-implicit Euler step of `dt`
    /// seconds under `net_force`, without modifying it.
    ///
    /// The velocity is updated first and the position then uses the updated velocity.
    #[inline]
    pub fn step(&self, net_force: DVec2, dt: f64) -> (DVec2, DVec2) {
        let velocity = self.velocity + net_force / self.mass * dt;
        let position = self.position + velocity * dt;

        (velocity, position)
    }

    /// Applies a state computed by [`Body::step`] and records the new position.
    #[inline]
    pub fn commit(&mut self, (velocity, position): (DVec2, DVec2)) {
        self.velocity = velocity;
        self.position = position;
        self.trajectory.push(position);
    }

    /// Advances this body by `dt` seconds under `net_force` using semi-implicit Euler, and
    /// records the new position.
    #[inline]
    pub fn integrate(&mut self, net_force: DVec2, dt: f64) {
        let state = self.step(net_force, dt);
        self.commit(state);
    }

    #[inline]
    pub(crate) fn set_distance_to_anchor(&mut self, distance: Option<f64>) {
        self.distance_to_anchor = distance;
    }

    #[inline]
    pub(crate) fn set_default_history(&mut self, limit: HistoryLimit) {
        if !self.own_history {
            self.trajectory.set_limit(limit);
        }
    }

    /// Kinetic energy, in joules.
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.length_squared()
    }

    /// Linear momentum, in kg m/s.
    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.velocity * self.mass
    }
}
