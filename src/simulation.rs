use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::{
    body::Body,
    constants::{DAY, G},
    error::{Error, Result},
    gravity::{coincident_pairs, Between, BruteForce, Interaction, NewtonianForce},
    render::{Drawable, Renderer},
    trajectory::HistoryLimit,
};

/// Order in which the bodies of a [`Simulation`] are updated during a tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateOrder {
    /// Every net force is computed from the positions at the start of the tick, then every body
    /// is integrated. The result does not depend on the order of the bodies, and a tick either
    /// fully succeeds or leaves the simulation untouched.
    #[default]
    TwoPhase,
    /// Each body computes its net force and is integrated immediately, before moving to the
    /// next one. Later bodies see the already advanced positions of earlier ones.
    ///
    /// A failing tick may leave earlier bodies advanced.
    Sequential,
}

/// What a tick does when two bodies share the same position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SingularityPolicy {
    /// Reject the tick with [`Error::Singularity`].
    #[default]
    Fail,
    /// Log a warning and ignore the force between coincident bodies for that tick.
    Skip,
}

/// Numerical and physical parameters of a [`Simulation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Parameters {
    /// Gravitational constant.
    pub g: f64,
    /// Duration of one tick, in seconds.
    pub timestep: f64,
    #[allow(missing_docs)]
    pub update_order: UpdateOrder,
    #[allow(missing_docs)]
    pub singularity: SingularityPolicy,
    /// Trajectory limit of added bodies that do not set their own.
    pub history: HistoryLimit,
}

impl Default for Parameters {
    #[inline]
    fn default() -> Self {
        Self {
            g: G,
            timestep: DAY,
            update_order: UpdateOrder::default(),
            singularity: SingularityPolicy::default(),
            history: HistoryLimit::default(),
        }
    }
}

/// Identifier of a body inside a [`Simulation`], its insertion index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(usize);

impl BodyId {
    /// Index of the body in [`Simulation::bodies`].
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Lifecycle of a [`Simulation`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationState {
    /// Constructed, not ticked yet.
    #[default]
    Idle,
    /// Accepting ticks.
    Running,
}

/// Set of bodies advanced together under mutual gravitation.
///
/// # Example
///
/// ```
/// use orrery::prelude::*;
/// use glam::DVec2;
///
/// let sun = Body::new("Sun", DVec2::ZERO, 1.98892e30, 30.0, Color::YELLOW)?.anchor();
/// let earth = Body::new("Earth", DVec2::new(-AU, 0.0), 5.9742e24, 16.0, Color::BLUE)?
///     .with_velocity(DVec2::new(0.0, 29.783e3))?;
///
/// let mut simulation = Simulation::with_bodies(Parameters::default(), [sun, earth])?;
/// simulation.run(30)?;
///
/// let earth = &simulation.bodies()[1];
/// assert_eq!(earth.trajectory().len(), 30);
/// assert!(earth.distance_to_anchor().is_some());
/// # Ok::<(), orrery::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct Simulation {
    parameters: Parameters,
    bodies: Vec<Body>,
    anchor: Option<usize>,
    state: SimulationState,
    ticks: u64,
    elapsed: f64,
}

impl Simulation {
    /// Creates an empty [`Simulation`].
    #[inline]
    pub fn new(parameters: Parameters) -> Self {
        if parameters.history == HistoryLimit::Unbounded {
            debug!("trajectories are unbounded and grow by one point per body every tick");
        }

        Self {
            parameters,
            ..Default::default()
        }
    }

    /// Creates a [`Simulation`] with the given bodies, in order.
    pub fn with_bodies<I>(parameters: Parameters, bodies: I) -> Result<Self>
    where
        I: IntoIterator<Item = Body>,
    {
        let mut simulation = Self::new(parameters);
        for body in bodies {
            simulation.add_body(body)?;
        }

        Ok(simulation)
    }

    /// Adds a body and returns its identifier.
    ///
    /// The body keeps a limit set with [`Body::with_history`], otherwise it gets the one of
    /// the simulation. Fails if the body is an anchor and the simulation already has one.
    pub fn add_body(&mut self, mut body: Body) -> Result<BodyId> {
        if body.is_anchor() {
            if let Some(existing) = self.anchor() {
                return Err(Error::MultipleAnchors {
                    existing: existing.name().to_owned(),
                    rejected: body.name().to_owned(),
                });
            }

            self.anchor = Some(self.bodies.len());
        }

        debug!(
            name = body.name(),
            mass = body.mass(),
            anchor = body.is_anchor(),
            "adding body"
        );

        body.set_default_history(self.parameters.history);
        self.bodies.push(body);

        Ok(BodyId(self.bodies.len() - 1))
    }

    /// Moves the simulation to [`SimulationState::Running`] without ticking.
    #[inline]
    pub fn start(&mut self) {
        self.state = SimulationState::Running;
    }

    /// Advances every body by the configured timestep.
    #[inline]
    pub fn tick(&mut self) -> Result<()> {
        self.tick_by(self.parameters.timestep)
    }

    /// Advances every body by `dt` seconds.
    pub fn tick_by(&mut self, dt: f64) -> Result<()> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidTimestep(dt));
        }

        match self.parameters.update_order {
            UpdateOrder::TwoPhase => self.tick_two_phase(dt)?,
            UpdateOrder::Sequential => self.tick_sequential(dt)?,
        }

        self.state = SimulationState::Running;
        self.ticks += 1;
        self.elapsed += dt;

        trace!(tick = self.ticks, elapsed = self.elapsed, "tick");

        Ok(())
    }

    /// Ticks `n` times, stopping at the first error.
    pub fn run(&mut self, n: usize) -> Result<()> {
        (0..n).try_for_each(|_| self.tick())
    }

    fn tick_two_phase(&mut self, dt: f64) -> Result<()> {
        self.resolve_singularities(coincident_pairs(&self.bodies))?;

        // Read phase: nothing is written until every body has a valid next state.
        let forces: Vec<_> = (0..self.bodies.len()).map(|i| self.force_on(i)).collect();
        let distances: Vec<_> = (0..self.bodies.len())
            .map(|i| self.distance_to_anchor(i))
            .collect();

        let states: Vec<_> = self
            .bodies
            .iter()
            .zip(forces)
            .map(|(body, force)| body.step(force, dt))
            .collect();

        for (body, state) in self.bodies.iter().zip(&states) {
            self.check_finite(body, *state)?;
        }

        // Write phase.
        for ((body, state), distance) in self.bodies.iter_mut().zip(states).zip(distances) {
            body.commit(state);
            body.set_distance_to_anchor(distance);
        }

        Ok(())
    }

    fn tick_sequential(&mut self, dt: f64) -> Result<()> {
        for i in 0..self.bodies.len() {
            let coincident = (0..self.bodies.len())
                .filter(|&j| j != i && self.bodies[i].position() == self.bodies[j].position())
                .map(|j| (i.min(j), i.max(j)));
            self.resolve_singularities(coincident)?;

            let distance = self.distance_to_anchor(i);
            let state = self.bodies[i].step(self.force_on(i), dt);
            self.check_finite(&self.bodies[i], state)?;

            let body = &mut self.bodies[i];
            body.commit(state);
            body.set_distance_to_anchor(distance);
        }

        Ok(())
    }

    fn resolve_singularities<I>(&self, pairs: I) -> Result<()>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        for (i, j) in pairs {
            let (first, second) = (self.bodies[i].name(), self.bodies[j].name());

            match self.parameters.singularity {
                SingularityPolicy::Fail => {
                    return Err(Error::Singularity {
                        first: first.to_owned(),
                        second: second.to_owned(),
                        tick: self.ticks,
                    })
                }
                SingularityPolicy::Skip => {
                    warn!(first, second, tick = self.ticks, "skipping coincident bodies");
                }
            }
        }

        Ok(())
    }

    fn force_on(&self, i: usize) -> DVec2 {
        let g = self.parameters.g;
        let between = Between(i, self.bodies.as_slice());

        match self.parameters.singularity {
            SingularityPolicy::Fail => BruteForce(NewtonianForce::unchecked(g)).compute(between),
            SingularityPolicy::Skip => BruteForce(NewtonianForce::checked(g)).compute(between),
        }
    }

    fn distance_to_anchor(&self, i: usize) -> Option<f64> {
        self.anchor
            .filter(|&anchor| anchor != i)
            .map(|anchor| self.bodies[i].distance_to(&self.bodies[anchor]))
    }

    fn check_finite(&self, body: &Body, (velocity, position): (DVec2, DVec2)) -> Result<()> {
        if velocity.is_finite() && position.is_finite() {
            return Ok(());
        }

        Err(Error::NonFiniteState {
            name: body.name().to_owned(),
            tick: self.ticks,
        })
    }

    /// Parameters this simulation was created with.
    #[inline]
    pub const fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Bodies of the simulation, in insertion order.
    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Returns the body with the given identifier.
    #[inline]
    pub fn body(&self, id: BodyId) -> Option<&Body> {
        self.bodies.get(id.0)
    }

    /// Returns the anchor body, if there is one.
    #[inline]
    pub fn anchor(&self) -> Option<&Body> {
        self.anchor.map(|i| &self.bodies[i])
    }

    #[inline]
    #[allow(missing_docs)]
    pub const fn state(&self) -> SimulationState {
        self.state
    }

    /// Number of successful ticks.
    #[inline]
    pub const fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Simulated time elapsed, in seconds.
    #[inline]
    pub const fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Total linear momentum of the system.
    pub fn total_momentum(&self) -> DVec2 {
        self.bodies.iter().map(Body::momentum).sum()
    }

    /// Total mechanical energy of the system: kinetic energy plus pairwise gravitational
    /// potential energy.
    pub fn total_energy(&self) -> f64 {
        let kinetic: f64 = self.bodies.iter().map(Body::kinetic_energy).sum();

        let mut potential = 0.0;
        for (i, b1) in self.bodies.iter().enumerate() {
            for b2 in &self.bodies[i + 1..] {
                potential -= self.parameters.g * b1.mass() * b2.mass() / b1.distance_to(b2);
            }
        }

        kinetic + potential
    }

    /// Snapshots of every body for a [`Renderer`].
    pub fn drawables(&self) -> impl ExactSizeIterator<Item = Drawable<'_>> {
        self.bodies.iter().map(|body| Drawable {
            name: body.name(),
            position: body.position(),
            radius: body.radius(),
            color: body.color(),
            is_anchor: body.is_anchor(),
            trajectory: body.trajectory(),
            distance_to_anchor: body.distance_to_anchor(),
        })
    }

    /// Draws the current state of every body with `renderer`.
    pub fn render<R: Renderer>(&self, mut renderer: R) {
        renderer.begin_frame();
        for drawable in self.drawables() {
            renderer.draw(&drawable);
        }
        renderer.end_frame();
    }
}
