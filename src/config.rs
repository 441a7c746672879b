//! Scenario files describing the initial conditions of a [`Simulation`].
//!
//! A scenario consists of:
//!
//! - [`ParametersConfig`] – physical constant, timestep and tick policies
//! - [`BodyConfig`]       – initial state and rendering attributes of each body
//! - [`ScenarioConfig`]   – top-level wrapper loaded from YAML
//!
//! # YAML format
//!
//! ```yaml
//! simulation:
//!   g: 6.67428e-11
//!   timestep: 86400            # seconds per tick
//!   update_order: two_phase    # or sequential
//!   singularity: fail          # or skip
//!   history: 500               # newest points kept per body, omit for unbounded
//!
//! bodies:
//!   - name: Sun
//!     position: [0, 0]
//!     mass: 1.98892e30
//!     radius: 30
//!     color: [255, 255, 0]
//!     anchor: true
//!   - name: Earth
//!     position: [-1, 0]
//!     unit: au                 # position in astronomical units, meters otherwise
//!     velocity: [0, 29783]     # always in m/s
//!     mass: 5.9742e24
//!     radius: 16
//!     color: [100, 149, 237]
//! ```
//!
//! Every field of `simulation` is optional and falls back to [`Parameters::default`].

use std::{fs::File, io::Read, path::Path};

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{
    body::Body,
    constants::AU,
    error::Result,
    render::Color,
    simulation::{Parameters, Simulation, SingularityPolicy, UpdateOrder},
    trajectory::HistoryLimit,
};

/// Global parameters of a scenario.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParametersConfig {
    /// Gravitational constant.
    pub g: f64,
    /// Seconds per tick.
    pub timestep: f64,
    /// `two_phase` or `sequential`.
    pub update_order: UpdateOrder,
    /// `fail` or `skip` on coincident bodies.
    pub singularity: SingularityPolicy,
    /// Trajectory cap, unbounded when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<usize>,
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Parameters::default().into()
    }
}

impl From<Parameters> for ParametersConfig {
    fn from(parameters: Parameters) -> Self {
        Self {
            g: parameters.g,
            timestep: parameters.timestep,
            update_order: parameters.update_order,
            singularity: parameters.singularity,
            history: match parameters.history {
                HistoryLimit::Unbounded => None,
                HistoryLimit::Bounded(n) => Some(n),
            },
        }
    }
}

impl From<&ParametersConfig> for Parameters {
    fn from(config: &ParametersConfig) -> Self {
        Self {
            g: config.g,
            timestep: config.timestep,
            update_order: config.update_order,
            singularity: config.singularity,
            history: config
                .history
                .map_or(HistoryLimit::Unbounded, HistoryLimit::Bounded),
        }
    }
}

/// Unit of the `position` of a [`BodyConfig`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    #[default]
    #[allow(missing_docs)]
    Meters,
    /// Astronomical units.
    Au,
}

impl LengthUnit {
    /// Number of meters in one unit.
    #[inline]
    pub const fn meters(self) -> f64 {
        match self {
            Self::Meters => 1.0,
            Self::Au => AU,
        }
    }
}

/// Initial state of a single body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
#[allow(missing_docs)]
pub struct BodyConfig {
    pub name: String,
    pub position: [f64; 2], // in `unit`
    #[serde(default)]
    pub velocity: [f64; 2], // m/s
    pub mass: f64,          // kg
    pub radius: f64,        // rendering radius
    pub color: Color,
    #[serde(default)]
    pub anchor: bool,
    #[serde(default)]
    pub unit: LengthUnit,
}

impl BodyConfig {
    /// Validates this configuration into a [`Body`].
    pub fn build(&self) -> Result<Body> {
        let position = DVec2::from_array(self.position) * self.unit.meters();

        let body = Body::new(
            self.name.as_str(),
            position,
            self.mass,
            self.radius,
            self.color,
        )?
        .with_velocity(DVec2::from_array(self.velocity))?;

        Ok(if self.anchor { body.anchor() } else { body })
    }
}

/// Top-level scenario loaded from YAML.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    /// Global parameters, all optional.
    #[serde(default)]
    pub simulation: ParametersConfig,
    /// Bodies, in simulation order.
    pub bodies: Vec<BodyConfig>,
}

impl ScenarioConfig {
    /// Parses a scenario from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parses a scenario from a YAML reader.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_yaml::from_reader(reader)?)
    }

    /// Reads and parses a scenario file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        Self::from_reader(file)
    }

    /// Serializes this scenario to YAML.
    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Builds the [`Simulation`] described by this scenario, bodies in file order.
    pub fn build(&self) -> Result<Simulation> {
        let bodies = self
            .bodies
            .iter()
            .map(BodyConfig::build)
            .collect::<Result<Vec<_>>>()?;

        Simulation::with_bodies((&self.simulation).into(), bodies)
    }
}

/// The sun and the four inner planets, starting aligned on the x axis.
pub fn inner_solar_system() -> ScenarioConfig {
    let body = |name: &str, x: f64, vy: f64, mass: f64, radius: f64, color: Color| BodyConfig {
        name: name.to_owned(),
        position: [x, 0.0],
        velocity: [0.0, vy],
        mass,
        radius,
        color,
        anchor: false,
        unit: LengthUnit::Au,
    };

    let sun = BodyConfig {
        anchor: true,
        ..body("Sun", 0.0, 0.0, 1.98892e30, 30.0, Color::YELLOW)
    };

    ScenarioConfig {
        simulation: ParametersConfig::default(),
        bodies: vec![
            sun,
            body("Earth", -1.0, 29_783.0, 5.9742e24, 16.0, Color::BLUE),
            body("Mars", -1.524, 24_077.0, 6.39e23, 12.0, Color::RED),
            body("Mercury", 0.387, -47_400.0, 3.30e23, 8.0, Color::DARK_GREY),
            body("Venus", 0.723, -35_020.0, 4.8685e24, 14.0, Color::WHITE),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        constants::{DAY, G},
        error::Error,
    };

    const SCENARIO: &str = include_str!("../scenarios/inner_solar_system.yaml");

    #[test]
    fn scenario_file_matches_preset() {
        let parsed = ScenarioConfig::from_yaml_str(SCENARIO).unwrap();
        assert_eq!(parsed, inner_solar_system());
    }

    #[test]
    fn preset_builds() {
        let simulation = inner_solar_system().build().unwrap();

        let names: Vec<_> = simulation.bodies().iter().map(Body::name).collect();
        assert_eq!(names, ["Sun", "Earth", "Mars", "Mercury", "Venus"]);
        assert_eq!(simulation.anchor().map(Body::name), Some("Sun"));

        let earth = &simulation.bodies()[1];
        assert_eq!(earth.position(), DVec2::new(-AU, 0.0));
        assert_eq!(earth.velocity(), DVec2::new(0.0, 29_783.0));
        assert_eq!(simulation.bodies()[2].position(), DVec2::new(-1.524 * AU, 0.0));

        let parameters = simulation.parameters();
        assert_eq!((parameters.g, parameters.timestep), (G, DAY));
        assert_eq!(parameters.history, HistoryLimit::Unbounded);
    }

    #[test]
    fn minimal_scenario_uses_defaults() {
        let yaml = "
bodies:
  - name: Rock
    position: [10, 20]
    mass: 1.0
    radius: 1.0
    color: [1, 2, 3]
";
        let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(scenario.simulation, ParametersConfig::default());

        let rock = &scenario.bodies[0];
        assert_eq!(rock.unit, LengthUnit::Meters);
        assert_eq!(rock.velocity, [0.0, 0.0]);
        assert!(!rock.anchor);

        let body = rock.build().unwrap();
        assert_eq!(body.position(), DVec2::new(10.0, 20.0));
        assert_eq!(body.color(), Color::rgb(1, 2, 3));
    }

    #[test]
    fn policies_and_history() {
        let yaml = "
simulation:
  timestep: 3600
  update_order: sequential
  singularity: skip
  history: 500
bodies: []
";
        let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();
        let parameters = Parameters::from(&scenario.simulation);

        assert_eq!(parameters.timestep, 3600.0);
        assert_eq!(parameters.g, G);
        assert_eq!(parameters.update_order, UpdateOrder::Sequential);
        assert_eq!(parameters.singularity, SingularityPolicy::Skip);
        assert_eq!(parameters.history, HistoryLimit::Bounded(500));
    }

    #[test]
    fn yaml_round_trip() {
        let preset = inner_solar_system();
        let yaml = preset.to_yaml_string().unwrap();

        assert_eq!(ScenarioConfig::from_yaml_str(&yaml).unwrap(), preset);
    }

    #[test]
    fn invalid_bodies_are_reported() {
        let yaml = "
bodies:
  - name: Ghost
    position: [0, 0]
    mass: 0
    radius: 1
    color: [0, 0, 0]
";
        let scenario = ScenarioConfig::from_yaml_str(yaml).unwrap();
        assert!(matches!(scenario.build(), Err(Error::InvalidMass { .. })));
    }

    #[test]
    fn malformed_yaml_is_a_config_error() {
        let result = ScenarioConfig::from_yaml_str("bodies: [{ name: Sun, mass: heavy }]");
        assert!(matches!(result, Err(Error::Config(_))));

        let result = ScenarioConfig::from_yaml_str("bodies: []\norbit: 3");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = ScenarioConfig::from_path("does/not/exist.yaml");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
