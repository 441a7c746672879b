use thiserror::Error;

/// Errors produced while building or advancing a [`Simulation`](crate::Simulation).
#[derive(Debug, Error)]
pub enum Error {
    /// A body was given a mass that is not a finite, strictly positive number.
    #[error("body `{name}` has invalid mass {mass} (must be finite and > 0)")]
    InvalidMass {
        /// Name of the rejected body.
        name: String,
        /// The rejected mass.
        mass: f64,
    },

    /// A body was given a radius that is not a finite, strictly positive number.
    #[error("body `{name}` has invalid radius {radius} (must be finite and > 0)")]
    InvalidRadius {
        /// Name of the rejected body.
        name: String,
        /// The rejected radius.
        radius: f64,
    },

    /// A body was constructed with a NaN or infinite position or velocity.
    #[error("body `{name}` has a non-finite initial position or velocity")]
    NonFiniteInitialState {
        /// Name of the rejected body.
        name: String,
    },

    /// A second anchor was added to a simulation that already has one.
    #[error("cannot add anchor `{rejected}`: `{existing}` is already the anchor")]
    MultipleAnchors {
        /// Name of the anchor already present.
        existing: String,
        /// Name of the rejected body.
        rejected: String,
    },

    /// The timestep is not a finite, strictly positive number of seconds.
    #[error("invalid timestep {0} s (must be finite and > 0)")]
    InvalidTimestep(f64),

    /// Two bodies share the same position, making their gravitational force infinite.
    #[error("bodies `{first}` and `{second}` are coincident at tick {tick}")]
    Singularity {
        /// Name of the first body of the pair.
        first: String,
        /// Name of the second body of the pair.
        second: String,
        /// Index of the tick that was rejected.
        tick: u64,
    },

    /// Integration produced a NaN or infinite velocity or position.
    #[error("body `{name}` reached a non-finite state at tick {tick}")]
    NonFiniteState {
        /// Name of the offending body.
        name: String,
        /// Index of the tick that was rejected.
        tick: u64,
    },

    /// The scenario file could not be parsed.
    #[error("invalid scenario: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The scenario file could not be read.
    #[error("failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type used throughout [`orrery`](crate).
pub type Result<T> = std::result::Result<T, Error>;
