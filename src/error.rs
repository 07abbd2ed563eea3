use thiserror::Error;

/// Reasons an [`EnvConfig`](crate::config::EnvConfig) is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Arena half extents must be positive, got ({x}, {z})")]
    NonPositiveExtents { x: f64, z: f64 },

    #[error("Spawn margin {margin} leaves no room inside half extents ({x}, {z})")]
    MarginTooLarge { margin: f64, x: f64, z: f64 },

    #[error("Moving obstacle ratio must be within [0, 1], got {0}")]
    MovingRatioOutOfRange(f64),

    #[error("Ray count must be within 4..=64, got {0}")]
    RayCountOutOfRange(usize),

    #[error("{name} must be a valid range with 0 <= min <= max, got ({min}, {max})")]
    InvalidRange { name: &'static str, min: f64, max: f64 },

    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be finite and non-negative, got {value}")]
    Negative { name: &'static str, value: f64 },

    #[error("{name} must be finite, got {value}")]
    NonFinite { name: &'static str, value: f64 },

    #[error("Decision period must be at least 1")]
    ZeroDecisionPeriod,
}

/// Errors returned by [`NavigationEnv`](crate::environment::NavigationEnv).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EnvError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    #[error("Environment must be reset before the first step")]
    NotReset,

    #[error("Episode already finished; call reset before stepping again")]
    EpisodeFinished,

    #[error("Action contains a non-finite value")]
    NonFiniteAction,
}
