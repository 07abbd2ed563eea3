//! navarena - reinforcement-learning navigation arena
//!
//! An episodic environment in which an agent steers toward a wandering
//! target across a bounded arena scattered with static and moving box
//! obstacles. The agent perceives the world through a radial raycast fan,
//! acts with continuous desired-velocity commands, and is paid a shaping
//! reward for closing distance, a bonus for reaching the target and a
//! penalty for touching an obstacle.
//!
//! The learning algorithm is not part of this crate: any trainer can drive
//! [`NavigationEnv`] through `reset` / `step`.

pub mod agent;
pub mod arena;
pub mod config;
pub mod environment;
pub mod error;
pub mod metrics;
pub mod observation;
pub mod policy;
pub mod reward;
pub mod sampling;
pub mod types;
pub mod wander;

pub use agent::NavigationAgent;
pub use arena::{Arena, ArenaSnapshot, ObstacleSnapshot};
pub use config::{
    AgentConfig, ArenaConfig, EnvConfig, PerceptionConfig, RewardConfig, TargetConfig,
    TimingConfig,
};
pub use environment::{EpisodeOutcome, NavigationEnv, StepResult};
pub use error::{ConfigError, EnvError};
pub use metrics::EvaluationMetrics;
pub use observation::ObservationBuilder;
pub use policy::{Policy, RandomPolicy, SeekAvoidPolicy};
pub use reward::RewardComputer;
pub use types::{Bounds, Vec2};
pub use wander::{Motion, Obstacle, Target};

/// Identifier type used for spawned obstacles.
pub type Id = String;

/// Generates a UUID v4 identifier from `rng`, so seeded runs repeat their ids.
pub fn generate_id<R: rand::Rng + ?Sized>(rng: &mut R) -> Id {
    uuid::Builder::from_random_bytes(rng.gen())
        .into_uuid()
        .to_string()
}
