//! Configuration for the navigation environment.
//!
//! Defaults mirror a 24 × 24 arena with twenty box obstacles, a quarter of
//! them moving, and the reward shaping used for training.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Arena geometry and procedural spawning parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArenaConfig {
    /// Half extent along X (center to each edge).
    pub half_extent_x: f64,
    /// Half extent along Z (center to each edge).
    pub half_extent_z: f64,
    /// Ground height; entities are exported half a unit above it.
    pub ground_y: f64,
    /// Obstacles spawned per episode.
    pub obstacle_count: usize,
    /// Fraction in `[0, 1]` of obstacles that move.
    pub moving_obstacle_ratio: f64,
    /// Edge length range `[min, max]` of the box obstacles.
    pub obstacle_size_range: (f64, f64),
    /// Speed range `[min, max]` of moving obstacles.
    pub moving_speed_range: (f64, f64),
    /// Distance from the edges kept clear when spawning agent and target.
    pub agent_edge_margin: f64,
    /// Minimum agent-to-target distance at spawn.
    pub target_min_separation: f64,
    /// Distance from the edges kept clear when spawning obstacles.
    pub obstacle_edge_margin: f64,
    /// Minimum agent-to-obstacle distance at spawn.
    pub obstacle_agent_clearance: f64,
    /// Inset of the bounce / clamp rectangle used by moving entities.
    pub boundary_margin: f64,
}

impl ArenaConfig {
    /// Distance normalisation radius: the larger half extent.
    pub fn max_radius(&self) -> f64 {
        self.half_extent_x.max(self.half_extent_z)
    }

    /// Number of obstacles that move, rounding half to even.
    pub fn moving_obstacle_count(&self) -> usize {
        (self.obstacle_count as f64 * self.moving_obstacle_ratio).round_ties_even() as usize
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            half_extent_x: 12.0,
            half_extent_z: 12.0,
            ground_y: 0.0,
            obstacle_count: 20,
            moving_obstacle_ratio: 0.25,
            obstacle_size_range: (0.6, 2.0),
            moving_speed_range: (1.0, 3.5),
            agent_edge_margin: 1.0,
            target_min_separation: 6.0,
            obstacle_edge_margin: 0.5,
            obstacle_agent_clearance: 2.5,
            boundary_margin: 0.5,
        }
    }
}

/// Agent body and locomotion.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentConfig {
    /// Desired speed for a full-magnitude action component.
    pub move_speed: f64,
    /// Maximum planar speed.
    pub max_speed: f64,
    /// Velocity smoothing rate; blend factor per step is `dt × damping`.
    pub damping: f64,
    /// Collision radius of the agent body.
    pub radius: f64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            move_speed: 6.0,
            max_speed: 6.0,
            damping: 10.0,
            radius: 0.5,
        }
    }
}

/// Raycast perception.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PerceptionConfig {
    /// Equiangular rays over 360°.
    pub num_rays: usize,
    /// Maximum ray length.
    pub ray_distance: f64,
}

impl PerceptionConfig {
    pub const MIN_RAYS: usize = 4;
    pub const MAX_RAYS: usize = 64;
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self {
            num_rays: 16,
            ray_distance: 8.0,
        }
    }
}

/// Reward shaping coefficients.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RewardConfig {
    /// Reward per unit of distance closed toward the target.
    pub approach_scale: f64,
    /// Added every simulation step (usually negative).
    pub step_penalty: f64,
    /// Terminal reward for reaching the target.
    pub goal_reward: f64,
    /// Terminal reward for touching an obstacle (usually negative).
    pub collision_penalty: f64,
    /// Distance at or below which the target counts as reached.
    pub goal_threshold: f64,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            approach_scale: 0.05,
            step_penalty: -0.001,
            goal_reward: 1.0,
            collision_penalty: -0.5,
            goal_threshold: 1.0,
        }
    }
}

/// Target wandering.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TargetConfig {
    pub wander: bool,
    pub wander_speed: f64,
    /// Mean time between direction changes.
    pub direction_change_interval: f64,
}

impl Default for TargetConfig {
    fn default() -> Self {
        Self {
            wander: true,
            wander_speed: 1.5,
            direction_change_interval: 2.5,
        }
    }
}

/// Top-level environment configuration.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EnvConfig {
    pub arena: ArenaConfig,
    pub agent: AgentConfig,
    pub perception: PerceptionConfig,
    pub reward: RewardConfig,
    pub target: TargetConfig,
    pub timing: TimingConfig,
}

/// Simulation cadence.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Simulation steps between action requests.
    pub decision_period: u32,
    /// Duration of one simulation step.
    pub fixed_delta_time: f64,
    /// Simulation steps before truncation; 0 disables the limit.
    pub max_steps: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            decision_period: 5,
            fixed_delta_time: 0.02,
            max_steps: 0,
        }
    }
}

impl EnvConfig {
    /// Number of scalar features preceding the ray readings.
    pub const BASE_FEATURE_DIM: usize = 5; // dir_x, dir_z, dist, vel_x, vel_z

    /// Dimension of the continuous action.
    pub const ACTION_DIM: usize = 2;

    /// Observation length: base features plus one reading per ray.
    pub fn observation_dim(&self) -> usize {
        Self::BASE_FEATURE_DIM + self.perception.num_rays
    }

    /// Checks every parameter, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let a = &self.arena;
        let extents = [a.half_extent_x, a.half_extent_z];
        if extents.iter().any(|e| !e.is_finite() || *e <= 0.0) {
            return Err(ConfigError::NonPositiveExtents {
                x: a.half_extent_x,
                z: a.half_extent_z,
            });
        }
        let half_min = a.half_extent_x.min(a.half_extent_z);
        for margin in [
            a.agent_edge_margin,
            a.obstacle_edge_margin,
            a.boundary_margin,
        ] {
            if !(0.0..half_min).contains(&margin) {
                return Err(ConfigError::MarginTooLarge {
                    margin,
                    x: a.half_extent_x,
                    z: a.half_extent_z,
                });
            }
        }
        if !(0.0..=1.0).contains(&a.moving_obstacle_ratio) {
            return Err(ConfigError::MovingRatioOutOfRange(a.moving_obstacle_ratio));
        }
        check_range("obstacle_size_range", a.obstacle_size_range)?;
        check_range("moving_speed_range", a.moving_speed_range)?;
        if a.obstacle_size_range.0 <= 0.0 {
            return Err(ConfigError::NonPositive {
                name: "obstacle_size_range.min",
                value: a.obstacle_size_range.0,
            });
        }

        check_non_negative("target_min_separation", a.target_min_separation)?;
        check_non_negative("obstacle_agent_clearance", a.obstacle_agent_clearance)?;
        check_finite("ground_y", a.ground_y)?;

        let n = self.perception.num_rays;
        if !(PerceptionConfig::MIN_RAYS..=PerceptionConfig::MAX_RAYS).contains(&n) {
            return Err(ConfigError::RayCountOutOfRange(n));
        }

        check_positive("ray_distance", self.perception.ray_distance)?;
        check_positive("move_speed", self.agent.move_speed)?;
        check_positive("max_speed", self.agent.max_speed)?;
        check_positive("damping", self.agent.damping)?;
        check_positive("agent radius", self.agent.radius)?;
        check_positive("goal_threshold", self.reward.goal_threshold)?;
        check_positive("fixed_delta_time", self.timing.fixed_delta_time)?;
        check_positive(
            "direction_change_interval",
            self.target.direction_change_interval,
        )?;

        check_non_negative("wander_speed", self.target.wander_speed)?;

        let r = &self.reward;
        check_finite("approach_scale", r.approach_scale)?;
        check_finite("step_penalty", r.step_penalty)?;
        check_finite("goal_reward", r.goal_reward)?;
        check_finite("collision_penalty", r.collision_penalty)?;

        if self.timing.decision_period == 0 {
            return Err(ConfigError::ZeroDecisionPeriod);
        }

        Ok(())
    }
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::NonPositive { name, value });
    }
    Ok(())
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Negative { name, value });
    }
    Ok(())
}

fn check_finite(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::NonFinite { name, value });
    }
    Ok(())
}

fn check_range(name: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = EnvConfig::default();
        assert!(cfg.validate().is_ok());
        assert_eq!(cfg.observation_dim(), 5 + 16);
    }

    #[test]
    fn moving_count_rounds_half_to_even() {
        let mut arena = ArenaConfig::default();
        assert_eq!(arena.moving_obstacle_count(), 5);

        arena.obstacle_count = 10;
        arena.moving_obstacle_ratio = 0.25; // 2.5
        assert_eq!(arena.moving_obstacle_count(), 2);

        arena.obstacle_count = 6; // 1.5
        assert_eq!(arena.moving_obstacle_count(), 2);

        arena.obstacle_count = 2; // 0.5
        assert_eq!(arena.moving_obstacle_count(), 0);

        arena.obstacle_count = 10;

        arena.moving_obstacle_ratio = 1.0;
        assert_eq!(arena.moving_obstacle_count(), 10);
    }

    #[test]
    fn rejects_bad_ray_count() {
        let mut cfg = EnvConfig::default();
        cfg.perception.num_rays = 3;
        assert_eq!(cfg.validate(), Err(ConfigError::RayCountOutOfRange(3)));
        cfg.perception.num_rays = 65;
        assert_eq!(cfg.validate(), Err(ConfigError::RayCountOutOfRange(65)));
    }

    #[test]
    fn rejects_ratio_out_of_range() {
        let mut cfg = EnvConfig::default();
        cfg.arena.moving_obstacle_ratio = 1.5;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::MovingRatioOutOfRange(1.5))
        );
    }

    #[test]
    fn rejects_inverted_range() {
        let mut cfg = EnvConfig::default();
        cfg.arena.moving_speed_range = (3.0, 1.0);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRange {
                name: "moving_speed_range",
                ..
            })
        ));
    }

    #[test]
    fn rejects_margin_wider_than_arena() {
        let mut cfg = EnvConfig::default();
        cfg.arena.half_extent_x = 0.8;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MarginTooLarge { margin, .. }) if margin == 1.0
        ));
    }

    #[test]
    fn rejects_nan_and_zero() {
        let mut cfg = EnvConfig::default();
        cfg.timing.fixed_delta_time = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                name: "fixed_delta_time",
                ..
            })
        ));

        let mut cfg = EnvConfig::default();
        cfg.timing.decision_period = 0;
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroDecisionPeriod));
    }

    #[test]
    fn rejects_infinite_speed_range() {
        let mut cfg = EnvConfig::default();
        cfg.arena.moving_speed_range = (1.0, f64::INFINITY);
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidRange {
                name: "moving_speed_range",
                ..
            })
        ));
    }

    #[test]
    fn rejects_infinite_delta_time() {
        let mut cfg = EnvConfig::default();
        cfg.timing.fixed_delta_time = f64::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive {
                name: "fixed_delta_time",
                ..
            })
        ));
    }

    #[test]
    fn rejects_infinite_extent() {
        let mut cfg = EnvConfig::default();
        cfg.arena.half_extent_z = f64::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositiveExtents { .. })
        ));
    }

    #[test]
    fn rejects_nan_margin() {
        let mut cfg = EnvConfig::default();
        cfg.arena.boundary_margin = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::MarginTooLarge { .. })
        ));
    }

    #[test]
    fn rejects_runaway_wander_and_rewards() {
        let mut cfg = EnvConfig::default();
        cfg.target.wander_speed = f64::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative {
                name: "wander_speed",
                ..
            })
        ));

        let mut cfg = EnvConfig::default();
        cfg.reward.collision_penalty = f64::NEG_INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonFinite {
                name: "collision_penalty",
                ..
            })
        ));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_json_round_trip() {
        let cfg = EnvConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: EnvConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, back);
    }
}
