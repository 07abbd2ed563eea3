//! Shaping and terminal rewards for the navigation task.

use crate::config::RewardConfig;

/// Computes rewards for the navigation environment.
pub struct RewardComputer;

impl RewardComputer {
    /// Per-step shaping reward.
    ///
    /// `(prev_distance - distance) × approach_scale + step_penalty`, so
    /// closing in on the target pays and standing still only costs the
    /// step penalty.
    pub fn shaping(prev_distance: f64, distance: f64, config: &RewardConfig) -> f64 {
        Self::progress(prev_distance, distance) * config.approach_scale + config.step_penalty
    }

    /// Distance closed since the previous step (positive when approaching).
    pub fn progress(prev_distance: f64, distance: f64) -> f64 {
        prev_distance - distance
    }

    /// True once the agent is within the goal threshold.
    pub fn goal_reached(distance: f64, config: &RewardConfig) -> bool {
        distance <= config.goal_threshold
    }
}
