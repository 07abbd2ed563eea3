//! Observation encoding for the navigation agent.
//!
//! Builds the flat feature vector handed to the learner after every
//! decision.

use crate::agent::NavigationAgent;
use crate::arena::Arena;
use crate::config::EnvConfig;
use crate::types::Vec2;

/// Distances below this are treated as "on the target" for the heading.
const DIRECTION_EPSILON: f64 = 1e-5;

/// Builds observation vectors for the agent.
pub struct ObservationBuilder;

impl ObservationBuilder {
    /// Builds the observation vector.
    ///
    /// ```text
    /// [dir_x, dir_z, dist_norm, vel_x_norm, vel_z_norm] ++ [ray_0 .. ray_{n-1}]
    /// ```
    ///
    /// * `dir` is the unit vector toward the target (zero when on top of it).
    /// * `dist_norm` is the distance over the arena radius, in `[0, 1]`.
    /// * velocity components are divided by the max speed, in `[-1, 1]`.
    /// * each ray reading is the hit distance over the ray length, 1.0 for
    ///   no hit.
    pub fn build(agent: &NavigationAgent, arena: &Arena, config: &EnvConfig) -> Vec<f64> {
        let mut obs = Vec::with_capacity(config.observation_dim());

        let to_target = agent.vector_to(&arena.target.position);
        let distance = to_target.length();
        let dir = to_target.normalized_or_zero(DIRECTION_EPSILON);
        let dist_norm = (distance / arena.max_radius().max(1e-3)).clamp(0.0, 1.0);

        obs.push(dir.x);
        obs.push(dir.z);
        obs.push(dist_norm);

        let max_speed = config.agent.max_speed;
        obs.push((agent.velocity.x / max_speed).clamp(-1.0, 1.0));
        obs.push((agent.velocity.z / max_speed).clamp(-1.0, 1.0));

        obs.extend(Self::ray_readings(&agent.position, arena, config));
        obs
    }

    /// Unit direction of ray `index` out of `num_rays`, sweeping clockwise
    /// from +Z.
    pub fn ray_direction(index: usize, num_rays: usize) -> Vec2 {
        Vec2::from_heading_deg(360.0 / num_rays as f64 * index as f64)
    }

    /// Normalised hit distances of the equiangular ray fan around `origin`.
    pub fn ray_readings(origin: &Vec2, arena: &Arena, config: &EnvConfig) -> Vec<f64> {
        let n = config.perception.num_rays;
        let range = config.perception.ray_distance;
        (0..n)
            .map(|i| {
                let dir = Self::ray_direction(i, n);
                match arena.raycast(origin, &dir, range) {
                    Some(hit) => (hit / range).clamp(0.0, 1.0),
                    None => 1.0,
                }
            })
            .collect()
    }
}
