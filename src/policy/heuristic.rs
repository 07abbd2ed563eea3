//! Scripted seek-and-avoid policy.
//!
//! Stands in for a human driver when checking an arena layout, and serves as
//! a baseline a trained policy should beat.

use super::trait_::Policy;
use crate::config::EnvConfig;
use crate::observation::ObservationBuilder;

/// Steers along the ray that best trades heading-to-target against clearance.
///
/// For each ray `i` with reading `r_i` (1.0 = free):
/// ```text
/// score(i) = dot(ray_dir_i, target_dir) + clearance_weight × r_i
/// ```
/// Rays whose reading is below `min_clearance` are skipped. If every ray is
/// blocked the clearest one is taken.
pub struct SeekAvoidPolicy {
    pub clearance_weight: f64,
    pub min_clearance: f64,
}

impl SeekAvoidPolicy {
    pub fn new(clearance_weight: f64, min_clearance: f64) -> Self {
        Self {
            clearance_weight,
            min_clearance,
        }
    }
}

impl Default for SeekAvoidPolicy {
    fn default() -> Self {
        Self::new(0.5, 0.25)
    }
}

impl Policy for SeekAvoidPolicy {
    fn select_action(&mut self, observation: &[f64]) -> [f64; 2] {
        if observation.len() <= EnvConfig::BASE_FEATURE_DIM {
            return [0.0, 0.0];
        }
        let (tx, tz) = (observation[0], observation[1]);
        let rays = &observation[EnvConfig::BASE_FEATURE_DIM..];
        let n = rays.len();

        let mut best: Option<(usize, f64)> = None;
        for (i, &reading) in rays.iter().enumerate() {
            if reading < self.min_clearance {
                continue;
            }
            let dir = ObservationBuilder::ray_direction(i, n);
            let score = dir.x * tx + dir.z * tz + self.clearance_weight * reading;
            if best.map_or(true, |(_, s)| score > s) {
                best = Some((i, score));
            }
        }

        let chosen = match best {
            Some((i, _)) => i,
            // boxed in: back out through the widest gap
            None => rays
                .iter()
                .enumerate()
                .max_by(|a, b| a.1.total_cmp(b.1))
                .map(|(i, _)| i)
                .unwrap_or(0),
        };

        let dir = ObservationBuilder::ray_direction(chosen, n);
        [dir.x, dir.z]
    }

    fn name(&self) -> &str {
        "seek_avoid"
    }
}
