//! Randomised placement helpers used by the arena on reset.

use rand::Rng;

use crate::types::{Bounds, Vec2};

/// Rejection-sampling budget before falling back to the arena center.
pub const MAX_SAMPLING_ATTEMPTS: usize = 50;

/// A point that sampled positions must keep away from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Keepout {
    pub point: Vec2,
    pub min_distance: f64,
}

impl Keepout {
    pub fn new(point: Vec2, min_distance: f64) -> Self {
        Self {
            point,
            min_distance,
        }
    }

    fn rejects(&self, candidate: &Vec2) -> bool {
        self.point.distance_to(candidate) < self.min_distance
    }
}

/// Samples a position inside `area`, optionally away from a keepout point.
///
/// Makes at most [`MAX_SAMPLING_ATTEMPTS`] uniform draws. If every draw is
/// rejected the center of `area` is returned, so the call always terminates.
/// Nothing beyond the keepout distance is checked; overlaps with other
/// entities are accepted.
pub fn sample_free_position<R: Rng + ?Sized>(
    rng: &mut R,
    area: &Bounds,
    keepout: Option<Keepout>,
) -> Vec2 {
    for _ in 0..MAX_SAMPLING_ATTEMPTS {
        let candidate = Vec2::new(
            uniform(rng, (area.min.x, area.max.x)),
            uniform(rng, (area.min.z, area.max.z)),
        );
        match keepout {
            Some(k) if k.rejects(&candidate) => continue,
            _ => return candidate,
        }
    }

    let center = area.center();
    tracing::debug!(
        attempts = MAX_SAMPLING_ATTEMPTS,
        "rejection sampling exhausted, falling back to {}",
        center
    );
    center
}

/// Uniform random unit vector.
pub fn random_unit_direction<R: Rng + ?Sized>(rng: &mut R) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f64::consts::TAU);
    Vec2::new(angle.cos(), angle.sin())
}

/// Uniform draw from the closed range `[min, max]`; `min` when the range is empty.
pub fn uniform<R: Rng + ?Sized>(rng: &mut R, (min, max): (f64, f64)) -> f64 {
    if max > min {
        rng.gen_range(min..=max)
    } else {
        min
    }
}
