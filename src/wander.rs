//! Movement of the target and the box obstacles.
//!
//! Both follow the same pattern: integrate along a planar direction and, on
//! leaving the bounce rectangle, clamp back inside and flip the direction
//! component of every violated axis.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::TargetConfig;
use crate::sampling::{random_unit_direction, uniform};
use crate::types::{Aabb, AxisHits, Bounds, Vec2};
use crate::Id;

/// Advances `position` by `direction × speed × dt` and bounces off `bounds`.
///
/// Returns the axes that were clamped. After the call `position` is always
/// inside `bounds`.
pub fn bounce_step(
    position: &mut Vec2,
    direction: &mut Vec2,
    speed: f64,
    dt: f64,
    bounds: &Bounds,
) -> AxisHits {
    *position += *direction * (speed * dt);
    let hits = bounds.clamp(position);
    if hits.x {
        direction.x = -direction.x;
    }
    if hits.z {
        direction.z = -direction.z;
    }
    hits
}

/// The goal point the agent has to reach.
#[derive(Debug, Clone)]
pub struct Target {
    pub position: Vec2,
    pub direction: Vec2,
    /// Time left before the next random direction change.
    pub change_timer: f64,
}

impl Target {
    /// Creates a target at `position` with a fresh random heading.
    pub fn spawn<R: Rng + ?Sized>(position: Vec2, config: &TargetConfig, rng: &mut R) -> Self {
        let mut target = Self {
            position,
            direction: Vec2::ZERO,
            change_timer: 0.0,
        };
        target.pick_new_direction(config, rng);
        target
    }

    /// Random unit heading; timer set to `interval × U(0.5, 1.5)`.
    pub fn pick_new_direction<R: Rng + ?Sized>(&mut self, config: &TargetConfig, rng: &mut R) {
        self.direction = random_unit_direction(rng);
        self.change_timer = config.direction_change_interval * uniform(rng, (0.5, 1.5));
    }

    /// Advances the random walk by one frame. A no-op when wandering is off.
    pub fn update<R: Rng + ?Sized>(
        &mut self,
        dt: f64,
        config: &TargetConfig,
        bounds: &Bounds,
        rng: &mut R,
    ) {
        if !config.wander {
            return;
        }

        self.change_timer -= dt;
        if self.change_timer <= 0.0 {
            self.pick_new_direction(config, rng);
        }

        let hits = bounce_step(
            &mut self.position,
            &mut self.direction,
            config.wander_speed,
            dt,
            bounds,
        );
        if hits.any() {
            // avoid re-picking a heading right after a bounce
            self.change_timer = config.direction_change_interval;
        }
    }

    /// Moves the target to a uniform random point inside `bounds`.
    pub fn teleport<R: Rng + ?Sized>(&mut self, bounds: &Bounds, rng: &mut R) {
        self.position = Vec2::new(
            uniform(rng, (bounds.min.x, bounds.max.x)),
            uniform(rng, (bounds.min.z, bounds.max.z)),
        );
    }
}

/// Whether an obstacle stays put or drifts and bounces.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Motion {
    Static,
    Moving { direction: Vec2, speed: f64 },
}

/// A box obstacle, axis-aligned, with square footprint `size × size`.
#[derive(Debug, Clone)]
pub struct Obstacle {
    pub id: Id,
    pub position: Vec2,
    /// Edge length of the box.
    pub size: f64,
    pub motion: Motion,
}

impl Obstacle {
    pub fn new(id: Id, position: Vec2, size: f64, motion: Motion) -> Self {
        Self {
            id,
            position,
            size,
            motion,
        }
    }

    pub fn is_moving(&self) -> bool {
        matches!(self.motion, Motion::Moving { .. })
    }

    /// Footprint used for raycasts and contact tests.
    pub fn footprint(&self) -> Aabb {
        Aabb::new(self.position, self.size * 0.5)
    }

    /// Moves a mobile obstacle one frame. Static obstacles are untouched.
    pub fn update(&mut self, dt: f64, bounds: &Bounds) {
        if let Motion::Moving {
            ref mut direction,
            speed,
        } = self.motion
        {
            bounce_step(&mut self.position, direction, speed, dt, bounds);
        }
    }
}
