//! Agent kinematics for the navigation environment.

use crate::config::AgentConfig;
use crate::types::{Bounds, Vec2};

/// State of the navigating agent.
///
/// The body is a circle in the XZ plane whose velocity is driven toward the
/// commanded velocity with exponential smoothing.
#[derive(Debug, Clone)]
pub struct NavigationAgent {
    pub position: Vec2,
    /// Planar velocity, never longer than [`AgentConfig::max_speed`].
    pub velocity: Vec2,
    /// Distance to the target at the end of the previous simulation step.
    pub prev_distance_to_target: f64,
}

impl NavigationAgent {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            prev_distance_to_target: 0.0,
        }
    }

    /// Places the agent at rest and re-anchors the progress baseline.
    pub fn reset(&mut self, position: Vec2, target: &Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.prev_distance_to_target = self.distance_to(target);
    }

    /// Interprets a raw action buffer as a planar command in `[-1, 1]²`.
    ///
    /// Buffers shorter than two values yield the zero command.
    pub fn decode_action(action: &[f64]) -> Vec2 {
        match action {
            [x, z, ..] => Vec2::new(x.clamp(-1.0, 1.0), z.clamp(-1.0, 1.0)),
            _ => Vec2::ZERO,
        }
    }

    /// Blends the velocity toward `command × move_speed` and caps its length.
    ///
    /// The blend factor is `dt × damping`, clamped to `[0, 1]`.
    pub fn apply_action(&mut self, command: Vec2, config: &AgentConfig, dt: f64) {
        let desired = command * config.move_speed;
        let blended = self.velocity.lerp(&desired, dt * config.damping);
        self.velocity = blended.clamp_length(config.max_speed);
    }

    /// Moves by `velocity × dt`, stopping at the bounds.
    ///
    /// The velocity component along a clamped axis is zeroed so the agent
    /// slides along the edge instead of pushing into it.
    pub fn integrate(&mut self, dt: f64, bounds: &Bounds) {
        self.position += self.velocity * dt;
        let hits = bounds.clamp(&mut self.position);
        if hits.x {
            self.velocity.x = 0.0;
        }
        if hits.z {
            self.velocity.z = 0.0;
        }
    }

    /// Planar offset from the agent to `target`.
    pub fn vector_to(&self, target: &Vec2) -> Vec2 {
        *target - self.position
    }

    pub fn distance_to(&self, target: &Vec2) -> f64 {
        self.vector_to(target).length()
    }
}
