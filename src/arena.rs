//! Arena manager: bounds, procedural reset, world advance and spatial queries.

use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::config::{ArenaConfig, TargetConfig};
use crate::sampling::{random_unit_direction, sample_free_position, uniform, Keepout};
use crate::types::{Bounds, Vec2};
use crate::wander::{Motion, Obstacle, Target};
use crate::{generate_id, Id};

/// Height above the ground at which target and obstacles are exported.
const ENTITY_LIFT: f64 = 0.5;

/// The bounded play area and everything in it except the agent.
///
/// Obstacles and the target are rebuilt on every [`Arena::reset`]; only the
/// configuration persists across episodes.
#[derive(Debug, Clone)]
pub struct Arena {
    pub config: ArenaConfig,
    pub target_config: TargetConfig,
    pub obstacles: Vec<Obstacle>,
    pub target: Target,
    /// Where the agent was placed by the last reset.
    pub agent_spawn: Vec2,
}

impl Arena {
    /// Creates an empty arena. Call [`Arena::reset`] before use.
    pub fn new(config: ArenaConfig, target_config: TargetConfig) -> Self {
        Self {
            config,
            target_config,
            obstacles: Vec::new(),
            target: Target {
                position: Vec2::ZERO,
                direction: Vec2::ZERO,
                change_timer: 0.0,
            },
            agent_spawn: Vec2::ZERO,
        }
    }

    /// Half extents inset by `margin`.
    pub fn inset_bounds(&self, margin: f64) -> Bounds {
        Bounds::inset(self.config.half_extent_x, self.config.half_extent_z, margin)
    }

    /// Rectangle every moving entity (agent included) is confined to.
    pub fn movement_bounds(&self) -> Bounds {
        self.inset_bounds(self.config.boundary_margin)
    }

    pub fn max_radius(&self) -> f64 {
        self.config.max_radius()
    }

    /// Starts a new episode layout and returns the agent spawn point.
    ///
    /// 1. Despawns every obstacle.
    /// 2. Samples the agent position away from the edges.
    /// 3. Samples the target away from the edges and from the agent.
    /// 4. Spawns the configured obstacles, the first
    ///    [`ArenaConfig::moving_obstacle_count`] of them moving, each kept
    ///    clear of the agent.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Vec2 {
        self.obstacles.clear();

        let spawn_area = self.inset_bounds(self.config.agent_edge_margin);
        let agent_pos = sample_free_position(rng, &spawn_area, None);
        self.agent_spawn = agent_pos;

        let target_pos = sample_free_position(
            rng,
            &spawn_area,
            Some(Keepout::new(agent_pos, self.config.target_min_separation)),
        );
        self.target = Target::spawn(target_pos, &self.target_config, rng);

        let n_moving = self.config.moving_obstacle_count();
        for i in 0..self.config.obstacle_count {
            let obstacle = self.spawn_obstacle(i < n_moving, rng);
            self.obstacles.push(obstacle);
        }

        tracing::debug!(
            agent = %agent_pos,
            target = %target_pos,
            obstacles = self.obstacles.len(),
            moving = n_moving,
            "arena reset"
        );

        agent_pos
    }

    fn spawn_obstacle<R: Rng + ?Sized>(&self, moving: bool, rng: &mut R) -> Obstacle {
        let area = self.inset_bounds(self.config.obstacle_edge_margin);
        let position = sample_free_position(
            rng,
            &area,
            Some(Keepout::new(
                self.agent_spawn,
                self.config.obstacle_agent_clearance,
            )),
        );
        let size = uniform(rng, self.config.obstacle_size_range);

        let motion = if moving {
            Motion::Moving {
                speed: uniform(rng, self.config.moving_speed_range),
                direction: random_unit_direction(rng),
            }
        } else {
            Motion::Static
        };

        Obstacle::new(generate_id(rng), position, size, motion)
    }

    /// Moves the target and every moving obstacle by one frame of `dt`.
    pub fn advance<R: Rng + ?Sized>(&mut self, dt: f64, rng: &mut R) {
        let bounds = self.movement_bounds();
        self.target
            .update(dt, &self.target_config, &bounds, rng);
        for obstacle in &mut self.obstacles {
            obstacle.update(dt, &bounds);
        }
    }

    /// Distance to the nearest obstacle hit along a unit `direction`.
    pub fn raycast(&self, origin: &Vec2, direction: &Vec2, max_distance: f64) -> Option<f64> {
        self.obstacles
            .iter()
            .filter_map(|o| o.footprint().ray_hit(origin, direction, max_distance))
            .min_by(|a, b| a.total_cmp(b))
    }

    /// First obstacle whose box overlaps the circle, if any.
    pub fn first_contact(&self, center: &Vec2, radius: f64) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.footprint().overlaps_circle(center, radius))
    }

    /// Places the target at a uniform random point inside the movement bounds.
    pub fn teleport_target<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let bounds = self.movement_bounds();
        self.target.teleport(&bounds, rng);
    }

    /// World-space view of the arena for an external visualiser.
    pub fn snapshot(&self, agent_position: Vec2) -> ArenaSnapshot {
        let lifted = self.config.ground_y + ENTITY_LIFT;
        ArenaSnapshot {
            half_extents: (self.config.half_extent_x, self.config.half_extent_z),
            agent: agent_position.to_world(self.config.ground_y),
            target: self.target.position.to_world(lifted),
            obstacles: self
                .obstacles
                .iter()
                .map(|o| ObstacleSnapshot {
                    id: o.id.clone(),
                    position: o.position.to_world(lifted),
                    size: o.size,
                    moving: o.is_moving(),
                })
                .collect(),
        }
    }
}

/// Plain-data picture of one frame.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ArenaSnapshot {
    pub half_extents: (f64, f64),
    pub agent: [f64; 3],
    pub target: [f64; 3],
    pub obstacles: Vec<ObstacleSnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ObstacleSnapshot {
    pub id: Id,
    pub position: [f64; 3],
    pub size: f64,
    pub moving: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> Arena {
        Arena::new(ArenaConfig::default(), TargetConfig::default())
    }

    #[test]
    fn reset_spawns_configured_obstacles() {
        let mut a = arena();
        let mut rng = StdRng::seed_from_u64(42);
        a.reset(&mut rng);
        assert_eq!(a.obstacles.len(), 20);
        let moving = a.obstacles.iter().filter(|o| o.is_moving()).count();
        assert_eq!(moving, 5);
        // moving obstacles come first
        assert!(a.obstacles[..5].iter().all(|o| o.is_moving()));

        let (lo, hi) = a.config.moving_speed_range;
        for o in &a.obstacles[..5] {
            match o.motion {
                Motion::Moving { direction, speed } => {
                    assert!((lo..=hi).contains(&speed));
                    assert!((direction.length() - 1.0).abs() < 1e-9);
                }
                Motion::Static => panic!("expected a moving obstacle"),
            }
        }
    }

    #[test]
    fn same_seed_gives_identical_layout() {
        let mut a = arena();
        let mut b = arena();
        a.reset(&mut StdRng::seed_from_u64(9));
        let agent = b.reset(&mut StdRng::seed_from_u64(9));
        assert_eq!(a.snapshot(agent), b.snapshot(agent));
        assert_eq!(a.obstacles[0].id.len(), 36);
    }

    #[test]
    fn reset_replaces_previous_obstacles() {
        let mut a = arena();
        let mut rng = StdRng::seed_from_u64(1);
        a.reset(&mut rng);
        let first_ids: Vec<_> = a.obstacles.iter().map(|o| o.id.clone()).collect();
        a.reset(&mut rng);
        assert_eq!(a.obstacles.len(), 20);
        assert!(a.obstacles.iter().all(|o| !first_ids.contains(&o.id)));
    }

    #[test]
    fn spawns_lie_within_margins() {
        let mut a = arena();
        let mut rng = StdRng::seed_from_u64(2024);
        let spawn_area = a.inset_bounds(a.config.agent_edge_margin);
        let obstacle_area = a.inset_bounds(a.config.obstacle_edge_margin);
        for _ in 0..200 {
            let agent = a.reset(&mut rng);
            assert!(spawn_area.contains(&agent));
            assert!(spawn_area.contains(&a.target.position));
            for o in &a.obstacles {
                assert!(obstacle_area.contains(&o.position));
                assert!((0.6..=2.0).contains(&o.size));
            }
        }
    }

    #[test]
    fn target_and_obstacles_keep_clear_of_agent() {
        let mut a = arena();
        let mut rng = StdRng::seed_from_u64(77);
        for _ in 0..100 {
            let agent = a.reset(&mut rng);
            let t = a.target.position;
            assert!(t.distance_to(&agent) >= 6.0 || t == Vec2::ZERO);
            for o in &a.obstacles {
                assert!(o.position.distance_to(&agent) >= 2.5 || o.position == Vec2::ZERO);
            }
        }
    }

    #[test]
    fn raycast_returns_nearest_hit() {
        let mut a = arena();
        a.obstacles = vec![
            Obstacle::new("far".into(), Vec2::new(0.0, 6.0), 1.0, Motion::Static),
            Obstacle::new("near".into(), Vec2::new(0.0, 3.0), 1.0, Motion::Static),
        ];
        let hit = a.raycast(&Vec2::ZERO, &Vec2::new(0.0, 1.0), 8.0);
        assert!((hit.unwrap() - 2.5).abs() < 1e-10);
        assert!(a.raycast(&Vec2::ZERO, &Vec2::new(1.0, 0.0), 8.0).is_none());
    }

    #[test]
    fn first_contact_detects_overlap() {
        let mut a = arena();
        a.obstacles = vec![Obstacle::new(
            "box".into(),
            Vec2::new(2.0, 0.0),
            2.0,
            Motion::Static,
        )];
        assert!(a.first_contact(&Vec2::new(0.6, 0.0), 0.5).is_some());
        assert!(a.first_contact(&Vec2::new(0.0, 0.0), 0.5).is_none());
    }

    #[test]
    fn advance_keeps_everything_inside() {
        let mut a = arena();
        a.config.moving_obstacle_ratio = 1.0;
        let mut rng = StdRng::seed_from_u64(8);
        a.reset(&mut rng);
        let bounds = a.movement_bounds();
        for _ in 0..2000 {
            a.advance(0.02, &mut rng);
            assert!(bounds.contains(&a.target.position));
            assert!(a.obstacles.iter().all(|o| bounds.contains(&o.position)));
        }
    }

    #[test]
    fn snapshot_lifts_entities() {
        let mut a = arena();
        a.config.ground_y = 2.0;
        let mut rng = StdRng::seed_from_u64(9);
        let agent = a.reset(&mut rng);
        let snap = a.snapshot(agent);
        assert_eq!(snap.agent[1], 2.0);
        assert_eq!(snap.target[1], 2.5);
        assert_eq!(snap.obstacles.len(), a.obstacles.len());
        assert!(snap.obstacles.iter().all(|o| o.position[1] == 2.5));
    }
}
