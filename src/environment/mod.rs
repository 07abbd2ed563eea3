//! Episodic navigation environment.
//!
//! Each call to [`NavigationEnv::step`] is one decision: the action is held
//! for `decision_period` simulation steps, and every simulation step runs
//! act → shape → goal check → move → contact check → step budget.


use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::agent::NavigationAgent;
use crate::arena::{Arena, ArenaSnapshot};
use crate::config::EnvConfig;
use crate::error::EnvError;
use crate::observation::ObservationBuilder;
use crate::reward::RewardComputer;
use crate::types::Vec2;

/// How the current episode stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EpisodeOutcome {
    Running,
    /// The agent came within the goal threshold of the target.
    GoalReached,
    /// The agent touched an obstacle.
    Collision,
    /// The step budget ran out.
    Truncated,
}

impl EpisodeOutcome {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, EpisodeOutcome::Running)
    }
}

impl fmt::Display for EpisodeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeOutcome::Running => write!(f, "running"),
            EpisodeOutcome::GoalReached => write!(f, "goal"),
            EpisodeOutcome::Collision => write!(f, "collision"),
            EpisodeOutcome::Truncated => write!(f, "truncated"),
        }
    }
}

/// Result of a single decision step.
#[derive(Debug, Clone)]
pub struct StepResult {
    /// Observation after the step.
    pub observation: Vec<f64>,
    /// Reward summed over the simulation steps of this decision.
    pub reward: f64,
    /// Whether the episode is over.
    pub done: bool,
    pub outcome: EpisodeOutcome,
    /// Simulation steps taken so far this episode.
    pub steps: u32,
    pub distance_to_target: f64,
}

/// The single-agent navigation environment.
///
/// # Lifecycle
///
/// 1. Call [`NavigationEnv::new`] with configuration and seed.
/// 2. Call [`NavigationEnv::reset`] to lay out an episode.
/// 3. Repeatedly call [`NavigationEnv::step`] until `done`.
/// 4. Reset again; stepping a finished episode is an error.
#[derive(Debug)]
pub struct NavigationEnv {
    /// Fixed at construction; the arena holds its own copy of the arena and
    /// target sections.
    config: EnvConfig,
    pub arena: Arena,
    pub agent: NavigationAgent,
    /// Simulation steps taken this episode.
    steps: u32,
    /// `None` until the first reset.
    outcome: Option<EpisodeOutcome>,
    /// Reward accumulated this episode.
    cumulative_reward: f64,
    /// Random number generator.
    rng: StdRng,
    /// Seed for the next reset.
    seed: u64,
}

impl NavigationEnv {
    /// Creates a new environment after validating `config`.
    ///
    /// # Arguments
    ///
    /// * `config` - Environment, reward and timing configuration
    /// * `seed` - Seed of the first episode; each reset uses the next one
    pub fn new(config: EnvConfig, seed: u64) -> Result<Self, EnvError> {
        config.validate()?;
        let arena = Arena::new(config.arena.clone(), config.target.clone());
        Ok(Self {
            config,
            arena,
            agent: NavigationAgent::new(Vec2::ZERO),
            steps: 0,
            outcome: None,
            cumulative_reward: 0.0,
            rng: StdRng::seed_from_u64(seed),
            seed,
        })
    }

    /// The validated configuration this environment was built with.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Starts a new episode and returns its first observation.
    ///
    /// The agent stops, the arena is rebuilt around fresh spawn points and
    /// the progress baseline is set to the new target distance.
    pub fn reset(&mut self) -> Vec<f64> {
        self.rng = StdRng::seed_from_u64(self.seed);
        self.seed = self.seed.wrapping_add(1); // different layout each episode

        let spawn = self.arena.reset(&mut self.rng);
        self.agent.reset(spawn, &self.arena.target.position);

        self.steps = 0;
        self.cumulative_reward = 0.0;
        self.outcome = Some(EpisodeOutcome::Running);

        self.observe()
    }

    /// Applies `action` for one decision period.
    ///
    /// `action` is `[vx, vz]` in `[-1, 1]`; values are clipped, and buffers
    /// with fewer than two entries mean "no input". Stops early if the
    /// episode ends mid-period.
    pub fn step(&mut self, action: &[f64]) -> Result<StepResult, EnvError> {
        match self.outcome {
            None => return Err(EnvError::NotReset),
            Some(o) if o.is_terminal() => return Err(EnvError::EpisodeFinished),
            Some(_) => {}
        }
        if action.iter().any(|a| !a.is_finite()) {
            return Err(EnvError::NonFiniteAction);
        }

        let command = NavigationAgent::decode_action(action);
        let mut reward = 0.0;
        let mut outcome = EpisodeOutcome::Running;
        for _ in 0..self.config.timing.decision_period {
            let (r, o) = self.simulate(command);
            reward += r;
            outcome = o;
            if outcome.is_terminal() {
                break;
            }
        }
        self.cumulative_reward += reward;
        self.outcome = Some(outcome);

        let distance = self.distance_to_target();
        tracing::trace!(
            steps = self.steps,
            reward,
            distance,
            "decision step"
        );
        if outcome.is_terminal() {
            tracing::info!(
                outcome = %outcome,
                steps = self.steps,
                cumulative_reward = self.cumulative_reward,
                "episode finished"
            );
        }

        Ok(StepResult {
            observation: self.observe(),
            reward,
            done: outcome.is_terminal(),
            outcome,
            steps: self.steps,
            distance_to_target: distance,
        })
    }

    /// One fixed simulation step. Returns its reward and the resulting outcome.
    fn simulate(&mut self, command: Vec2) -> (f64, EpisodeOutcome) {
        let dt = self.config.timing.fixed_delta_time;
        let reward_cfg = &self.config.reward;

        self.agent.apply_action(command, &self.config.agent, dt);

        let distance = self.agent.distance_to(&self.arena.target.position);
        let mut reward =
            RewardComputer::shaping(self.agent.prev_distance_to_target, distance, reward_cfg);
        self.agent.prev_distance_to_target = distance;
        self.steps += 1;

        if RewardComputer::goal_reached(distance, reward_cfg) {
            return (
                reward + reward_cfg.goal_reward,
                EpisodeOutcome::GoalReached,
            );
        }

        let bounds = self.arena.movement_bounds();
        self.agent.integrate(dt, &bounds);
        self.arena.advance(dt, &mut self.rng);

        if let Some(hit) = self
            .arena
            .first_contact(&self.agent.position, self.config.agent.radius)
        {
            tracing::debug!(obstacle = %hit.id, at = %self.agent.position, "contact");
            reward += self.config.reward.collision_penalty;
            return (reward, EpisodeOutcome::Collision);
        }

        let max_steps = self.config.timing.max_steps;
        if max_steps > 0 && self.steps >= max_steps {
            return (reward, EpisodeOutcome::Truncated);
        }

        (reward, EpisodeOutcome::Running)
    }

    /// Observation of the current state.
    pub fn observe(&self) -> Vec<f64> {
        ObservationBuilder::build(&self.agent, &self.arena, &self.config)
    }

    /// Moves the target to a random spot and re-anchors the progress baseline.
    pub fn teleport_target(&mut self) {
        self.arena.teleport_target(&mut self.rng);
        self.agent.prev_distance_to_target = self.distance_to_target();
    }

    pub fn distance_to_target(&self) -> f64 {
        self.agent.distance_to(&self.arena.target.position)
    }

    /// World-space picture of agent, target and obstacles.
    pub fn snapshot(&self) -> ArenaSnapshot {
        self.arena.snapshot(self.agent.position)
    }

    pub fn observation_dim(&self) -> usize {
        self.config.observation_dim()
    }

    pub fn action_dim(&self) -> usize {
        EnvConfig::ACTION_DIM
    }

    /// Reward accumulated since the last reset.
    pub fn cumulative_reward(&self) -> f64 {
        self.cumulative_reward
    }

    /// Simulation steps taken since the last reset.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Current outcome, or `None` before the first reset.
    pub fn outcome(&self) -> Option<EpisodeOutcome> {
        self.outcome
    }
}
