//! Evaluation metrics for the navigation environment.
//!
//! Runs a policy for a number of episodes and aggregates how they ended.

use std::fmt;

use super::environment::{EpisodeOutcome, NavigationEnv};
use super::error::EnvError;
use super::policy::Policy;

/// Aggregated evaluation metrics over multiple episodes.
#[derive(Debug, Clone)]
pub struct EvaluationMetrics {
    /// Fraction of episodes that reached the target.
    pub success_rate: f64,
    /// Fraction of episodes that ended on an obstacle.
    pub collision_rate: f64,
    /// Fraction of episodes cut off by the step budget.
    pub truncation_rate: f64,
    /// Mean cumulative reward per episode.
    pub mean_cumulative_reward: f64,
    /// Mean simulation steps per episode.
    pub mean_steps: f64,
    /// Mean steps of the successful episodes (0 when none succeeded).
    pub mean_steps_to_goal: f64,
    /// Number of episodes evaluated.
    pub n_episodes: usize,
}

#[derive(Debug)]
struct EpisodeStats {
    outcome: EpisodeOutcome,
    steps: u32,
    cumulative_reward: f64,
}

impl EvaluationMetrics {
    /// Evaluates a policy over multiple episodes and returns aggregated metrics.
    ///
    /// Set a step budget (`timing.max_steps`) on the environment, otherwise a
    /// policy that neither scores nor crashes never finishes an episode.
    ///
    /// # Arguments
    ///
    /// * `env` - The environment to evaluate in
    /// * `policy` - The policy to evaluate
    /// * `n_episodes` - Number of episodes to run
    pub fn evaluate(
        env: &mut NavigationEnv,
        policy: &mut dyn Policy,
        n_episodes: usize,
    ) -> Result<Self, EnvError> {
        let mut all_stats = Vec::with_capacity(n_episodes);

        for _ in 0..n_episodes {
            let mut obs = env.reset();
            loop {
                let action = policy.select_action(&obs);
                let result = env.step(&action)?;
                obs = result.observation;
                if result.done {
                    all_stats.push(EpisodeStats {
                        outcome: result.outcome,
                        steps: result.steps,
                        cumulative_reward: env.cumulative_reward(),
                    });
                    break;
                }
            }
        }

        Ok(Self::aggregate(&all_stats))
    }

    fn aggregate(all_stats: &[EpisodeStats]) -> Self {
        let n_episodes = all_stats.len();
        let n = n_episodes.max(1) as f64;
        let rate = |outcome: EpisodeOutcome| {
            all_stats.iter().filter(|s| s.outcome == outcome).count() as f64 / n
        };

        let successes: Vec<_> = all_stats
            .iter()
            .filter(|s| s.outcome == EpisodeOutcome::GoalReached)
            .collect();
        let mean_steps_to_goal = if successes.is_empty() {
            0.0
        } else {
            successes.iter().map(|s| s.steps as f64).sum::<f64>() / successes.len() as f64
        };

        Self {
            success_rate: rate(EpisodeOutcome::GoalReached),
            collision_rate: rate(EpisodeOutcome::Collision),
            truncation_rate: rate(EpisodeOutcome::Truncated),
            mean_cumulative_reward: all_stats.iter().map(|s| s.cumulative_reward).sum::<f64>()
                / n,
            mean_steps: all_stats.iter().map(|s| s.steps as f64).sum::<f64>() / n,
            mean_steps_to_goal,
            n_episodes,
        }
    }
}

impl fmt::Display for EvaluationMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "=== Evaluation Metrics ({} episodes) ===",
            self.n_episodes
        )?;
        writeln!(
            f,
            "  Success rate:            {:.1}%",
            self.success_rate * 100.0
        )?;
        writeln!(
            f,
            "  Collision rate:          {:.1}%",
            self.collision_rate * 100.0
        )?;
        writeln!(
            f,
            "  Truncation rate:         {:.1}%",
            self.truncation_rate * 100.0
        )?;
        writeln!(f, "  Mean steps:              {:.1}", self.mean_steps)?;
        writeln!(
            f,
            "  Mean steps to goal:      {:.1}",
            self.mean_steps_to_goal
        )?;
        writeln!(
            f,
            "  Mean cumulative reward:  {:.3}",
            self.mean_cumulative_reward
        )
    }
}
