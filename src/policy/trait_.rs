//! Policy trait for the navigation environment.

/// A policy that maps an observation to a continuous action.
///
/// Actions are `[vx, vz]` desired-velocity commands in `[-1, 1]`.
pub trait Policy: Send + Sync {
    /// Selects an action given the agent's observation.
    ///
    /// # Arguments
    ///
    /// * `observation` - Observation vector (from [`ObservationBuilder`](crate::observation::ObservationBuilder))
    fn select_action(&mut self, observation: &[f64]) -> [f64; 2];

    /// Returns a human-readable name for this policy.
    fn name(&self) -> &str;
}
