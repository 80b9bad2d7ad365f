//! Variable Neighborhood Search configuration.

use crate::search::LocalSearchPolicy;

/// What local search runs after each shake.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescentMode {
    /// Local search on the neighborhood matching the current strength k.
    #[default]
    Matching,
    /// Variable neighborhood descent over task-shift then worker-swap,
    /// regardless of k.
    Vnd,
}

/// What happens once every strength `1..=k_max` failed in a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExhaustionPolicy {
    /// Stop the run and return the best solution.
    #[default]
    Stop,
    /// Reset k to 1 and keep searching until the iteration cap or the
    /// deadline.
    Restart,
}

/// Configuration parameters for Variable Neighborhood Search.
///
/// # Examples
///
/// ```
/// use u_alwabp::vns::{ExhaustionPolicy, VnsConfig};
///
/// let config = VnsConfig::default()
///     .with_max_iterations(1000)
///     .with_k_max(4)
///     .with_exhaustion_policy(ExhaustionPolicy::Restart);
/// assert_eq!(config.max_iterations, 1000);
/// assert_eq!(config.k_max, 4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VnsConfig {
    /// Maximum number of shake + local-search cycles.
    pub max_iterations: usize,
    /// Number of shaking strengths (K_MAX).
    pub k_max: usize,
    /// Move selection rule inside local search.
    pub local_search: LocalSearchPolicy,
    /// Which descent follows each shake.
    pub descent: DescentMode,
    /// Behavior after k exceeds `k_max`.
    pub on_exhaustion: ExhaustionPolicy,
    /// Random draws per shaking move before the move is skipped.
    pub shake_attempts: usize,
}

impl Default for VnsConfig {
    fn default() -> Self {
        Self {
            max_iterations: 500,
            k_max: 3,
            local_search: LocalSearchPolicy::BestImprovement,
            descent: DescentMode::Matching,
            on_exhaustion: ExhaustionPolicy::Stop,
            shake_attempts: 10,
        }
    }
}

impl VnsConfig {
    /// Sets the maximum number of shake + local-search cycles.
    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Sets K_MAX.
    pub fn with_k_max(mut self, k: usize) -> Self {
        self.k_max = k;
        self
    }

    /// Sets the local search policy.
    pub fn with_local_search(mut self, policy: LocalSearchPolicy) -> Self {
        self.local_search = policy;
        self
    }

    /// Sets the descent mode.
    pub fn with_descent(mut self, mode: DescentMode) -> Self {
        self.descent = mode;
        self
    }

    /// Sets the exhaustion policy.
    pub fn with_exhaustion_policy(mut self, policy: ExhaustionPolicy) -> Self {
        self.on_exhaustion = policy;
        self
    }

    /// Sets the number of draws per shaking move.
    pub fn with_shake_attempts(mut self, n: usize) -> Self {
        self.shake_attempts = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.max_iterations == 0 {
            return Err("max_iterations must be at least 1".into());
        }
        if self.k_max == 0 {
            return Err("k_max must be at least 1".into());
        }
        if self.shake_attempts == 0 {
            return Err("shake_attempts must be at least 1".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vns_config_defaults() {
        let config = VnsConfig::default();
        assert_eq!(config.max_iterations, 500);
        assert_eq!(config.k_max, 3);
        assert_eq!(config.local_search, LocalSearchPolicy::BestImprovement);
        assert_eq!(config.descent, DescentMode::Matching);
        assert_eq!(config.on_exhaustion, ExhaustionPolicy::Stop);
        assert_eq!(config.shake_attempts, 10);
    }

    #[test]
    fn test_vns_config_builder() {
        let config = VnsConfig::default()
            .with_max_iterations(1000)
            .with_k_max(5)
            .with_local_search(LocalSearchPolicy::FirstImprovement)
            .with_descent(DescentMode::Vnd)
            .with_shake_attempts(3);

        assert_eq!(config.max_iterations, 1000);
        assert_eq!(config.k_max, 5);
        assert_eq!(config.local_search, LocalSearchPolicy::FirstImprovement);
        assert_eq!(config.descent, DescentMode::Vnd);
        assert_eq!(config.shake_attempts, 3);
    }

    #[test]
    fn test_validate_rejects_zeroes() {
        assert!(VnsConfig::default().validate().is_ok());
        assert!(VnsConfig::default().with_max_iterations(0).validate().is_err());
        assert!(VnsConfig::default().with_k_max(0).validate().is_err());
        assert!(VnsConfig::default().with_shake_attempts(0).validate().is_err());
    }
}
