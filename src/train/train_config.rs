use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Epochs between progress log lines when nothing else is configured.
pub const DEFAULT_LOG_EVERY: usize = 20;

/// Hyperparameters for one `train_on_set` run.
///
/// # Fields
/// - `learning_rate`: λ, the step size of every weight update
/// - `error_threshold`: training stops once the worst per-example error of
///   an epoch falls strictly below this
/// - `max_iterations`: hard cap on completed epochs
/// - `log_every`: emit a progress line every this many epochs (0 = never)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    pub learning_rate: f64,
    pub error_threshold: f64,
    pub max_iterations: usize,
    #[serde(default = "default_log_every")]
    pub log_every: usize,
}

fn default_log_every() -> usize {
    DEFAULT_LOG_EVERY
}

impl TrainingConfig {
    pub fn new(learning_rate: f64, error_threshold: f64, max_iterations: usize) -> Self {
        TrainingConfig {
            learning_rate,
            error_threshold,
            max_iterations,
            log_every: DEFAULT_LOG_EVERY,
        }
    }

    pub fn with_log_every(mut self, log_every: usize) -> Self {
        self.log_every = log_every;
        self
    }
}

/// When and where weights are checkpointed during training.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointPolicy {
    pub output_path: PathBuf,
    /// Save whenever the iteration count is a positive multiple of this (0 = never).
    pub save_every: usize,
    /// Save once more after the last epoch unless that epoch already saved.
    pub save_at_end: bool,
}

impl CheckpointPolicy {
    /// A policy that never writes anything.
    pub fn disabled() -> Self {
        CheckpointPolicy {
            output_path: PathBuf::new(),
            save_every: 0,
            save_at_end: false,
        }
    }

    pub fn saves_on(&self, iteration: usize) -> bool {
        self.save_every != 0 && iteration % self.save_every == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_cadence_uses_positive_multiples() {
        let policy = CheckpointPolicy {
            output_path: PathBuf::from("w.txt"),
            save_every: 3,
            save_at_end: false,
        };
        let hits: Vec<usize> = (1..=10).filter(|&i| policy.saves_on(i)).collect();
        assert_eq!(hits, vec![3, 6, 9]);
        assert!(!CheckpointPolicy::disabled().saves_on(5));
    }

    #[test]
    fn with_log_every_keeps_the_other_fields() {
        let cfg = TrainingConfig::new(0.2, 0.01, 50).with_log_every(5);
        assert_eq!(cfg.log_every, 5);
        assert_eq!((cfg.learning_rate, cfg.error_threshold, cfg.max_iterations), (0.2, 0.01, 50));
    }

    #[test]
    fn log_every_defaults_when_missing_from_json() {
        let cfg: TrainingConfig = serde_json::from_str(
            r#"{"learning_rate":0.3,"error_threshold":0.001,"max_iterations":10}"#,
        )
        .unwrap();
        assert_eq!(cfg, TrainingConfig::new(0.3, 0.001, 10));
    }
}
