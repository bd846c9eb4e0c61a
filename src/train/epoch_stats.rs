use serde::{Serialize, Deserialize};

/// Where a `train_on_set` run stands, updated once per completed epoch.
///
/// `worst_example_error` is the largest per-example error seen during the
/// last epoch, each measured right after that example's own forward pass.
/// Weights keep changing across the epoch, so this value describes the
/// weights as they were *during* the epoch, not the final weights.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoppingState {
    pub iterations_completed: usize,
    pub max_iterations_reached: bool,
    pub error_threshold_satisfied: bool,
    pub worst_example_error: f64,
    /// Wall-clock duration of the whole run in milliseconds.
    pub elapsed_ms: u64,
}

impl StoppingState {
    pub fn should_stop(&self) -> bool {
        self.max_iterations_reached || self.error_threshold_satisfied
    }
}
