//! Plain-text tables and summaries printed by the command-line driver, plus
//! the JSON training report.
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::network::weights::WeightInit;
use crate::train::epoch_stats::StoppingState;

const SMALL: usize = 10;
const MEDIUM: usize = 15;
const BIG: usize = 30;

/// Network outputs per member.
pub fn output_table(outputs: &[Vec<f64>]) -> String {
    let width = outputs.first().map_or(0, Vec::len);
    let mut out = format!("{:<SMALL$}", "Member #");
    for i in 0..width {
        out.push_str(&format!("{:<SMALL$}", format!("F_i[{}]", i)));
    }
    out.push('\n');
    for (member, row) in outputs.iter().enumerate() {
        out.push_str(&format!("{:<SMALL$}", format!("Member {}", member)));
        for f in row {
            out.push_str(&format!("{:<SMALL$}", f));
        }
        out.push('\n');
    }
    out
}

/// Targets next to network outputs, per member.
pub fn comparison_table(targets: &[Vec<f64>], outputs: &[Vec<f64>]) -> String {
    let width = outputs.first().map_or(0, Vec::len);
    let mut out = format!("{:<MEDIUM$}", "Member #");
    for i in 0..width {
        out.push_str(&format!("{:<SMALL$}{:<BIG$}", format!("T_i[{}]", i), format!("F_i[{}]", i)));
    }
    out.push('\n');
    for (member, (target, output)) in targets.iter().zip(outputs).enumerate() {
        out.push_str(&format!("{:<MEDIUM$}", format!("Member {}", member)));
        for (t, f) in target.iter().zip(output) {
            out.push_str(&format!("{:<SMALL$}{:<BIG$}", t, f));
        }
        out.push('\n');
    }
    out
}

/// Network shape and weight setup.
pub fn network_summary(config: &NetworkConfig) -> String {
    let sizes = config.topology.sizes();
    let weights = match &config.weight_init {
        WeightInit::Randomize { min, max } => {
            format!("Randomized weights in the range [{}, {})", min, max)
        }
        WeightInit::FromFile(path) => format!("Loaded weights from file {}", path.display()),
    };
    [
        format!("NUM_INPUT_UNITS = {}", sizes[0]),
        format!("NUM_HIDDEN_UNITS = {},{}", sizes[1], sizes[2]),
        format!("NUM_OUTPUT_UNITS = {}", sizes[3]),
        weights,
        format!("allocateForTraining = {}", config.allocate_for_training),
    ]
    .iter()
    .map(|line| format!("{}\n", line))
    .collect()
}

/// Outcome of a training run followed by the parameters that produced it.
pub fn training_summary(config: &NetworkConfig, stopping: &StoppingState) -> String {
    let outcome = [
        format!("numIterations = {}", stopping.iterations_completed),
        format!("maximumSetError = {}", stopping.worst_example_error),
        format!("maxIterationsReached = {}", stopping.max_iterations_reached),
        format!("errorThresholdSatisfied = {}", stopping.error_threshold_satisfied),
        format!("Milliseconds elapsed during training = {}", stopping.elapsed_ms),
        format!("lambda = {}", config.training.learning_rate),
        format!("errorThreshold = {}", config.training.error_threshold),
        format!("maxIterations = {}", config.training.max_iterations),
    ];
    let checkpoints = [
        format!("weightsOutputFile: {}", config.checkpoints.output_path.display()),
        format!("saveWeightsEvery: {}", config.checkpoints.save_every),
        format!("saveWeightsAtEnd: {}", config.checkpoints.save_at_end),
    ];
    let mut out = outcome.join("\n");
    out.push('\n');
    out.push_str(&network_summary(config));
    out.push_str(&checkpoints.join("\n"));
    out.push('\n');
    out
}

/// Everything needed to reproduce and judge a training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    pub config: NetworkConfig,
    pub stopping: StoppingState,
}

impl TrainingReport {
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(|e| NetworkError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::Other, e),
        })?;
        std::fs::write(path, json).map_err(|source| NetworkError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}
