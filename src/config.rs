//! Network configuration file.
//!
//! Four sections, in order: layer sizes, weight initialisation, training
//! parameters, weight output.
//!
//! ```text
//! LAYER_SIZES:2-5-5-1
//! randomizeWeights:true
//! RANDOM_WEIGHT_MIN:-1.0
//! RANDOM_WEIGHT_MAX:1.0
//! weightsInputFilename:weights.txt
//! allocateForTraining:true
//! lambda:0.3
//! errorThreshold:0.0002
//! maxIterations:100000
//! weightsOutputFilename:weights.txt
//! saveWeightsEvery:0
//! saveWeightsAtEnd:true
//! ```
//!
//! Relative file names resolve against the configuration file's directory.
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{read_text, NetworkError, Result};
use crate::files::scanner::{base_dir, TokenReader};
use crate::network::topology::Topology;
use crate::network::weights::{check_random_range, WeightInit};
use crate::train::train_config::{CheckpointPolicy, TrainingConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub topology: Topology,
    pub weight_init: WeightInit,
    pub allocate_for_training: bool,
    pub training: TrainingConfig,
    pub checkpoints: CheckpointPolicy,
}

impl NetworkConfig {
    /// Parses configuration text; relative paths are joined onto `base`.
    pub fn parse(text: &str, base: &Path) -> Result<NetworkConfig> {
        let mut reader = TokenReader::new("network configuration file", text);

        let sizes = reader.labeled_sizes("LAYER_SIZES")?;
        let topology = Topology::from_sizes(&sizes)?;

        let randomize: bool = reader.labeled_bool("randomizeWeights")?;
        let min: f64 = reader.labeled("RANDOM_WEIGHT_MIN")?;
        let max: f64 = reader.labeled("RANDOM_WEIGHT_MAX")?;
        let weights_input = reader.labeled_path("weightsInputFilename", base)?;
        let weight_init = if randomize {
            check_random_range(min, max)?;
            WeightInit::Randomize { min, max }
        } else {
            WeightInit::FromFile(weights_input)
        };

        let allocate_for_training = reader.labeled_bool("allocateForTraining")?;
        let learning_rate: f64 = reader.labeled("lambda")?;
        let error_threshold: f64 = reader.labeled("errorThreshold")?;
        let max_iterations: usize = reader.labeled("maxIterations")?;
        if allocate_for_training && !(learning_rate.is_finite() && learning_rate > 0.0) {
            return Err(NetworkError::Config(format!(
                "lambda must be a positive number, got {}",
                learning_rate
            )));
        }

        let output_path = reader.labeled_path("weightsOutputFilename", base)?;
        let save_every: usize = reader.labeled("saveWeightsEvery")?;
        let save_at_end = reader.labeled_bool("saveWeightsAtEnd")?;

        Ok(NetworkConfig {
            topology,
            weight_init,
            allocate_for_training,
            training: TrainingConfig::new(learning_rate, error_threshold, max_iterations),
            checkpoints: CheckpointPolicy {
                output_path,
                save_every,
                save_at_end,
            },
        })
    }

    pub fn load(path: &Path) -> Result<NetworkConfig> {
        let text = read_text("Network configuration", path)?;
        let config = NetworkConfig::parse(&text, &base_dir(path))?;
        debug!(path = %path.display(), topology = %config.topology, "read network configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    const SAMPLE: &str = "\
LAYER_SIZES:2-5-5-1
randomizeWeights:true
RANDOM_WEIGHT_MIN:-1.5
RANDOM_WEIGHT_MAX:1.5
weightsInputFilename:in.txt
allocateForTraining:true
lambda:0.3
errorThreshold:0.0002
maxIterations:100000
weightsOutputFilename:out.txt
saveWeightsEvery:500
saveWeightsAtEnd:true
";

    #[test]
    fn parses_every_section() {
        let cfg = NetworkConfig::parse(SAMPLE, Path::new("nets")).unwrap();
        assert_eq!(cfg.topology, Topology::new(2, 5, 5, 1).unwrap());
        assert_eq!(cfg.weight_init, WeightInit::Randomize { min: -1.5, max: 1.5 });
        assert!(cfg.allocate_for_training);
        assert_eq!(cfg.training, TrainingConfig::new(0.3, 0.0002, 100000));
        assert_eq!(cfg.checkpoints.output_path, PathBuf::from("nets/out.txt"));
        assert_eq!(cfg.checkpoints.save_every, 500);
        assert!(cfg.checkpoints.save_at_end);
    }

    #[test]
    fn paths_may_contain_commas() {
        let text = SAMPLE.replace("out.txt", "runs/2024,06/out.txt");
        let cfg = NetworkConfig::parse(&text, Path::new("nets")).unwrap();
        assert_eq!(cfg.checkpoints.output_path, PathBuf::from("nets/runs/2024,06/out.txt"));
        assert_eq!(cfg.checkpoints.save_every, 500);
    }

    #[test]
    fn file_mode_keeps_the_input_path() {
        let text = SAMPLE.replace("randomizeWeights:true", "randomizeWeights:false");
        let cfg = NetworkConfig::parse(&text, Path::new("")).unwrap();
        assert_eq!(cfg.weight_init, WeightInit::FromFile(PathBuf::from("in.txt")));
    }

    #[test]
    fn inverted_random_range_is_a_config_error() {
        let text = SAMPLE.replace("RANDOM_WEIGHT_MAX:1.5", "RANDOM_WEIGHT_MAX:-2");
        let err = NetworkConfig::parse(&text, Path::new("")).unwrap_err();
        assert!(matches!(err, NetworkError::Config(_)));
    }

    #[test]
    fn missing_trailing_fields_are_malformed() {
        let text: String = SAMPLE.lines().take(9).collect::<Vec<_>>().join("\n");
        let err = NetworkConfig::parse(&text, Path::new("")).unwrap_err();
        assert!(err.to_string().contains("too few arguments"), "{err}");
    }

    #[test]
    fn bad_layer_sizes_are_rejected() {
        let text = SAMPLE.replace("2-5-5-1", "2-5-1");
        assert!(matches!(
            NetworkConfig::parse(&text, Path::new("")),
            Err(NetworkError::Config(_))
        ));
        let text = SAMPLE.replace("2-5-5-1", "2-x-5-1");
        assert!(matches!(
            NetworkConfig::parse(&text, Path::new("")),
            Err(NetworkError::Malformed { .. })
        ));
    }
}
