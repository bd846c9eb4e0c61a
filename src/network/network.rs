use std::path::Path;

use rand::Rng;
use tracing::{debug, info};

use crate::config::NetworkConfig;
use crate::error::{NetworkError, Result};
use crate::files::weights_file;
use crate::loss::half_sse::HalfSquaredError;
use crate::network::forward::{execute_with_details, execute_without_details};
use crate::network::state::{ActivationState, TrainingBuffers};
use crate::network::topology::Topology;
use crate::network::weights::{WeightInit, WeightTensor};
use crate::train::trainer::backpropagate;

/// An A-B-C-D perceptron: input, two hidden layers, output.
///
/// The network exclusively owns its weights and unit values. Training
/// buffers are only allocated when asked for, so a network that only runs
/// carries nothing but weights and activations.
#[derive(Debug, Clone)]
pub struct Network {
    topology: Topology,
    weights: WeightTensor,
    state: ActivationState,
    training: Option<TrainingBuffers>,
}

impl Network {
    /// Allocates a network with every weight set to zero.
    pub fn new(topology: Topology, allocate_for_training: bool) -> Network {
        Network {
            topology,
            weights: WeightTensor::zeros(&topology),
            state: ActivationState::new(&topology),
            training: allocate_for_training.then(|| TrainingBuffers::new(&topology)),
        }
    }

    /// Builds and initialises a network as described by a parsed configuration file.
    pub fn from_config(config: &NetworkConfig) -> Result<Network> {
        let mut network = Network::new(config.topology, config.allocate_for_training);
        match &config.weight_init {
            WeightInit::Randomize { min, max } => {
                network.randomize_weights(*min, *max)?;
                info!(topology = %config.topology, min, max, "randomized weights");
            }
            WeightInit::FromFile(path) => {
                network.load_weights(path)?;
                info!(topology = %config.topology, path = %path.display(), "loaded weights");
            }
        }
        Ok(network)
    }

    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn weights(&self) -> &WeightTensor {
        &self.weights
    }

    pub fn is_allocated_for_training(&self) -> bool {
        self.training.is_some()
    }

    pub fn randomize_weights(&mut self, min: f64, max: f64) -> Result<()> {
        self.randomize_weights_with(&mut rand::thread_rng(), min, max)
    }

    pub fn randomize_weights_with<R: Rng>(&mut self, rng: &mut R, min: f64, max: f64) -> Result<()> {
        self.weights = WeightTensor::random(&self.topology, min, max, rng)?;
        Ok(())
    }

    /// Replaces all weights. The tensor's shape must match the topology.
    pub fn set_weights(&mut self, weights: WeightTensor) -> Result<()> {
        weights.check_shape(&self.topology)?;
        self.weights = weights;
        Ok(())
    }

    /// Reads a weight checkpoint. The file is fully parsed and validated
    /// before any weight changes.
    pub fn load_weights(&mut self, path: &Path) -> Result<()> {
        self.weights = weights_file::load(path, &self.topology)?;
        Ok(())
    }

    pub fn save_weights(&self, path: &Path) -> Result<()> {
        weights_file::save(path, &self.topology, &self.weights)
    }

    /// Inference on one example; returns the output units.
    pub fn run(&mut self, input: &[f64]) -> Result<&[f64]> {
        self.check_width("input", input.len(), self.topology.input_size())?;
        execute_without_details(&self.weights, input, &mut self.state);
        Ok(&self.state.output)
    }

    /// Inference on every example, in order.
    pub fn run_on_set(&mut self, inputs: &[Vec<f64>]) -> Result<Vec<Vec<f64>>> {
        for input in inputs {
            self.check_width("input", input.len(), self.topology.input_size())?;
        }
        Ok(inputs
            .iter()
            .map(|input| {
                execute_without_details(&self.weights, input, &mut self.state);
                self.state.output.clone()
            })
            .collect())
    }

    /// One online training step: detailed forward pass, then backpropagation.
    ///
    /// Returns the example's error, ½ Σ (target - output)², measured from the
    /// forward pass before the weights moved.
    pub fn train_on_member(&mut self, input: &[f64], target: &[f64], learning_rate: f64) -> Result<f64> {
        self.check_width("input", input.len(), self.topology.input_size())?;
        self.check_width("target", target.len(), self.topology.output_size())?;
        let buffers = self.training.as_mut().ok_or_else(|| {
            NetworkError::Config("the network was not allocated for training".into())
        })?;

        execute_with_details(&self.weights, input, target, &mut self.state, buffers);
        let error = HalfSquaredError::loss(&self.state.output, target);
        backpropagate(&mut self.weights, input, &self.state, buffers, learning_rate);
        Ok(error)
    }

    pub(crate) fn check_width(&self, what: &str, provided: usize, expected: usize) -> Result<()> {
        if provided != expected {
            debug!(what, provided, expected, "example width mismatch");
            return Err(NetworkError::Validation(format!(
                "the provided number of {} units ({}) does not match the network's ({})",
                what, provided, expected
            )));
        }
        Ok(())
    }
}
