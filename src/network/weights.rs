use std::path::PathBuf;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};
use crate::math::matrix::Matrix;
use crate::network::topology::{Topology, NUM_WEIGHT_LAYERS};

/// How a network's weights are initialised at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum WeightInit {
    /// Every weight drawn uniformly from `[min, max)`.
    Randomize { min: f64, max: f64 },
    /// Weights read from a checkpoint file.
    FromFile(PathBuf),
}

/// All trainable parameters: one matrix per layer transition.
///
/// `layers[l].data[source][dest]` is the weight from unit `source` of layer
/// `l` to unit `dest` of layer `l + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeightTensor {
    layers: [Matrix; NUM_WEIGHT_LAYERS],
}

impl WeightTensor {
    pub fn zeros(topology: &Topology) -> WeightTensor {
        WeightTensor::filled(topology, 0.0)
    }

    pub fn filled(topology: &Topology, value: f64) -> WeightTensor {
        WeightTensor {
            layers: std::array::from_fn(|l| {
                let (rows, cols) = topology.weight_shape(l);
                Matrix::filled(rows, cols, value)
            }),
        }
    }

    /// Uniform weights on `[min, max)`. Fails unless `min < max` and both are finite.
    pub fn random<R: Rng>(
        topology: &Topology,
        min: f64,
        max: f64,
        rng: &mut R,
    ) -> Result<WeightTensor> {
        check_random_range(min, max)?;
        Ok(WeightTensor {
            layers: std::array::from_fn(|l| {
                let (rows, cols) = topology.weight_shape(l);
                Matrix::uniform(rows, cols, min, max, rng)
            }),
        })
    }

    /// Wraps three matrices; their shapes must chain (`cols` of one equal to
    /// `rows` of the next).
    pub fn from_layers(layers: [Matrix; NUM_WEIGHT_LAYERS]) -> Result<WeightTensor> {
        for l in 0..NUM_WEIGHT_LAYERS {
            let m = &layers[l];
            if m.data.len() != m.rows || m.data.iter().any(|row| row.len() != m.cols) {
                return Err(NetworkError::Validation(format!(
                    "weight layer {} is ragged for declared shape {}x{}",
                    l, m.rows, m.cols
                )));
            }
            if l + 1 < NUM_WEIGHT_LAYERS && m.cols != layers[l + 1].rows {
                return Err(NetworkError::Validation(format!(
                    "weight layer {} has {} destinations but layer {} has {} sources",
                    l,
                    m.cols,
                    l + 1,
                    layers[l + 1].rows
                )));
            }
        }
        Ok(WeightTensor { layers })
    }

    pub fn layer(&self, l: usize) -> &Matrix {
        &self.layers[l]
    }

    pub fn layers(&self) -> &[Matrix; NUM_WEIGHT_LAYERS] {
        &self.layers
    }

    pub(crate) fn layers_mut(&mut self) -> &mut [Matrix; NUM_WEIGHT_LAYERS] {
        &mut self.layers
    }

    pub fn get(&self, l: usize, source: usize, dest: usize) -> f64 {
        self.layers[l].data[source][dest]
    }

    pub fn set(&mut self, l: usize, source: usize, dest: usize, value: f64) {
        self.layers[l].data[source][dest] = value;
    }

    /// Layer sizes implied by the matrix shapes.
    pub fn sizes(&self) -> Vec<usize> {
        let mut sizes: Vec<usize> = self.layers.iter().map(|m| m.rows).collect();
        sizes.push(self.layers[NUM_WEIGHT_LAYERS - 1].cols);
        sizes
    }

    /// Checks that every matrix has the shape `topology` demands.
    pub fn check_shape(&self, topology: &Topology) -> Result<()> {
        let sizes = self.sizes();
        if sizes.as_slice() != topology.sizes().as_slice() {
            return Err(NetworkError::Validation(format!(
                "the provided weight layer sizes ({}) do not match the network layer sizes ({})",
                crate::network::topology::join_sizes(&sizes),
                topology
            )));
        }
        Ok(())
    }
}

pub(crate) fn check_random_range(min: f64, max: f64) -> Result<()> {
    if !(min.is_finite() && max.is_finite() && min < max) {
        return Err(NetworkError::Config(format!(
            "random weight range [{}, {}) is empty; the minimum must be below the maximum",
            min, max
        )));
    }
    Ok(())
}
