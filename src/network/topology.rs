use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{NetworkError, Result};

/// Number of layers: input, hidden-1, hidden-2, output. Not configurable.
pub const NUM_LAYERS: usize = 4;

/// Number of weight matrices between adjacent layers.
pub const NUM_WEIGHT_LAYERS: usize = NUM_LAYERS - 1;

/// The four layer sizes of an A-B-C-D network. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<usize>", into = "Vec<usize>")]
pub struct Topology {
    sizes: [usize; NUM_LAYERS],
}

impl Topology {
    pub fn new(input: usize, hidden1: usize, hidden2: usize, output: usize) -> Result<Topology> {
        Topology::from_sizes(&[input, hidden1, hidden2, output])
    }

    /// Builds a topology from exactly four positive sizes.
    pub fn from_sizes(sizes: &[usize]) -> Result<Topology> {
        if sizes.len() != NUM_LAYERS {
            return Err(NetworkError::Config(format!(
                "expected {} layer sizes, got {} ({})",
                NUM_LAYERS,
                sizes.len(),
                join_sizes(sizes)
            )));
        }
        if let Some(layer) = sizes.iter().position(|&s| s == 0) {
            return Err(NetworkError::Config(format!(
                "layer {} has size 0; every layer needs at least one unit",
                layer
            )));
        }
        let mut fixed = [0; NUM_LAYERS];
        fixed.copy_from_slice(sizes);
        Ok(Topology { sizes: fixed })
    }

    pub fn sizes(&self) -> &[usize; NUM_LAYERS] {
        &self.sizes
    }

    pub fn input_size(&self) -> usize {
        self.sizes[0]
    }

    pub fn hidden1_size(&self) -> usize {
        self.sizes[1]
    }

    pub fn hidden2_size(&self) -> usize {
        self.sizes[2]
    }

    pub fn output_size(&self) -> usize {
        self.sizes[NUM_LAYERS - 1]
    }

    /// Shape `(source, destination)` of weight matrix `layer`.
    pub fn weight_shape(&self, layer: usize) -> (usize, usize) {
        (self.sizes[layer], self.sizes[layer + 1])
    }
}

/// Hyphen-joined sizes, e.g. `2-2-2-1`.
pub fn join_sizes(sizes: &[usize]) -> String {
    sizes.iter().map(usize::to_string).collect::<Vec<_>>().join("-")
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&join_sizes(&self.sizes))
    }
}

impl TryFrom<Vec<usize>> for Topology {
    type Error = NetworkError;

    fn try_from(sizes: Vec<usize>) -> Result<Topology> {
        Topology::from_sizes(&sizes)
    }
}

impl From<Topology> for Vec<usize> {
    fn from(topology: Topology) -> Vec<usize> {
        topology.sizes.to_vec()
    }
}
