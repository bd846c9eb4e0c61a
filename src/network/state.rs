use crate::network::topology::Topology;

/// Unit values of the layers computed by a forward pass.
///
/// The input layer is not stored: each pass borrows the caller's input slice
/// for its whole duration instead of copying it. Values left over from an
/// earlier pass carry no meaning.
#[derive(Debug, Clone, PartialEq)]
pub struct ActivationState {
    pub hidden1: Vec<f64>,
    pub hidden2: Vec<f64>,
    pub output: Vec<f64>,
}

impl ActivationState {
    pub fn new(topology: &Topology) -> ActivationState {
        ActivationState {
            hidden1: vec![0.0; topology.hidden1_size()],
            hidden2: vec![0.0; topology.hidden2_size()],
            output: vec![0.0; topology.output_size()],
        }
    }
}

/// Bookkeeping written by the detailed forward pass and consumed by the
/// backward pass of the same example.
///
/// Theta (pre-activation sums) only exists for the hidden layers. Psi (local
/// gradients) only exists for hidden-2 and the output; hidden-1's local
/// gradient is used once and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingBuffers {
    pub theta1: Vec<f64>,
    pub theta2: Vec<f64>,
    pub psi2: Vec<f64>,
    pub psi3: Vec<f64>,
}

impl TrainingBuffers {
    pub fn new(topology: &Topology) -> TrainingBuffers {
        TrainingBuffers {
            theta1: vec![0.0; topology.hidden1_size()],
            theta2: vec![0.0; topology.hidden2_size()],
            psi2: vec![0.0; topology.hidden2_size()],
            psi3: vec![0.0; topology.output_size()],
        }
    }
}
