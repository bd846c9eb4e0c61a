use crate::activation::activation::Tanh;
use crate::layers::dense::{feed_from, feed_from_recording, weighted_sum};
use crate::network::state::{ActivationState, TrainingBuffers};
use crate::network::weights::WeightTensor;

/// Inference pass: hidden-1, hidden-2 and output, no bookkeeping.
///
/// `input` must have the input-layer width; the caller checks this.
pub fn execute_without_details(weights: &WeightTensor, input: &[f64], state: &mut ActivationState) {
    feed_from(weights.layer(0), input, &mut state.hidden1);
    feed_from(weights.layer(1), &state.hidden1, &mut state.hidden2);
    feed_from(weights.layer(2), &state.hidden2, &mut state.output);
}

/// Training pass. Identical arithmetic to [`execute_without_details`], but
/// records Theta for both hidden layers and the output local gradient
///
/// `Psi3[i] = (target[i] - a3[i]) · f'(net_i)`
///
/// where `net_i` is the output pre-activation sum, which is not kept.
pub fn execute_with_details(
    weights: &WeightTensor,
    input: &[f64],
    targets: &[f64],
    state: &mut ActivationState,
    buffers: &mut TrainingBuffers,
) {
    feed_from_recording(weights.layer(0), input, &mut buffers.theta1, &mut state.hidden1);
    feed_from_recording(weights.layer(1), &state.hidden1, &mut buffers.theta2, &mut state.hidden2);

    let output_weights = weights.layer(2);
    for i in 0..state.output.len() {
        let net_i = weighted_sum(output_weights, &state.hidden2, i);
        state.output[i] = Tanh::function(net_i);
        buffers.psi3[i] = (targets[i] - state.output[i]) * Tanh::derivative(net_i);
    }
}
