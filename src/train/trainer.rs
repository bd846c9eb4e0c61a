use crate::{
    activation::activation::Tanh,
    network::state::{ActivationState, TrainingBuffers},
    network::weights::WeightTensor,
};

/// Applies one online gradient-descent step for the example whose detailed
/// forward pass just filled `state` and `buffers`.
///
/// Walks right to left. Each Omega accumulates the weight value *before* that
/// weight is updated, so every update uses the gradient at the pre-step point.
/// Hidden-1's local gradient feeds the input-layer weights directly and is
/// never stored.
pub fn backpropagate(
    weights: &mut WeightTensor,
    input: &[f64],
    state: &ActivationState,
    buffers: &mut TrainingBuffers,
    learning_rate: f64,
) {
    let [w0, w1, w2] = weights.layers_mut();

    // hidden-2 -> output
    for j in 0..state.hidden2.len() {
        let mut omega_j = 0.0;
        let row = &mut w2.data[j];
        for (i, &psi_i) in buffers.psi3.iter().enumerate() {
            omega_j += psi_i * row[i];
            row[i] += learning_rate * state.hidden2[j] * psi_i;
        }
        buffers.psi2[j] = omega_j * Tanh::derivative(buffers.theta2[j]);
    }

    // hidden-1 -> hidden-2, then input -> hidden-1
    for k in 0..state.hidden1.len() {
        let mut omega_k = 0.0;
        let row = &mut w1.data[k];
        for (j, &psi_j) in buffers.psi2.iter().enumerate() {
            omega_k += psi_j * row[j];
            row[j] += learning_rate * state.hidden1[k] * psi_j;
        }
        let psi_k = omega_k * Tanh::derivative(buffers.theta1[k]);

        for (m, &a_m) in input.iter().enumerate() {
            w0.data[m][k] += learning_rate * a_m * psi_k;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loss::half_sse::HalfSquaredError;
    use crate::network::forward::{execute_with_details, execute_without_details};
    use crate::network::topology::Topology;
    use approx::assert_relative_eq;
    use rand::{rngs::StdRng, SeedableRng};

    fn example_error(weights: &WeightTensor, topology: &Topology, input: &[f64], target: &[f64]) -> f64 {
        let mut state = ActivationState::new(topology);
        execute_without_details(weights, input, &mut state);
        HalfSquaredError::loss(&state.output, target)
    }

    #[test]
    fn update_is_a_descent_step_along_the_true_gradient() {
        let topology = Topology::new(3, 4, 3, 2).unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let before = WeightTensor::random(&topology, -1.0, 1.0, &mut rng).unwrap();
        let input = [0.5, -0.3, 0.8];
        let target = [0.2, -0.6];
        let lambda = 0.1;

        let mut after = before.clone();
        let mut state = ActivationState::new(&topology);
        let mut buffers = TrainingBuffers::new(&topology);
        execute_with_details(&after, &input, &target, &mut state, &mut buffers);
        backpropagate(&mut after, &input, &state, &mut buffers, lambda);

        // Δw = -λ ∂E/∂w, checked against central differences.
        let h = 1e-6;
        for l in 0..3 {
            let (rows, cols) = topology.weight_shape(l);
            for s in 0..rows {
                for d in 0..cols {
                    let mut plus = before.clone();
                    plus.set(l, s, d, before.get(l, s, d) + h);
                    let mut minus = before.clone();
                    minus.set(l, s, d, before.get(l, s, d) - h);
                    let grad = (example_error(&plus, &topology, &input, &target)
                        - example_error(&minus, &topology, &input, &target))
                        / (2.0 * h);
                    let delta = after.get(l, s, d) - before.get(l, s, d);
                    assert_relative_eq!(delta, -lambda * grad, epsilon = 1e-8);
                }
            }
        }
    }

    #[test]
    fn one_step_reduces_the_example_error() {
        let topology = Topology::new(2, 3, 3, 1).unwrap();
        let mut weights = WeightTensor::random(&topology, -0.5, 0.5, &mut StdRng::seed_from_u64(3)).unwrap();
        let input = [1.0, -1.0];
        let target = [0.7];
        let start = example_error(&weights, &topology, &input, &target);

        let mut state = ActivationState::new(&topology);
        let mut buffers = TrainingBuffers::new(&topology);
        execute_with_details(&weights, &input, &target, &mut state, &mut buffers);
        backpropagate(&mut weights, &input, &state, &mut buffers, 0.05);

        assert!(example_error(&weights, &topology, &input, &target) < start);
    }

    #[test]
    fn zero_input_leaves_input_weights_untouched() {
        let topology = Topology::new(2, 2, 2, 1).unwrap();
        let mut weights = WeightTensor::filled(&topology, 0.5);
        let original = weights.layer(0).clone();
        let mut state = ActivationState::new(&topology);
        let mut buffers = TrainingBuffers::new(&topology);
        execute_with_details(&weights, &[0.0, 0.0], &[1.0], &mut state, &mut buffers);
        backpropagate(&mut weights, &[0.0, 0.0], &state, &mut buffers, 0.3);
        assert_eq!(weights.layer(0), &original);
    }
}
