use std::time::Instant;

use tracing::info;

use crate::error::{NetworkError, Result};
use crate::network::network::Network;
use crate::train::epoch_stats::StoppingState;
use crate::train::train_config::{CheckpointPolicy, TrainingConfig};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Trains `network` on every example, in order, until the worst per-example
/// error of an epoch drops below `config.error_threshold` or
/// `config.max_iterations` epochs have completed. Checkpoints are written to
/// `policy.output_path`.
///
/// At least one epoch always runs.
pub fn train_on_set(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainingConfig,
    policy: &CheckpointPolicy,
) -> Result<StoppingState> {
    train_on_set_with(network, inputs, targets, config, policy, |network, iteration| {
        network.save_weights(&policy.output_path)?;
        info!(iteration, path = %policy.output_path.display(), "checkpointed weights");
        Ok(())
    })
}

/// Like [`train_on_set`], but hands each checkpoint to `on_checkpoint`
/// together with the iteration it belongs to.
///
/// # Errors
/// - `Config` if the network has no training buffers
/// - `Validation` if the sets differ in length or any example has the wrong
///   width; nothing is trained in that case
/// - whatever `on_checkpoint` returns; training stops there and the weights
///   keep every update made so far
pub fn train_on_set_with<F>(
    network: &mut Network,
    inputs: &[Vec<f64>],
    targets: &[Vec<f64>],
    config: &TrainingConfig,
    policy: &CheckpointPolicy,
    mut on_checkpoint: F,
) -> Result<StoppingState>
where
    F: FnMut(&Network, usize) -> Result<()>,
{
    validate_sets(network, inputs, targets)?;

    let t_start = Instant::now();
    let mut stopping = StoppingState::default();
    let mut saved_this_iteration = false;

    while !stopping.should_stop() {
        // ── One full pass over the example set ────────────────────────────
        let mut worst = 0.0;
        for (input, target) in inputs.iter().zip(targets) {
            let error = network.train_on_member(input, target, config.learning_rate)?;
            if worst < error {
                worst = error;
            }
        }

        stopping.iterations_completed += 1;
        stopping.worst_example_error = worst;
        stopping.max_iterations_reached = stopping.iterations_completed >= config.max_iterations;
        stopping.error_threshold_satisfied = worst < config.error_threshold;
        stopping.elapsed_ms = t_start.elapsed().as_millis() as u64;

        // ── Checkpoint ────────────────────────────────────────────────────
        saved_this_iteration = policy.saves_on(stopping.iterations_completed);
        if saved_this_iteration {
            on_checkpoint(network, stopping.iterations_completed)?;
        }

        if config.log_every != 0 && stopping.iterations_completed % config.log_every == 0 {
            info!(
                iteration = stopping.iterations_completed,
                error = stopping.worst_example_error,
                elapsed_ms = stopping.elapsed_ms,
                "completed iteration"
            );
        }
    }

    if policy.save_at_end && !saved_this_iteration {
        on_checkpoint(network, stopping.iterations_completed)?;
    }

    info!(
        iterations = stopping.iterations_completed,
        error = stopping.worst_example_error,
        threshold_satisfied = stopping.error_threshold_satisfied,
        max_iterations_reached = stopping.max_iterations_reached,
        elapsed_ms = stopping.elapsed_ms,
        "training finished"
    );
    Ok(stopping)
}

// ---------------------------------------------------------------------------
// Private helpers
// ---------------------------------------------------------------------------

fn validate_sets(network: &Network, inputs: &[Vec<f64>], targets: &[Vec<f64>]) -> Result<()> {
    if !network.is_allocated_for_training() {
        return Err(NetworkError::Config(
            "the network was not allocated for training".into(),
        ));
    }
    if inputs.len() != targets.len() {
        return Err(NetworkError::Validation(format!(
            "the input set has {} members but the target set has {}",
            inputs.len(),
            targets.len()
        )));
    }
    let topology = network.topology();
    for (input, target) in inputs.iter().zip(targets) {
        network.check_width("input", input.len(), topology.input_size())?;
        network.check_width("target", target.len(), topology.output_size())?;
    }
    Ok(())
}
