pub mod trainer;
pub mod epoch_stats;
pub mod train_config;
pub mod loop_fn;

pub use trainer::backpropagate;
pub use epoch_stats::StoppingState;
pub use train_config::{CheckpointPolicy, TrainingConfig};
pub use loop_fn::{train_on_set, train_on_set_with};
