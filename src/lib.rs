pub mod error;
pub mod math;
pub mod activation;
pub mod layers;
pub mod network;
pub mod loss;
pub mod train;
pub mod files;
pub mod config;
pub mod control;
pub mod report;

// Convenience re-exports
pub use error::{NetworkError, Result};
pub use math::matrix::Matrix;
pub use activation::activation::Tanh;
pub use network::network::Network;
pub use network::topology::Topology;
pub use network::weights::{WeightInit, WeightTensor};
pub use config::NetworkConfig;
pub use control::ControlFile;
pub use train::{train_on_set, train_on_set_with, CheckpointPolicy, StoppingState, TrainingConfig};
