pub mod forward;
pub mod network;
pub mod state;
pub mod topology;
pub mod weights;

pub use network::Network;
pub use topology::Topology;
pub use weights::{WeightInit, WeightTensor};
