pub mod dataset;
pub mod scanner;
pub mod weights_file;
