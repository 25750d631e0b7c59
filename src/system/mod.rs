pub mod collector;
pub mod gpu;
pub mod network;
pub mod process;
pub mod sampler;
pub mod snapshot;
pub mod source;
