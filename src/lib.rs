// Crema: theme affinity scoring and keyword networks for store reviews
//
// This is the library root. Each module corresponds to a major subsystem
// of the batch analytics pipeline.

pub mod config;
pub mod data;
pub mod network;
pub mod output;
pub mod scoring;
