// Theme score pipeline — aggregation, smoothing, log normalization.

pub mod aggregate;
pub mod lognorm;
pub mod pipeline;
pub mod profile;
pub mod smooth;
