// Input data model — observation store, theme catalogs, baselines.

pub mod baseline;
pub mod catalog;
pub mod dataset;
pub mod observations;
pub mod vocabulary;
