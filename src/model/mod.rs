pub mod dataset;
pub mod records;

pub use dataset::{Dataset, Tables};
