pub mod loader;
pub mod reporting;

pub use loader::load_dataset;
pub use reporting::{write_report, write_table};
