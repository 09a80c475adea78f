//! Supply-chain analytics over a snapshot of ERP-style CSV tables: ABC
//! classification, inventory turnover and carrying cost, dynamic reorder
//! points and EOQ, supplier scoring, demand forecasting and stockout impact.

pub mod analysis;
pub mod error;
pub mod forecast;
pub mod io;
pub mod logging;
pub mod model;
pub mod query;

#[cfg(test)]
pub mod testing;

pub use analysis::{AnalyticsConfig, Report};
pub use error::{AnalyticsError, Result};
pub use io::load_dataset;
pub use model::{Dataset, Tables};
