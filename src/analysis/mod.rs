//! Analyzers over a validated [`Dataset`](crate::model::dataset::Dataset).
//!
//! Each public operation takes the snapshot plus its config and returns rows
//! ready for CSV export.

pub mod bands;
pub mod classification;
pub mod config;
pub mod formulas;
pub mod reorder;
pub mod report;
pub mod stockout;
pub mod supplier;

pub use classification::{
    abc_classification, abc_summary, carrying_cost_by_warehouse, carrying_costs,
    inventory_turnover,
};
pub use config::AnalyticsConfig;
pub use reorder::{economic_order_quantities, reorder_points};
pub use report::Report;
pub use stockout::{root_cause_analysis, stockout_impact};
pub use supplier::{lead_time_variability, supplier_scores};
