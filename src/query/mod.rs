//! A small in-memory query layer: position indexes, ordered group-by,
//! running statistics and the sales/purchase joins shared by the analyzers.

pub mod aggregate;
pub mod index;
pub mod joins;

pub use aggregate::{group_by, RunningStats};
pub use joins::{Delivery, SalesLine};
