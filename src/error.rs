// src/error.rs

use thiserror::Error;

/// Every failure the engine can surface. Nothing is retried or swallowed.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table '{table}': {source}")]
    Csv {
        table: &'static str,
        #[source]
        source: csv::Error,
    },

    #[error("schema error in table '{table}': {message}")]
    Schema { table: &'static str, message: String },

    #[error("duplicate key in table '{table}': {key}")]
    DuplicateKey { table: &'static str, key: String },

    #[error("table '{table}' references missing {entity} {id}")]
    MissingReference {
        table: &'static str,
        entity: &'static str,
        id: String,
    },

    #[error("unreadable configuration file {path}: {source}")]
    ConfigFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration for '{field}': {message}")]
    InvalidConfig { field: &'static str, message: String },

    #[error("holding cost must be positive for {sku} (got {value})")]
    InvalidHoldingCost { sku: String, value: f64 },

    #[error("supplier {supplier_code} has delivered line items with zero ordered quantity")]
    ZeroOrderedQuantity { supplier_code: String },
}

pub type Result<T> = std::result::Result<T, AnalyticsError>;

impl AnalyticsError {
    pub(crate) fn config(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    pub(crate) fn missing(table: &'static str, entity: &'static str, id: impl ToString) -> Self {
        Self::MissingReference {
            table,
            entity,
            id: id.to_string(),
        }
    }
}
