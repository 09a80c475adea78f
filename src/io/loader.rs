// src/io/loader.rs

use crate::error::{AnalyticsError, Result};
use crate::model::dataset::{Dataset, Tables};
use serde::de::DeserializeOwned;
use std::io;
use std::path::Path;
use tracing::{debug, info};

/// Reads `<table>.csv` from `dir` into typed rows.
///
/// Extra columns are ignored and fields are trimmed. A missing optional table
/// reads as empty; a missing required one is a schema error.
///
/// # Arguments
/// * `dir` - Directory holding one CSV file per table.
/// * `table` - File stem, also used to label errors.
/// * `required` - Whether the file must exist.
pub fn read_table<T: DeserializeOwned>(
    dir: &Path,
    table: &'static str,
    required: bool,
) -> Result<Vec<T>> {
    let path = dir.join(format!("{table}.csv"));
    if !path.is_file() {
        if required {
            return Err(AnalyticsError::Schema {
                table,
                message: format!("required file {} not found", path.display()),
            });
        }
        debug!(table, "optional table absent");
        return Ok(Vec::new());
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(&path)
        .map_err(|source| AnalyticsError::Csv { table, source })?;
    let rows = reader
        .deserialize()
        .collect::<std::result::Result<Vec<T>, csv::Error>>()
        .map_err(|source| row_error(table, source))?;

    debug!(table, rows = rows.len(), "table loaded");
    Ok(rows)
}

/// Values that do not fit their column (unknown status, bad number or date)
/// are schema errors; anything else is a CSV error.
fn row_error(table: &'static str, source: csv::Error) -> AnalyticsError {
    if matches!(source.kind(), csv::ErrorKind::Deserialize { .. }) {
        AnalyticsError::Schema {
            table,
            message: source.to_string(),
        }
    } else {
        AnalyticsError::Csv { table, source }
    }
}

/// Reads every table from `dir`. Optional tables may be absent.
pub fn load_tables(dir: &Path) -> Result<Tables> {
    if !dir.is_dir() {
        return Err(AnalyticsError::Io {
            path: dir.display().to_string(),
            source: io::Error::new(io::ErrorKind::NotFound, "data directory not found"),
        });
    }

    Ok(Tables {
        products: read_table(dir, "products", true)?,
        warehouses: read_table(dir, "warehouses", true)?,
        suppliers: read_table(dir, "suppliers", true)?,
        categories: read_table(dir, "product_categories", false)?,
        product_suppliers: read_table(dir, "product_suppliers", false)?,
        inventory: read_table(dir, "inventory", true)?,
        sales_orders: read_table(dir, "sales_orders", true)?,
        sales_order_items: read_table(dir, "sales_order_items", true)?,
        purchase_orders: read_table(dir, "purchase_orders", true)?,
        purchase_order_items: read_table(dir, "purchase_order_items", true)?,
        stockout_events: read_table(dir, "stockout_events", true)?,
    })
}

/// [`load_tables`] followed by snapshot validation.
pub fn load_dataset(dir: impl AsRef<Path>) -> Result<Dataset> {
    let dir = dir.as_ref();
    let dataset = Dataset::new(load_tables(dir)?)?;
    info!(
        dir = %dir.display(),
        products = dataset.products().len(),
        sales_orders = dataset.sales_orders().len(),
        purchase_orders = dataset.purchase_orders().len(),
        "dataset loaded"
    );
    Ok(dataset)
}
