// src/io/reporting.rs

use crate::analysis::report::Report;
use crate::error::{AnalyticsError, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes result rows to a CSV file, header first.
///
/// # Arguments
/// * `path` - Destination file (e.g., "out/abc_classification.csv").
/// * `table` - Label used in errors.
/// * `rows` - Any serializable row type produced by the analyzers.
pub fn write_table<T: Serialize>(path: &Path, table: &'static str, rows: &[T]) -> Result<()> {
    let mut wtr =
        csv::Writer::from_path(path).map_err(|source| AnalyticsError::Csv { table, source })?;

    for row in rows {
        wtr.serialize(row)
            .map_err(|source| AnalyticsError::Csv { table, source })?;
    }

    // Flush the buffer to ensure all data is written
    wtr.flush().map_err(|source| AnalyticsError::Io {
        path: path.display().to_string(),
        source,
    })?;

    info!(table, rows = rows.len(), path = %path.display(), "exported");
    Ok(())
}

fn export<T: Serialize>(
    out_dir: &Path,
    table: &'static str,
    rows: &[T],
    written: &mut Vec<PathBuf>,
) -> Result<()> {
    let path = out_dir.join(format!("{table}.csv"));
    write_table(&path, table, rows)?;
    written.push(path);
    Ok(())
}

/// Writes one CSV per report table into `out_dir`, creating it if needed.
/// Returns the written paths in write order.
pub fn write_report(out_dir: &Path, report: &Report) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out_dir).map_err(|source| AnalyticsError::Io {
        path: out_dir.display().to_string(),
        source,
    })?;

    let mut written = Vec::new();
    export(out_dir, "abc_classification", &report.abc, &mut written)?;
    export(out_dir, "abc_summary", &report.abc_summary, &mut written)?;
    export(out_dir, "inventory_turnover", &report.turnover, &mut written)?;
    export(out_dir, "carrying_costs", &report.carrying_costs, &mut written)?;
    export(out_dir, "carrying_cost_by_warehouse", &report.carrying_by_warehouse, &mut written)?;
    export(out_dir, "reorder_points", &report.reorder_points, &mut written)?;
    export(out_dir, "economic_order_quantities", &report.eoq, &mut written)?;
    export(out_dir, "supplier_scores", &report.supplier_scores, &mut written)?;
    export(out_dir, "lead_time_variability", &report.lead_times, &mut written)?;
    export(out_dir, "stockout_impact", &report.stockouts, &mut written)?;
    export(out_dir, "root_causes", &report.root_causes, &mut written)?;
    Ok(written)
}
