// src/analysis/stockout.rs

use crate::error::Result;
use crate::model::dataset::Dataset;
use crate::query::{group_by, RunningStats};
use serde::Serialize;
use tracing::debug;

// Severity weights.
const SEVERITY_PER_EVENT: f64 = 30.0;
const SEVERITY_PER_DAY: f64 = 10.0;
const REVENUE_PER_SEVERITY_POINT: f64 = 100.0;

/// # Formula
/// severity = count * 30 + avg_duration_days * 10 + lost_revenue / 100
pub fn severity_score(stockout_count: usize, avg_duration_days: f64, lost_revenue: f64) -> f64 {
    stockout_count as f64 * SEVERITY_PER_EVENT
        + avg_duration_days * SEVERITY_PER_DAY
        + lost_revenue / REVENUE_PER_SEVERITY_POINT
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockoutImpactRow {
    pub warehouse_code: String,
    pub sku: String,
    pub product_name: String,
    pub stockout_count: usize,
    pub avg_duration_days: f64,
    pub total_lost_units: i64,
    pub total_lost_revenue: f64,
    pub severity_score: f64,
}

/// Stockout impact per (warehouse, product), most severe first.
pub fn stockout_impact(dataset: &Dataset) -> Result<Vec<StockoutImpactRow>> {
    let events = group_by(dataset.stockout_events(), |e| (e.warehouse_id, e.product_id));

    let mut rows = Vec::with_capacity(events.len());
    for ((warehouse_id, product_id), events) in events {
        let warehouse = dataset.require_warehouse("stockout_events", warehouse_id)?;
        let product = dataset.require_product("stockout_events", product_id)?;

        let durations: RunningStats = events.iter().map(|e| e.duration_days() as f64).collect();
        let avg_duration_days = durations.mean().unwrap_or(0.0);
        let total_lost_units = events.iter().map(|e| e.demand_during_stockout).sum();
        let total_lost_revenue: f64 = events.iter().map(|e| e.lost_sales_amount).sum();

        rows.push(StockoutImpactRow {
            warehouse_code: warehouse.warehouse_code.clone(),
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            stockout_count: events.len(),
            avg_duration_days,
            total_lost_units,
            total_lost_revenue,
            severity_score: severity_score(events.len(), avg_duration_days, total_lost_revenue),
        });
    }

    // Stable: equal scores keep (warehouse_id, product_id) order.
    rows.sort_by(|a, b| b.severity_score.total_cmp(&a.severity_score));

    debug!(rows = rows.len(), "stockout impact");
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RootCauseRow {
    pub root_cause: String,
    pub occurrence_count: usize,
    pub total_lost_revenue: f64,
    pub total_lost_units: i64,
    pub pct_of_stockouts: f64,
}

/// Stockout events per root cause, most frequent first, ties by cause name.
pub fn root_cause_analysis(dataset: &Dataset) -> Vec<RootCauseRow> {
    let total_events = dataset.stockout_events().len();
    if total_events == 0 {
        return Vec::new();
    }

    let mut rows: Vec<RootCauseRow> = group_by(dataset.stockout_events(), |e| e.root_cause.clone())
        .into_iter()
        .map(|(root_cause, events)| RootCauseRow {
            root_cause,
            occurrence_count: events.len(),
            total_lost_revenue: events.iter().map(|e| e.lost_sales_amount).sum(),
            total_lost_units: events.iter().map(|e| e.demand_during_stockout).sum(),
            pct_of_stockouts: events.len() as f64 / total_events as f64 * 100.0,
        })
        .collect();
    rows.sort_by(|a, b| b.occurrence_count.cmp(&a.occurrence_count));

    debug!(rows = rows.len(), "root causes");
    rows
}
