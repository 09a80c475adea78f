// src/analysis/supplier.rs

use crate::analysis::bands::{
    consistency_score, lead_time_reliability, supplier_tier, LeadTimeReliability, SupplierTier,
};
use crate::analysis::config::{SupplierConfig, ZeroOrderedPolicy};
use crate::error::{AnalyticsError, Result};
use crate::model::dataset::Dataset;
use crate::query::joins::{deliveries, delivered_items, trailing_deliveries};
use crate::query::{group_by, RunningStats};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, warn};

/// Composite supplier score.
///
/// # Formula
/// score = on_time_rate * 0.4 + fill_rate * 0.4 + consistency_score
///
/// Rates are percentages and consistency is 5..=20 points, so the result tops
/// out at 100.
pub fn reliability_score(on_time_rate: f64, fill_rate: f64, consistency: u32) -> f64 {
    on_time_rate * 0.4 + fill_rate * 0.4 + f64::from(consistency)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierScoreRow {
    pub supplier_code: String,
    pub supplier_name: String,
    pub total_orders: usize,
    pub on_time_rate: f64,
    pub fill_rate: f64,
    pub avg_variance_days: f64,
    /// Empty with a single delivery.
    pub std_variance_days: Option<f64>,
    pub consistency_score: u32,
    pub quality_rating: f64,
    pub reliability_score: f64,
    pub tier: SupplierTier,
}

/// Scores every supplier with at least one delivered order in the trailing
/// window, in supplier id order. Suppliers whose delivered orders have no
/// line items are left out.
pub fn supplier_scores(dataset: &Dataset, config: &SupplierConfig) -> Result<Vec<SupplierScoreRow>> {
    let delivered = trailing_deliveries(dataset, config.lookback_days);

    let mut quantities: HashMap<_, (i64, i64)> = HashMap::new();
    for (delivery, item) in delivered_items(dataset, &delivered) {
        let totals = quantities.entry(delivery.order.supplier_id).or_default();
        totals.0 += item.quantity_ordered;
        totals.1 += item.quantity_received;
    }

    let mut rows = Vec::new();
    for (supplier_id, orders) in group_by(delivered, |d| d.order.supplier_id) {
        let supplier = dataset.require_supplier("purchase_orders", supplier_id)?;

        let on_time = orders.iter().filter(|d| d.is_on_time()).count();
        let on_time_rate = on_time as f64 / orders.len() as f64 * 100.0;

        let Some(&(ordered, received)) = quantities.get(&supplier_id) else {
            debug!(supplier = %supplier.supplier_code, "delivered orders carry no line items, skipped");
            continue;
        };
        let fill_rate = if ordered > 0 {
            received as f64 / ordered as f64 * 100.0
        } else {
            match config.zero_ordered {
                ZeroOrderedPolicy::Error => {
                    return Err(AnalyticsError::ZeroOrderedQuantity {
                        supplier_code: supplier.supplier_code.clone(),
                    })
                }
                ZeroOrderedPolicy::Zero => {
                    warn!(supplier = %supplier.supplier_code, "no ordered units, fill rate set to 0");
                    0.0
                }
            }
        };

        let variance: RunningStats = orders.iter().map(|d| d.variance_days() as f64).collect();
        let std_variance_days = variance.std_dev();
        let consistency = consistency_score(std_variance_days, config.undefined_variance);

        rows.push(SupplierScoreRow {
            supplier_code: supplier.supplier_code.clone(),
            supplier_name: supplier.supplier_name.clone(),
            total_orders: orders.len(),
            on_time_rate,
            fill_rate,
            avg_variance_days: variance.mean().unwrap_or(0.0),
            std_variance_days,
            consistency_score: consistency,
            quality_rating: supplier.quality_rating,
            reliability_score: reliability_score(on_time_rate, fill_rate, consistency),
            tier: supplier_tier(on_time_rate, fill_rate),
        });
    }

    debug!(rows = rows.len(), "supplier scores");
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeadTimeVariabilityRow {
    pub supplier_code: String,
    pub supplier_name: String,
    pub delivery_count: usize,
    pub avg_lead_time: f64,
    pub std_lead_time: Option<f64>,
    pub min_lead_time: i64,
    pub max_lead_time: i64,
    /// Coefficient of variation in percent; empty when undefined.
    pub cv_pct: Option<f64>,
    pub reliability_category: LeadTimeReliability,
}

/// Lead-time spread per supplier over its whole delivery history.
pub fn lead_time_variability(
    dataset: &Dataset,
    config: &SupplierConfig,
) -> Result<Vec<LeadTimeVariabilityRow>> {
    let mut rows = Vec::new();
    for (supplier_id, orders) in group_by(deliveries(dataset, None), |d| d.order.supplier_id) {
        let supplier = dataset.require_supplier("purchase_orders", supplier_id)?;
        let lead_times: Vec<i64> = orders.iter().map(|d| d.lead_time_days()).collect();
        let stats: RunningStats = lead_times.iter().map(|&days| days as f64).collect();

        let avg_lead_time = stats.mean().unwrap_or(0.0);
        let std_lead_time = stats.std_dev();
        let cv_pct = std_lead_time
            .filter(|_| avg_lead_time > 0.0)
            .map(|std| std / avg_lead_time * 100.0);

        rows.push(LeadTimeVariabilityRow {
            supplier_code: supplier.supplier_code.clone(),
            supplier_name: supplier.supplier_name.clone(),
            delivery_count: orders.len(),
            avg_lead_time,
            std_lead_time,
            min_lead_time: lead_times.iter().copied().min().unwrap_or(0),
            max_lead_time: lead_times.iter().copied().max().unwrap_or(0),
            cv_pct,
            reliability_category: lead_time_reliability(cv_pct, config.undefined_variance),
        });
    }

    debug!(rows = rows.len(), "lead time variability");
    Ok(rows)
}
