// src/analysis/reorder.rs

use crate::analysis::bands::{recommend, Recommendation};
use crate::analysis::config::{EoqConfig, ReorderConfig};
use crate::analysis::formulas::{
    economic_order_quantity, inverse_normal_cdf, optimal_inventory_cost, reorder_point,
    safety_stock, whole_units,
};
use crate::error::{AnalyticsError, Result};
use crate::model::dataset::Dataset;
use crate::model::records::{Product, ProductId, SupplierId, WarehouseId};
use crate::query::joins::{deliveries, trailing_sales_lines};
use crate::query::{group_by, RunningStats};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// σd fallback, as a fraction of mean daily demand, when only one day sold.
const DEMAND_STD_FALLBACK: f64 = 0.3;
/// σLT fallback, as a fraction of mean lead time, when there is one delivery
/// or no history at all.
const LEAD_TIME_STD_FALLBACK: f64 = 0.2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LeadTimeSource {
    /// Delivered purchase orders of the product's primary supplier.
    SupplierHistory,
    /// The product's static `lead_time_days`.
    ProductDefault,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LeadTime {
    pub mean: f64,
    pub std_dev: f64,
    pub source: LeadTimeSource,
}

impl LeadTime {
    fn product_default(product: &Product) -> Self {
        let mean = f64::from(product.lead_time_days);
        Self {
            mean,
            std_dev: mean * LEAD_TIME_STD_FALLBACK,
            source: LeadTimeSource::ProductDefault,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReorderRow {
    pub warehouse_code: String,
    pub sku: String,
    pub product_name: String,
    pub quantity_on_hand: i64,
    pub avg_daily_demand: f64,
    pub std_daily_demand: f64,
    pub days_with_demand: usize,
    pub avg_lead_time: f64,
    pub std_lead_time: f64,
    pub lead_time_source: LeadTimeSource,
    pub safety_stock: i64,
    pub current_rop: i64,
    pub calculated_rop: i64,
    pub rop_adjustment: i64,
    pub recommendation: Recommendation,
}

/// Lead-time statistics per supplier over every delivered purchase order.
pub fn supplier_lead_times(dataset: &Dataset) -> HashMap<SupplierId, LeadTime> {
    group_by(deliveries(dataset, None), |d| d.order.supplier_id)
        .into_iter()
        .filter_map(|(supplier_id, orders)| {
            let stats: RunningStats = orders.iter().map(|d| d.lead_time_days() as f64).collect();
            let mean = stats.mean()?;
            let lead_time = LeadTime {
                mean,
                std_dev: stats.std_dev().unwrap_or(mean * LEAD_TIME_STD_FALLBACK),
                source: LeadTimeSource::SupplierHistory,
            };
            Some((supplier_id, lead_time))
        })
        .collect()
}

/// The supplier whose history applies to each product: the one flagged
/// primary, else the first listed.
pub fn primary_suppliers(dataset: &Dataset) -> HashMap<ProductId, SupplierId> {
    let mut chosen: HashMap<ProductId, (SupplierId, bool)> = HashMap::new();
    for link in dataset.product_suppliers() {
        chosen
            .entry(link.product_id)
            .and_modify(|current| {
                if !current.1 && link.is_primary_supplier {
                    *current = (link.supplier_id, true);
                }
            })
            .or_insert((link.supplier_id, link.is_primary_supplier));
    }
    chosen
        .into_iter()
        .map(|(product_id, (supplier_id, _))| (product_id, supplier_id))
        .collect()
}

/// Dynamic reorder points from trailing demand and lead-time variability.
///
/// Daily demand is the per-date sum of ordered units for a (warehouse,
/// product); only dates with sales are observations. Pairs without window
/// demand or without an inventory record are not reported.
pub fn reorder_points(dataset: &Dataset, config: &ReorderConfig) -> Result<Vec<ReorderRow>> {
    config.validate()?;
    let z_score = inverse_normal_cdf(config.service_level);

    let mut daily: BTreeMap<(WarehouseId, ProductId, NaiveDate), i64> = BTreeMap::new();
    for line in trailing_sales_lines(dataset, config.lookback_days)? {
        *daily
            .entry((line.order.warehouse_id, line.item.product_id, line.order.order_date))
            .or_default() += line.item.quantity_ordered;
    }
    let mut demand: BTreeMap<(WarehouseId, ProductId), RunningStats> = BTreeMap::new();
    for ((warehouse_id, product_id, _), units) in daily {
        demand
            .entry((warehouse_id, product_id))
            .or_default()
            .push(units as f64);
    }

    let supplier_stats = supplier_lead_times(dataset);
    let suppliers = primary_suppliers(dataset);

    let mut rows = Vec::new();
    for ((warehouse_id, product_id), stats) in demand {
        let Some(record) = dataset.inventory_record(warehouse_id, product_id) else {
            continue;
        };
        let product = dataset.require_product("inventory", product_id)?;
        let warehouse = dataset.require_warehouse("inventory", warehouse_id)?;

        let avg_daily_demand = stats.mean().unwrap_or(0.0);
        let std_daily_demand = match stats.std_dev() {
            Some(std) => std,
            None => {
                warn!(sku = %product.sku, warehouse_id, "single demand day, using fallback deviation");
                avg_daily_demand * DEMAND_STD_FALLBACK
            }
        };

        let lead_time = suppliers
            .get(&product_id)
            .and_then(|supplier_id| supplier_stats.get(supplier_id))
            .copied()
            .unwrap_or_else(|| LeadTime::product_default(product));

        let ss = safety_stock(
            z_score,
            avg_daily_demand,
            std_daily_demand,
            lead_time.mean,
            lead_time.std_dev,
        );
        let calculated_rop = whole_units(reorder_point(avg_daily_demand, lead_time.mean, ss));
        let current_rop = record.reorder_point;

        rows.push(ReorderRow {
            warehouse_code: warehouse.warehouse_code.clone(),
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            quantity_on_hand: record.quantity_on_hand,
            avg_daily_demand,
            std_daily_demand,
            days_with_demand: stats.count(),
            avg_lead_time: lead_time.mean,
            std_lead_time: lead_time.std_dev,
            lead_time_source: lead_time.source,
            safety_stock: whole_units(ss),
            current_rop,
            calculated_rop,
            rop_adjustment: calculated_rop - current_rop,
            recommendation: recommend(calculated_rop, current_rop),
        });
    }

    debug!(rows = rows.len(), z_score, "reorder points");
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EoqRow {
    pub sku: String,
    pub product_name: String,
    pub unit_cost: f64,
    pub annual_demand: i64,
    pub holding_cost_per_unit: f64,
    pub eoq: i64,
    pub orders_per_year: f64,
    /// `inf` when the EOQ rounds to zero.
    pub cycle_days: f64,
    pub annual_inventory_cost: f64,
}

/// Wilson EOQ per product from trailing-window demand.
///
/// Fails with `InvalidHoldingCost` for the first product whose holding cost
/// (`unit_cost × holding_cost_rate`) is not positive.
pub fn economic_order_quantities(dataset: &Dataset, config: &EoqConfig) -> Result<Vec<EoqRow>> {
    config.validate()?;

    let mut demand: BTreeMap<ProductId, i64> = BTreeMap::new();
    for line in trailing_sales_lines(dataset, config.lookback_days)? {
        *demand.entry(line.item.product_id).or_default() += line.item.quantity_ordered;
    }

    let mut rows = Vec::with_capacity(demand.len());
    for (product_id, annual_demand) in demand {
        let product = dataset.require_product("sales_order_items", product_id)?;
        let holding_cost = product.unit_cost * config.holding_cost_rate;
        if holding_cost.is_nan() || holding_cost <= 0.0 {
            return Err(AnalyticsError::InvalidHoldingCost {
                sku: product.sku.clone(),
                value: holding_cost,
            });
        }

        let d = annual_demand as f64;
        let eoq = whole_units(economic_order_quantity(d, config.ordering_cost, holding_cost));
        let orders_per_year = if eoq > 0 { d / eoq as f64 } else { 0.0 };
        let cycle_days = if orders_per_year > 0.0 {
            365.0 / orders_per_year
        } else {
            f64::INFINITY
        };

        rows.push(EoqRow {
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            unit_cost: product.unit_cost,
            annual_demand,
            holding_cost_per_unit: holding_cost,
            eoq,
            orders_per_year,
            cycle_days,
            annual_inventory_cost: optimal_inventory_cost(d, config.ordering_cost, holding_cost),
        });
    }

    debug!(rows = rows.len(), "economic order quantities");
    Ok(rows)
}
