// src/analysis/classification.rs

use crate::analysis::bands::{abc_class, turnover_category, AbcClass, TurnoverCategory};
use crate::analysis::config::{AbcConfig, TurnoverConfig};
use crate::error::Result;
use crate::model::dataset::Dataset;
use crate::model::records::{ProductId, WarehouseId};
use crate::query::joins::trailing_sales_lines;
use crate::query::{group_by, RunningStats};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

// Annual carrying cost as fractions of inventory value.
const CAPITAL_RATE: f64 = 0.08;
const STORAGE_RATE: f64 = 0.05;
const INSURANCE_RATE: f64 = 0.03;
const OBSOLESCENCE_RATE: f64 = 0.02;
const HANDLING_RATE: f64 = 0.02;
const CARRYING_RATE: f64 = 0.20;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcRow {
    pub product_id: ProductId,
    pub sku: String,
    pub product_name: String,
    pub quantity_ordered: i64,
    pub total_revenue: f64,
    pub cumulative_pct: f64,
    pub abc_class: AbcClass,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbcSummaryRow {
    pub abc_class: AbcClass,
    pub product_count: usize,
    pub total_revenue: f64,
}

/// Revenue-based ABC classification over the trailing sales window.
///
/// Revenue per product is `Σ quantity_ordered × mean(unit_price)`. Products
/// are ranked by revenue, highest first; products with equal revenue stay in
/// ascending product id order (the sort is stable over id-ordered input), which
/// decides their class when they straddle a threshold.
///
/// An empty window gives an empty table. If every product sold has zero
/// revenue, all of them get `cumulative_pct = 0` and class A.
pub fn abc_classification(dataset: &Dataset, config: &AbcConfig) -> Result<Vec<AbcRow>> {
    config.validate()?;
    let lines = trailing_sales_lines(dataset, config.lookback_days)?;

    let mut rows = Vec::new();
    for (product_id, lines) in group_by(lines, |l| l.item.product_id) {
        let product = dataset.require_product("sales_order_items", product_id)?;
        let quantity: i64 = lines.iter().map(|l| l.item.quantity_ordered).sum();
        let prices: RunningStats = lines.iter().map(|l| l.item.unit_price).collect();
        rows.push(AbcRow {
            product_id,
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            quantity_ordered: quantity,
            total_revenue: quantity as f64 * prices.mean().unwrap_or(0.0),
            cumulative_pct: 0.0,
            abc_class: AbcClass::A,
        });
    }

    rows.sort_by(|a, b| b.total_revenue.total_cmp(&a.total_revenue));

    let total_revenue: f64 = rows.iter().map(|r| r.total_revenue).sum();
    let mut cumulative = 0.0;
    for row in &mut rows {
        cumulative += row.total_revenue;
        row.cumulative_pct = if total_revenue > 0.0 {
            cumulative / total_revenue * 100.0
        } else {
            0.0
        };
        row.abc_class = abc_class(row.cumulative_pct, config.a_threshold, config.b_threshold);
    }

    debug!(products = rows.len(), total_revenue, "abc classification");
    Ok(rows)
}

/// Product count and revenue per ABC class, A first.
pub fn abc_summary(rows: &[AbcRow]) -> Vec<AbcSummaryRow> {
    group_by(rows, |r| r.abc_class)
        .into_iter()
        .map(|(abc_class, members)| AbcSummaryRow {
            abc_class,
            product_count: members.len(),
            total_revenue: members.iter().map(|r| r.total_revenue).sum(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnoverRow {
    pub warehouse_code: String,
    pub sku: String,
    pub product_name: String,
    pub quantity_on_hand: i64,
    pub inventory_value: f64,
    pub annual_cogs: f64,
    pub turnover_ratio: f64,
    /// `inf` when nothing turned over.
    pub days_of_supply: f64,
    pub turnover_category: TurnoverCategory,
}

/// Turnover ratio and days of supply for every inventory record.
///
/// COGS is trailing-window units sold from the same warehouse times unit
/// cost. A zero (or negative) inventory value yields a ratio of 0, and a ratio
/// of 0 yields infinite days of supply.
pub fn inventory_turnover(dataset: &Dataset, config: &TurnoverConfig) -> Result<Vec<TurnoverRow>> {
    if let Some(warehouse_id) = config.warehouse_id {
        dataset.require_warehouse("turnover filter", warehouse_id)?;
    }

    let mut units_sold: HashMap<(WarehouseId, ProductId), i64> = HashMap::new();
    for line in trailing_sales_lines(dataset, config.lookback_days)? {
        *units_sold
            .entry((line.order.warehouse_id, line.item.product_id))
            .or_default() += line.item.quantity_ordered;
    }

    let mut rows = Vec::new();
    for record in dataset.inventory() {
        if config
            .warehouse_id
            .is_some_and(|id| id != record.warehouse_id)
        {
            continue;
        }
        let product = dataset.require_product("inventory", record.product_id)?;
        let warehouse = dataset.require_warehouse("inventory", record.warehouse_id)?;

        let inventory_value = record.quantity_on_hand as f64 * product.unit_cost;
        let sold = units_sold
            .get(&(record.warehouse_id, record.product_id))
            .copied()
            .unwrap_or(0);
        let annual_cogs = sold as f64 * product.unit_cost;

        let turnover_ratio = if inventory_value > 0.0 {
            annual_cogs / inventory_value
        } else {
            0.0
        };
        let days_of_supply = if turnover_ratio > 0.0 {
            365.0 / turnover_ratio
        } else {
            f64::INFINITY
        };

        rows.push(TurnoverRow {
            warehouse_code: warehouse.warehouse_code.clone(),
            sku: product.sku.clone(),
            product_name: product.product_name.clone(),
            quantity_on_hand: record.quantity_on_hand,
            inventory_value,
            annual_cogs,
            turnover_ratio,
            days_of_supply,
            turnover_category: turnover_category(turnover_ratio),
        });
    }

    debug!(rows = rows.len(), "inventory turnover");
    Ok(rows)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CarryingCostRow {
    pub warehouse_code: String,
    pub warehouse_name: String,
    pub category_name: String,
    pub product_count: usize,
    pub total_units: i64,
    pub inventory_value: f64,
    pub capital_cost: f64,
    pub storage_cost: f64,
    pub insurance_cost: f64,
    pub obsolescence_cost: f64,
    pub handling_cost: f64,
    pub total_carrying_cost: f64,
    pub monthly_carrying_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WarehouseCarryingCost {
    pub warehouse_code: String,
    pub total_carrying_cost: f64,
}

/// Annual carrying cost of on-hand stock per warehouse and category, split
/// into its fixed-rate components. Rows come ordered by warehouse code, then
/// category name.
pub fn carrying_costs(dataset: &Dataset) -> Result<Vec<CarryingCostRow>> {
    #[derive(Default)]
    struct Bucket {
        products: usize,
        units: i64,
        value: f64,
    }

    let mut buckets: BTreeMap<(String, String, String), Bucket> = BTreeMap::new();
    for record in dataset.inventory() {
        let product = dataset.require_product("inventory", record.product_id)?;
        let warehouse = dataset.require_warehouse("inventory", record.warehouse_id)?;
        let bucket = buckets
            .entry((
                warehouse.warehouse_code.clone(),
                dataset.category_name(product.category_id),
                warehouse.warehouse_name.clone(),
            ))
            .or_default();
        bucket.products += 1;
        bucket.units += record.quantity_on_hand;
        bucket.value += record.quantity_on_hand as f64 * product.unit_cost;
    }

    let rows: Vec<CarryingCostRow> = buckets
        .into_iter()
        .map(|((warehouse_code, category_name, warehouse_name), b)| {
            let total = b.value * CARRYING_RATE;
            CarryingCostRow {
                warehouse_code,
                warehouse_name,
                category_name,
                product_count: b.products,
                total_units: b.units,
                inventory_value: b.value,
                capital_cost: b.value * CAPITAL_RATE,
                storage_cost: b.value * STORAGE_RATE,
                insurance_cost: b.value * INSURANCE_RATE,
                obsolescence_cost: b.value * OBSOLESCENCE_RATE,
                handling_cost: b.value * HANDLING_RATE,
                total_carrying_cost: total,
                monthly_carrying_cost: total / 12.0,
            }
        })
        .collect();

    debug!(groups = rows.len(), "carrying costs");
    Ok(rows)
}

/// Sums the carrying-cost breakdown per warehouse.
pub fn carrying_cost_by_warehouse(rows: &[CarryingCostRow]) -> Vec<WarehouseCarryingCost> {
    group_by(rows, |r| r.warehouse_code.clone())
        .into_iter()
        .map(|(warehouse_code, members)| WarehouseCarryingCost {
            warehouse_code,
            total_carrying_cost: members.iter().map(|r| r.total_carrying_cost).sum(),
        })
        .collect()
}
