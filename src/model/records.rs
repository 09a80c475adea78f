// src/model/records.rs

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer};

pub type ProductId = u32;
pub type WarehouseId = u32;
pub type SupplierId = u32;
pub type CategoryId = u32;
pub type SalesOrderId = u32;
pub type PurchaseOrderId = u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub sku: String,
    pub product_name: String,
    pub category_id: CategoryId,
    pub unit_cost: f64,
    pub unit_price: f64,
    pub lead_time_days: u32,
    #[serde(default)]
    pub min_order_quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Warehouse {
    pub warehouse_id: WarehouseId,
    pub warehouse_code: String,
    pub warehouse_name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Supplier {
    pub supplier_id: SupplierId,
    pub supplier_code: String,
    pub supplier_name: String,
    pub quality_rating: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductCategory {
    pub category_id: CategoryId,
    pub category_name: String,
}

/// Which supplier provides a product. Only the primary flag is used.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductSupplier {
    pub product_id: ProductId,
    pub supplier_id: SupplierId,
    #[serde(default, deserialize_with = "flag")]
    pub is_primary_supplier: bool,
}

/// Stock position of one product in one warehouse at snapshot time.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InventoryRecord {
    pub warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity_on_hand: i64,
    pub quantity_reserved: i64,
    pub reorder_point: i64,
    pub reorder_quantity: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SalesOrderStatus {
    Pending,
    Confirmed,
    Picking,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesOrder {
    pub so_id: SalesOrderId,
    #[serde(default)]
    pub customer_id: Option<u32>,
    pub warehouse_id: WarehouseId,
    #[serde(deserialize_with = "date")]
    pub order_date: NaiveDate,
    pub status: SalesOrderStatus,
}

impl SalesOrder {
    /// Cancelled orders never count toward revenue or demand.
    pub fn is_cancelled(&self) -> bool {
        self.status == SalesOrderStatus::Cancelled
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SalesOrderItem {
    pub so_id: SalesOrderId,
    pub product_id: ProductId,
    pub quantity_ordered: i64,
    #[serde(default)]
    pub quantity_shipped: i64,
    pub unit_price: f64,
    #[serde(default)]
    pub discount_percent: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum PurchaseOrderStatus {
    Draft,
    Submitted,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseOrder {
    pub po_id: PurchaseOrderId,
    pub supplier_id: SupplierId,
    pub warehouse_id: WarehouseId,
    #[serde(deserialize_with = "date")]
    pub order_date: NaiveDate,
    #[serde(deserialize_with = "date")]
    pub expected_delivery_date: NaiveDate,
    #[serde(default, deserialize_with = "optional_date")]
    pub actual_delivery_date: Option<NaiveDate>,
    pub status: PurchaseOrderStatus,
}

impl PurchaseOrder {
    /// Actual delivery date of a completed order. `None` for anything that
    /// must stay out of lead-time and fill-rate statistics.
    pub fn delivered_on(&self) -> Option<NaiveDate> {
        match self.status {
            PurchaseOrderStatus::Delivered => self.actual_delivery_date,
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PurchaseOrderItem {
    pub po_id: PurchaseOrderId,
    pub product_id: ProductId,
    pub quantity_ordered: i64,
    pub quantity_received: i64,
    pub unit_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StockoutEvent {
    #[serde(default)]
    pub stockout_id: Option<u32>,
    pub warehouse_id: WarehouseId,
    pub product_id: ProductId,
    #[serde(deserialize_with = "date")]
    pub stockout_start_date: NaiveDate,
    #[serde(deserialize_with = "date")]
    pub stockout_end_date: NaiveDate,
    pub demand_during_stockout: i64,
    pub lost_sales_amount: f64,
    pub root_cause: String,
}

impl StockoutEvent {
    pub fn duration_days(&self) -> i64 {
        (self.stockout_end_date - self.stockout_start_date).num_days()
    }
}

/// Parses `YYYY-MM-DD`, ignoring any trailing time component.
pub fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    let trimmed = raw.trim();
    let day = trimmed.get(..10).unwrap_or(trimmed);
    NaiveDate::parse_from_str(day, "%Y-%m-%d").map_err(|e| format!("invalid date '{raw}': {e}"))
}

fn date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_date(&raw).map_err(serde::de::Error::custom)
}

fn optional_date<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    if raw.trim().is_empty() {
        return Ok(None);
    }
    parse_date(&raw).map(Some).map_err(serde::de::Error::custom)
}

fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    match raw.trim() {
        "True" | "true" | "1" => Ok(true),
        "False" | "false" | "0" | "" => Ok(false),
        other => Err(serde::de::Error::custom(format!("invalid boolean '{other}'"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_pandas_timestamps() {
        let expected = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(parse_date("2024-03-09").unwrap(), expected);
        assert_eq!(parse_date("2024-03-09 00:00:00").unwrap(), expected);
        assert!(parse_date("09/03/2024").is_err());
    }

    #[test]
    fn only_delivered_orders_report_a_delivery_date() {
        let day = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let mut po = PurchaseOrder {
            po_id: 1,
            supplier_id: 1,
            warehouse_id: 1,
            order_date: day,
            expected_delivery_date: day,
            actual_delivery_date: Some(day),
            status: PurchaseOrderStatus::Shipped,
        };
        assert_eq!(po.delivered_on(), None);
        po.status = PurchaseOrderStatus::Delivered;
        assert_eq!(po.delivered_on(), Some(day));
    }
}
