// src/query/joins.rs

use crate::error::Result;
use crate::model::dataset::Dataset;
use crate::model::records::{PurchaseOrder, PurchaseOrderItem, SalesOrder, SalesOrderItem};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;

/// A sales line item joined to its order header.
#[derive(Debug, Clone, Copy)]
pub struct SalesLine<'a> {
    pub order: &'a SalesOrder,
    pub item: &'a SalesOrderItem,
}

/// A delivered purchase order with its resolved delivery date.
#[derive(Debug, Clone, Copy)]
pub struct Delivery<'a> {
    pub order: &'a PurchaseOrder,
    pub delivered_on: NaiveDate,
}

impl Delivery<'_> {
    /// Days from placing the order to receiving it.
    pub fn lead_time_days(&self) -> i64 {
        (self.delivered_on - self.order.order_date).num_days()
    }

    /// Days late (positive) or early (negative) against the promised date.
    pub fn variance_days(&self) -> i64 {
        (self.delivered_on - self.order.expected_delivery_date).num_days()
    }

    pub fn is_on_time(&self) -> bool {
        self.delivered_on <= self.order.expected_delivery_date
    }
}

/// `latest - lookback_days`, where `latest` is the newest of `dates`.
/// `None` when there are no dates at all.
pub fn trailing_cutoff<I>(dates: I, lookback_days: u32) -> Option<NaiveDate>
where
    I: IntoIterator<Item = NaiveDate>,
{
    dates
        .into_iter()
        .max()
        .map(|latest| latest - Duration::days(i64::from(lookback_days)))
}

/// Non-cancelled sales lines, optionally restricted to orders placed on or
/// after `since`. Lines keep item-table order.
pub fn sales_lines(dataset: &Dataset, since: Option<NaiveDate>) -> Result<Vec<SalesLine<'_>>> {
    let mut lines = Vec::with_capacity(dataset.sales_order_items().len());
    for item in dataset.sales_order_items() {
        let order = dataset.require_sales_order("sales_order_items", item.so_id)?;
        if order.is_cancelled() || since.is_some_and(|cutoff| order.order_date < cutoff) {
            continue;
        }
        lines.push(SalesLine { order, item });
    }
    Ok(lines)
}

/// Sales lines inside the trailing window. The window is anchored on the
/// latest order date in the whole sales table, cancelled orders included.
pub fn trailing_sales_lines(dataset: &Dataset, lookback_days: u32) -> Result<Vec<SalesLine<'_>>> {
    let cutoff = trailing_cutoff(
        dataset.sales_orders().iter().map(|o| o.order_date),
        lookback_days,
    );
    match cutoff {
        Some(cutoff) => sales_lines(dataset, Some(cutoff)),
        None => Ok(Vec::new()),
    }
}

/// Delivered purchase orders placed on or after `since`.
pub fn deliveries(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<Delivery<'_>> {
    dataset
        .purchase_orders()
        .iter()
        .filter(|o| since.map_or(true, |cutoff| o.order_date >= cutoff))
        .filter_map(|order| {
            order
                .delivered_on()
                .map(|delivered_on| Delivery { order, delivered_on })
        })
        .collect()
}

/// Delivered purchase orders inside the trailing window, anchored on the
/// latest purchase order date.
pub fn trailing_deliveries(dataset: &Dataset, lookback_days: u32) -> Vec<Delivery<'_>> {
    let cutoff = trailing_cutoff(
        dataset.purchase_orders().iter().map(|o| o.order_date),
        lookback_days,
    );
    match cutoff {
        Some(cutoff) => deliveries(dataset, Some(cutoff)),
        None => Vec::new(),
    }
}

/// Line items belonging to the given deliveries, paired with their delivery.
pub fn delivered_items<'a>(
    dataset: &'a Dataset,
    deliveries: &[Delivery<'a>],
) -> Vec<(Delivery<'a>, &'a PurchaseOrderItem)> {
    let by_po: HashMap<_, _> =
        deliveries.iter().map(|d| (d.order.po_id, *d)).collect();
    dataset
        .purchase_order_items()
        .iter()
        .filter_map(|item| by_po.get(&item.po_id).map(|d| (*d, item)))
        .collect()
}
