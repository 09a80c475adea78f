// src/model/dataset.rs

use crate::error::{AnalyticsError, Result};
use crate::model::records::*;
use crate::query::index::{lookup, position_index};
use std::collections::HashMap;
use tracing::debug;

/// Raw tables as handed over by a loader. Nothing is checked yet.
#[derive(Debug, Clone, Default)]
pub struct Tables {
    pub products: Vec<Product>,
    pub warehouses: Vec<Warehouse>,
    pub suppliers: Vec<Supplier>,
    pub categories: Vec<ProductCategory>,
    pub product_suppliers: Vec<ProductSupplier>,
    pub inventory: Vec<InventoryRecord>,
    pub sales_orders: Vec<SalesOrder>,
    pub sales_order_items: Vec<SalesOrderItem>,
    pub purchase_orders: Vec<PurchaseOrder>,
    pub purchase_order_items: Vec<PurchaseOrderItem>,
    pub stockout_events: Vec<StockoutEvent>,
}

/// An immutable, validated snapshot of every table the analyses read.
///
/// Construction checks key uniqueness and referential integrity once, so the
/// analyzers can join through the indexes without re-validating. A refreshed
/// data set means building a new `Dataset`.
#[derive(Debug)]
pub struct Dataset {
    tables: Tables,
    products: HashMap<ProductId, usize>,
    warehouses: HashMap<WarehouseId, usize>,
    suppliers: HashMap<SupplierId, usize>,
    categories: HashMap<CategoryId, usize>,
    inventory: HashMap<(WarehouseId, ProductId), usize>,
    sales_orders: HashMap<SalesOrderId, usize>,
    purchase_orders: HashMap<PurchaseOrderId, usize>,
}

impl Dataset {
    pub fn new(tables: Tables) -> Result<Self> {
        let products = position_index("products", &tables.products, |p| p.product_id)?;
        let warehouses = position_index("warehouses", &tables.warehouses, |w| w.warehouse_id)?;
        let suppliers = position_index("suppliers", &tables.suppliers, |s| s.supplier_id)?;
        let categories = position_index("product_categories", &tables.categories, |c| {
            c.category_id
        })?;
        let inventory = position_index("inventory", &tables.inventory, |r| {
            (r.warehouse_id, r.product_id)
        })?;
        let sales_orders = position_index("sales_orders", &tables.sales_orders, |o| o.so_id)?;
        let purchase_orders = position_index("purchase_orders", &tables.purchase_orders, |o| {
            o.po_id
        })?;
        let stockout_ids: Vec<u32> = tables
            .stockout_events
            .iter()
            .filter_map(|e| e.stockout_id)
            .collect();
        position_index("stockout_events", &stockout_ids, |id| *id)?;

        let dataset = Self {
            tables,
            products,
            warehouses,
            suppliers,
            categories,
            inventory,
            sales_orders,
            purchase_orders,
        };
        dataset.check_references()?;

        debug!(
            products = dataset.tables.products.len(),
            inventory = dataset.tables.inventory.len(),
            sales_orders = dataset.tables.sales_orders.len(),
            sales_order_items = dataset.tables.sales_order_items.len(),
            purchase_orders = dataset.tables.purchase_orders.len(),
            purchase_order_items = dataset.tables.purchase_order_items.len(),
            stockout_events = dataset.tables.stockout_events.len(),
            "dataset snapshot validated"
        );
        Ok(dataset)
    }

    fn check_references(&self) -> Result<()> {
        let t = &self.tables;

        for link in &t.product_suppliers {
            self.require_product("product_suppliers", link.product_id)?;
            self.require_supplier("product_suppliers", link.supplier_id)?;
        }
        for record in &t.inventory {
            self.require_warehouse("inventory", record.warehouse_id)?;
            self.require_product("inventory", record.product_id)?;
        }
        for order in &t.sales_orders {
            self.require_warehouse("sales_orders", order.warehouse_id)?;
        }
        for item in &t.sales_order_items {
            self.require_sales_order("sales_order_items", item.so_id)?;
            self.require_product("sales_order_items", item.product_id)?;
        }
        for order in &t.purchase_orders {
            self.require_supplier("purchase_orders", order.supplier_id)?;
            self.require_warehouse("purchase_orders", order.warehouse_id)?;
            if order.status == PurchaseOrderStatus::Delivered && order.actual_delivery_date.is_none()
            {
                return Err(AnalyticsError::Schema {
                    table: "purchase_orders",
                    message: format!("delivered order {} has no actual_delivery_date", order.po_id),
                });
            }
        }
        for item in &t.purchase_order_items {
            self.require_purchase_order("purchase_order_items", item.po_id)?;
            self.require_product("purchase_order_items", item.product_id)?;
        }
        for event in &t.stockout_events {
            self.require_warehouse("stockout_events", event.warehouse_id)?;
            self.require_product("stockout_events", event.product_id)?;
            if event.stockout_end_date < event.stockout_start_date {
                return Err(AnalyticsError::Schema {
                    table: "stockout_events",
                    message: format!(
                        "stockout for product {} ends before it starts",
                        event.product_id
                    ),
                });
            }
        }
        Ok(())
    }

    pub fn products(&self) -> &[Product] {
        &self.tables.products
    }

    pub fn warehouses(&self) -> &[Warehouse] {
        &self.tables.warehouses
    }

    pub fn suppliers(&self) -> &[Supplier] {
        &self.tables.suppliers
    }

    pub fn product_suppliers(&self) -> &[ProductSupplier] {
        &self.tables.product_suppliers
    }

    pub fn inventory(&self) -> &[InventoryRecord] {
        &self.tables.inventory
    }

    pub fn sales_orders(&self) -> &[SalesOrder] {
        &self.tables.sales_orders
    }

    pub fn sales_order_items(&self) -> &[SalesOrderItem] {
        &self.tables.sales_order_items
    }

    pub fn purchase_orders(&self) -> &[PurchaseOrder] {
        &self.tables.purchase_orders
    }

    pub fn purchase_order_items(&self) -> &[PurchaseOrderItem] {
        &self.tables.purchase_order_items
    }

    pub fn stockout_events(&self) -> &[StockoutEvent] {
        &self.tables.stockout_events
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        lookup(&self.tables.products, &self.products, &id)
    }

    pub fn warehouse(&self, id: WarehouseId) -> Option<&Warehouse> {
        lookup(&self.tables.warehouses, &self.warehouses, &id)
    }

    pub fn supplier(&self, id: SupplierId) -> Option<&Supplier> {
        lookup(&self.tables.suppliers, &self.suppliers, &id)
    }

    pub fn sales_order(&self, id: SalesOrderId) -> Option<&SalesOrder> {
        lookup(&self.tables.sales_orders, &self.sales_orders, &id)
    }

    pub fn purchase_order(&self, id: PurchaseOrderId) -> Option<&PurchaseOrder> {
        lookup(&self.tables.purchase_orders, &self.purchase_orders, &id)
    }

    pub fn inventory_record(
        &self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
    ) -> Option<&InventoryRecord> {
        lookup(&self.tables.inventory, &self.inventory, &(warehouse_id, product_id))
    }

    /// Display name of a category. Categories are optional reference data, so
    /// an unknown id gets a synthetic label instead of an error.
    pub fn category_name(&self, id: CategoryId) -> String {
        lookup(&self.tables.categories, &self.categories, &id)
            .map(|c| c.category_name.clone())
            .unwrap_or_else(|| format!("Category {id}"))
    }

    pub fn require_product(&self, table: &'static str, id: ProductId) -> Result<&Product> {
        self.product(id)
            .ok_or_else(|| AnalyticsError::missing(table, "product", id))
    }

    pub fn require_warehouse(&self, table: &'static str, id: WarehouseId) -> Result<&Warehouse> {
        self.warehouse(id)
            .ok_or_else(|| AnalyticsError::missing(table, "warehouse", id))
    }

    pub fn require_supplier(&self, table: &'static str, id: SupplierId) -> Result<&Supplier> {
        self.supplier(id)
            .ok_or_else(|| AnalyticsError::missing(table, "supplier", id))
    }

    pub fn require_sales_order(&self, table: &'static str, id: SalesOrderId) -> Result<&SalesOrder> {
        self.sales_order(id)
            .ok_or_else(|| AnalyticsError::missing(table, "sales order", id))
    }

    pub fn require_purchase_order(
        &self,
        table: &'static str,
        id: PurchaseOrderId,
    ) -> Result<&PurchaseOrder> {
        self.purchase_order(id)
            .ok_or_else(|| AnalyticsError::missing(table, "purchase order", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn dangling_sales_item_is_rejected() {
        let mut tables = Fixture::new().tables();
        tables.sales_order_items.push(SalesOrderItem {
            so_id: 999,
            product_id: 1,
            quantity_ordered: 1,
            quantity_shipped: 0,
            unit_price: 1.0,
            discount_percent: 0.0,
        });
        let err = Dataset::new(tables).unwrap_err();
        assert!(matches!(
            err,
            AnalyticsError::MissingReference { table: "sales_order_items", entity: "sales order", .. }
        ));
    }

    #[test]
    fn duplicate_inventory_pair_is_rejected() {
        let mut fixture = Fixture::new();
        fixture.inventory(1, 1, 10, 5).inventory(1, 1, 20, 5);
        let err = Dataset::new(fixture.tables()).unwrap_err();
        assert!(matches!(err, AnalyticsError::DuplicateKey { table: "inventory", .. }));
    }

    #[test]
    fn delivered_order_without_date_is_a_schema_error() {
        let mut fixture = Fixture::new();
        fixture.purchase_order(1, 1, "2024-01-01", "2024-01-05", None);
        let mut tables = fixture.tables();
        tables.purchase_orders[0].status = PurchaseOrderStatus::Delivered;
        let err = Dataset::new(tables).unwrap_err();
        assert!(matches!(err, AnalyticsError::Schema { table: "purchase_orders", .. }));
    }

    #[test]
    fn unknown_category_gets_a_synthetic_label() {
        let dataset = Fixture::new().build();
        assert_eq!(dataset.category_name(1), "Electronics");
        assert_eq!(dataset.category_name(42), "Category 42");
    }
}
