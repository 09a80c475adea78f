// src/testing.rs
//
// Snapshot builder for unit tests. Reference data comes pre-seeded; each test
// adds only the transactions it cares about.

use crate::model::dataset::{Dataset, Tables};
use crate::model::records::*;
use chrono::NaiveDate;

pub fn day(raw: &str) -> NaiveDate {
    parse_date(raw).expect("test date")
}

pub struct Fixture {
    tables: Tables,
}

impl Fixture {
    /// Two warehouses, two suppliers, two categories and three products:
    ///
    /// | id | sku       | cost  | price | lead | category |
    /// |----|-----------|-------|-------|------|----------|
    /// | 1  | SKU-00001 | 10.0  | 20.0  | 7    | 1        |
    /// | 2  | SKU-00002 | 5.0   | 8.0   | 10   | 2        |
    /// | 3  | SKU-00003 | 100.0 | 150.0 | 14   | 1        |
    pub fn new() -> Self {
        let mut tables = Tables::default();
        tables.warehouses = vec![
            Warehouse {
                warehouse_id: 1,
                warehouse_code: "WH001".into(),
                warehouse_name: "East Coast DC".into(),
            },
            Warehouse {
                warehouse_id: 2,
                warehouse_code: "WH002".into(),
                warehouse_name: "Midwest Hub".into(),
            },
        ];
        tables.suppliers = vec![
            Supplier {
                supplier_id: 1,
                supplier_code: "SUP-001".into(),
                supplier_name: "Global Parts Inc".into(),
                quality_rating: 4.5,
            },
            Supplier {
                supplier_id: 2,
                supplier_code: "SUP-002".into(),
                supplier_name: "Prime Distributors".into(),
                quality_rating: 3.2,
            },
        ];
        tables.categories = vec![
            ProductCategory {
                category_id: 1,
                category_name: "Electronics".into(),
            },
            ProductCategory {
                category_id: 2,
                category_name: "Kitchen".into(),
            },
        ];
        let mut fixture = Self { tables };
        fixture
            .product(1, 10.0, 20.0, 7)
            .product(2, 5.0, 8.0, 10)
            .product(3, 100.0, 150.0, 14);
        fixture.tables.products[1].category_id = 2;
        fixture
    }

    pub fn product(&mut self, id: ProductId, unit_cost: f64, unit_price: f64, lead: u32) -> &mut Self {
        self.tables.products.retain(|p| p.product_id != id);
        self.tables.products.push(Product {
            product_id: id,
            sku: format!("SKU-{id:05}"),
            product_name: format!("Product {id}"),
            category_id: 1,
            unit_cost,
            unit_price,
            lead_time_days: lead,
            min_order_quantity: 1,
        });
        self
    }

    pub fn inventory(
        &mut self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
        on_hand: i64,
        reorder_point: i64,
    ) -> &mut Self {
        self.tables.inventory.push(InventoryRecord {
            warehouse_id,
            product_id,
            quantity_on_hand: on_hand,
            quantity_reserved: 0,
            reorder_point,
            reorder_quantity: reorder_point * 2,
        });
        self
    }

    pub fn sale(
        &mut self,
        so_id: SalesOrderId,
        warehouse_id: WarehouseId,
        date: &str,
        product_id: ProductId,
        quantity: i64,
        unit_price: f64,
    ) -> &mut Self {
        self.sale_with_status(so_id, warehouse_id, date, product_id, quantity, unit_price, SalesOrderStatus::Delivered)
    }

    pub fn cancelled_sale(
        &mut self,
        so_id: SalesOrderId,
        warehouse_id: WarehouseId,
        date: &str,
        product_id: ProductId,
        quantity: i64,
        unit_price: f64,
    ) -> &mut Self {
        self.sale_with_status(so_id, warehouse_id, date, product_id, quantity, unit_price, SalesOrderStatus::Cancelled)
    }

    #[allow(clippy::too_many_arguments)]
    fn sale_with_status(
        &mut self,
        so_id: SalesOrderId,
        warehouse_id: WarehouseId,
        date: &str,
        product_id: ProductId,
        quantity: i64,
        unit_price: f64,
        status: SalesOrderStatus,
    ) -> &mut Self {
        if !self.tables.sales_orders.iter().any(|o| o.so_id == so_id) {
            self.tables.sales_orders.push(SalesOrder {
                so_id,
                customer_id: None,
                warehouse_id,
                order_date: day(date),
                status,
            });
        }
        self.tables.sales_order_items.push(SalesOrderItem {
            so_id,
            product_id,
            quantity_ordered: quantity,
            quantity_shipped: quantity,
            unit_price,
            discount_percent: 0.0,
        });
        self
    }

    /// A purchase order is `Delivered` when `actual` is given, `Shipped`
    /// otherwise.
    pub fn purchase_order(
        &mut self,
        po_id: PurchaseOrderId,
        supplier_id: SupplierId,
        ordered: &str,
        expected: &str,
        actual: Option<&str>,
    ) -> &mut Self {
        let status = if actual.is_some() {
            PurchaseOrderStatus::Delivered
        } else {
            PurchaseOrderStatus::Shipped
        };
        self.tables.purchase_orders.push(PurchaseOrder {
            po_id,
            supplier_id,
            warehouse_id: 1,
            order_date: day(ordered),
            expected_delivery_date: day(expected),
            actual_delivery_date: actual.map(day),
            status,
        });
        self
    }

    pub fn po_item(
        &mut self,
        po_id: PurchaseOrderId,
        product_id: ProductId,
        ordered: i64,
        received: i64,
    ) -> &mut Self {
        self.tables.purchase_order_items.push(PurchaseOrderItem {
            po_id,
            product_id,
            quantity_ordered: ordered,
            quantity_received: received,
            unit_cost: 1.0,
        });
        self
    }

    pub fn supplies(&mut self, product_id: ProductId, supplier_id: SupplierId, primary: bool) -> &mut Self {
        self.tables.product_suppliers.push(ProductSupplier {
            product_id,
            supplier_id,
            is_primary_supplier: primary,
        });
        self
    }

    #[allow(clippy::too_many_arguments)]
    pub fn stockout(
        &mut self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
        start: &str,
        end: &str,
        lost_units: i64,
        lost_revenue: f64,
        cause: &str,
    ) -> &mut Self {
        self.tables.stockout_events.push(StockoutEvent {
            stockout_id: None,
            warehouse_id,
            product_id,
            stockout_start_date: day(start),
            stockout_end_date: day(end),
            demand_during_stockout: lost_units,
            lost_sales_amount: lost_revenue,
            root_cause: cause.into(),
        });
        self
    }

    pub fn tables(&self) -> Tables {
        self.tables.clone()
    }

    pub fn build(&self) -> Dataset {
        Dataset::new(self.tables()).expect("fixture snapshot is valid")
    }
}
