// src/analysis/report.rs

use crate::analysis::classification::{
    abc_classification, abc_summary, carrying_cost_by_warehouse, carrying_costs,
    inventory_turnover, AbcRow, AbcSummaryRow, CarryingCostRow, TurnoverRow,
    WarehouseCarryingCost,
};
use crate::analysis::config::AnalyticsConfig;
use crate::analysis::reorder::{economic_order_quantities, reorder_points, EoqRow, ReorderRow};
use crate::analysis::stockout::{root_cause_analysis, stockout_impact, RootCauseRow, StockoutImpactRow};
use crate::analysis::supplier::{
    lead_time_variability, supplier_scores, LeadTimeVariabilityRow, SupplierScoreRow,
};
use crate::error::Result;
use crate::model::dataset::Dataset;
use tracing::info;

/// Every analysis result for one snapshot.
#[derive(Debug, Clone)]
pub struct Report {
    pub abc: Vec<AbcRow>,
    pub abc_summary: Vec<AbcSummaryRow>,
    pub turnover: Vec<TurnoverRow>,
    pub carrying_costs: Vec<CarryingCostRow>,
    pub carrying_by_warehouse: Vec<WarehouseCarryingCost>,
    pub reorder_points: Vec<ReorderRow>,
    pub eoq: Vec<EoqRow>,
    pub supplier_scores: Vec<SupplierScoreRow>,
    pub lead_times: Vec<LeadTimeVariabilityRow>,
    pub stockouts: Vec<StockoutImpactRow>,
    pub root_causes: Vec<RootCauseRow>,
}

impl Report {
    /// Runs every analysis in turn; the first failure aborts the report.
    pub fn build(dataset: &Dataset, config: &AnalyticsConfig) -> Result<Self> {
        config.validate()?;

        let abc = abc_classification(dataset, &config.abc)?;
        let carrying = carrying_costs(dataset)?;
        let report = Self {
            abc_summary: abc_summary(&abc),
            abc,
            turnover: inventory_turnover(dataset, &config.turnover)?,
            carrying_by_warehouse: carrying_cost_by_warehouse(&carrying),
            carrying_costs: carrying,
            reorder_points: reorder_points(dataset, &config.reorder)?,
            eoq: economic_order_quantities(dataset, &config.eoq)?,
            supplier_scores: supplier_scores(dataset, &config.supplier)?,
            lead_times: lead_time_variability(dataset, &config.supplier)?,
            stockouts: stockout_impact(dataset)?,
            root_causes: root_cause_analysis(dataset),
        };

        info!(
            products = report.abc.len(),
            reorder_rows = report.reorder_points.len(),
            suppliers = report.supplier_scores.len(),
            stockout_groups = report.stockouts.len(),
            "report built"
        );
        Ok(report)
    }

    /// Suppliers by descending reliability score, at most `limit` of them.
    pub fn top_suppliers(&self, limit: usize) -> Vec<&SupplierScoreRow> {
        let mut ranked: Vec<&SupplierScoreRow> = self.supplier_scores.iter().collect();
        ranked.sort_by(|a, b| b.reliability_score.total_cmp(&a.reliability_score));
        ranked.truncate(limit);
        ranked
    }
}
