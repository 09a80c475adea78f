//! Daily demand forecasting: build a gap-free series, smooth it, and hold
//! the resulting level flat over the horizon.

pub mod methods;
pub mod series;
pub mod traits;

pub use methods::{forecaster_for, ExponentialSmoothing, MovingAverage};
pub use series::{daily_demand_series, DailySeries};
pub use traits::{DemandForecaster, ForecastMethod};

use crate::analysis::formulas::whole_units;
use crate::error::{AnalyticsError, Result};
use crate::model::dataset::Dataset;
use crate::model::records::{ProductId, WarehouseId};
use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastRow {
    pub date: NaiveDate,
    pub product_id: ProductId,
    pub forecasted_quantity: i64,
    pub method: ForecastMethod,
}

/// Forecasts `forecast_days` days of demand, starting the day after the last
/// day of history. Empty when the product has no sales history.
pub fn forecast_demand(
    dataset: &Dataset,
    product_id: ProductId,
    warehouse_id: Option<WarehouseId>,
    forecaster: &dyn DemandForecaster,
    forecast_days: usize,
) -> Result<Vec<ForecastRow>> {
    if forecast_days == 0 {
        return Err(AnalyticsError::config("forecast_days", "must be at least one day"));
    }
    let Some(series) = daily_demand_series(dataset, product_id, warehouse_id)? else {
        debug!(product_id, "no sales history, nothing to forecast");
        return Ok(Vec::new());
    };
    let Some(level) = forecaster.level(&series.values) else {
        return Ok(Vec::new());
    };

    let quantity = whole_units(level);
    let first_day = series.end() + Duration::days(1);
    let rows: Vec<ForecastRow> = first_day
        .iter_days()
        .take(forecast_days)
        .map(|date| ForecastRow {
            date,
            product_id,
            forecasted_quantity: quantity,
            method: forecaster.method(),
        })
        .collect();

    debug!(
        product_id,
        method = %forecaster.method(),
        history_days = series.values.len(),
        level,
        "demand forecast"
    );
    Ok(rows)
}
