// src/forecast/series.rs

use crate::error::Result;
use crate::model::dataset::Dataset;
use crate::model::records::{ProductId, WarehouseId};
use crate::query::joins::sales_lines;
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

/// Units ordered per calendar day, contiguous from `start`.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySeries {
    pub start: NaiveDate,
    pub values: Vec<f64>,
}

impl DailySeries {
    /// Last day covered by the series.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.values.len() as i64 - 1)
    }
}

/// Non-cancelled sales of one product, summed per order date and reindexed
/// over `[first sale, last sale]` with zero-filled gaps.
///
/// `None` when the product never sold (in the given warehouse, if any).
pub fn daily_demand_series(
    dataset: &Dataset,
    product_id: ProductId,
    warehouse_id: Option<WarehouseId>,
) -> Result<Option<DailySeries>> {
    let mut by_date: BTreeMap<NaiveDate, i64> = BTreeMap::new();
    for line in sales_lines(dataset, None)? {
        if line.item.product_id != product_id
            || warehouse_id.is_some_and(|w| line.order.warehouse_id != w)
        {
            continue;
        }
        *by_date.entry(line.order.order_date).or_default() += line.item.quantity_ordered;
    }

    let (Some((&start, _)), Some((&end, _))) =
        (by_date.first_key_value(), by_date.last_key_value())
    else {
        return Ok(None);
    };

    let values = start
        .iter_days()
        .take_while(|date| *date <= end)
        .map(|date| by_date.get(&date).copied().unwrap_or(0) as f64)
        .collect();
    Ok(Some(DailySeries { start, values }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{day, Fixture};

    #[test]
    fn gaps_are_zero_filled() {
        let mut fixture = Fixture::new();
        fixture
            .sale(1, 1, "2024-01-01", 1, 4, 20.0)
            .sale(2, 2, "2024-01-01", 1, 6, 20.0)
            .sale(3, 1, "2024-01-04", 1, 5, 20.0)
            .sale(3, 1, "2024-01-04", 2, 99, 8.0)
            .cancelled_sale(4, 1, "2024-01-06", 1, 50, 20.0);
        let series = daily_demand_series(&fixture.build(), 1, None)
            .unwrap()
            .unwrap();

        assert_eq!(series.start, day("2024-01-01"));
        assert_eq!(series.values, vec![10.0, 0.0, 0.0, 5.0]);
        assert_eq!(series.end(), day("2024-01-04"));
    }

    #[test]
    fn warehouse_filter_narrows_the_series() {
        let mut fixture = Fixture::new();
        fixture
            .sale(1, 1, "2024-01-01", 1, 4, 20.0)
            .sale(2, 2, "2024-01-02", 1, 6, 20.0);
        let series = daily_demand_series(&fixture.build(), 1, Some(2))
            .unwrap()
            .unwrap();
        assert_eq!(series.start, day("2024-01-02"));
        assert_eq!(series.values, vec![6.0]);
    }

    #[test]
    fn no_history_gives_none() {
        let mut fixture = Fixture::new();
        fixture.cancelled_sale(1, 1, "2024-01-01", 3, 4, 150.0);
        assert_eq!(daily_demand_series(&fixture.build(), 3, None).unwrap(), None);
    }
}
