// src/analysis/config.rs

use crate::error::{AnalyticsError, Result};
use crate::model::records::WarehouseId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AbcConfig {
    pub lookback_days: u32,
    /// Cumulative revenue % up to which a product is class A.
    pub a_threshold: f64,
    /// Cumulative revenue % up to which a product is class B.
    pub b_threshold: f64,
}

impl Default for AbcConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            a_threshold: 80.0,
            b_threshold: 95.0,
        }
    }
}

impl AbcConfig {
    pub fn validate(&self) -> Result<()> {
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.a_threshold) || !in_range(self.b_threshold) {
            return Err(AnalyticsError::config(
                "a_threshold/b_threshold",
                "thresholds are percentages in [0, 100]",
            ));
        }
        if self.a_threshold > self.b_threshold {
            return Err(AnalyticsError::config(
                "a_threshold",
                format!("{} exceeds b_threshold {}", self.a_threshold, self.b_threshold),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnoverConfig {
    pub lookback_days: u32,
    /// Restrict the report to one warehouse.
    pub warehouse_id: Option<WarehouseId>,
}

impl Default for TurnoverConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            warehouse_id: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReorderConfig {
    /// Target probability of not stocking out during a replenishment cycle.
    pub service_level: f64,
    pub lookback_days: u32,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            service_level: 0.95,
            lookback_days: 90,
        }
    }
}

impl ReorderConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.service_level > 0.0 && self.service_level < 1.0) {
            return Err(AnalyticsError::config(
                "service_level",
                format!("{} is not in (0, 1)", self.service_level),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EoqConfig {
    /// Fixed cost of placing one order.
    pub ordering_cost: f64,
    /// Annual holding cost as a fraction of unit cost.
    pub holding_cost_rate: f64,
    pub lookback_days: u32,
}

impl Default for EoqConfig {
    fn default() -> Self {
        Self {
            ordering_cost: 50.0,
            holding_cost_rate: 0.25,
            lookback_days: 365,
        }
    }
}

impl EoqConfig {
    pub fn validate(&self) -> Result<()> {
        if self.ordering_cost.is_nan() || self.ordering_cost < 0.0 {
            return Err(AnalyticsError::config(
                "ordering_cost",
                format!("{} is negative", self.ordering_cost),
            ));
        }
        Ok(())
    }
}

/// What a missing spread (a single delivery, or a zero mean) counts as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UndefinedVariancePolicy {
    /// Treat as perfectly consistent: consistency 20, "Highly Reliable".
    #[default]
    BestCase,
    /// Treat as maximally inconsistent: consistency 5, "Unreliable".
    WorstCase,
}

/// What a supplier whose delivered lines order zero units gets as fill rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroOrderedPolicy {
    #[default]
    Error,
    Zero,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierConfig {
    pub lookback_days: u32,
    pub undefined_variance: UndefinedVariancePolicy,
    pub zero_ordered: ZeroOrderedPolicy,
}

impl Default for SupplierConfig {
    fn default() -> Self {
        Self {
            lookback_days: 365,
            undefined_variance: UndefinedVariancePolicy::default(),
            zero_ordered: ZeroOrderedPolicy::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForecastConfig {
    /// Moving-average window in days.
    pub window: usize,
    /// Exponential smoothing constant.
    pub alpha: f64,
    pub forecast_days: usize,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            window: 7,
            alpha: 0.3,
            forecast_days: 30,
        }
    }
}

impl ForecastConfig {
    pub fn validate(&self) -> Result<()> {
        if self.window == 0 {
            return Err(AnalyticsError::config("window", "must be at least one day"));
        }
        if !(self.alpha > 0.0 && self.alpha <= 1.0) {
            return Err(AnalyticsError::config(
                "alpha",
                format!("{} is not in (0, 1]", self.alpha),
            ));
        }
        if self.forecast_days == 0 {
            return Err(AnalyticsError::config("forecast_days", "must be at least one day"));
        }
        Ok(())
    }
}

/// Every analysis option in one place, as read from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub abc: AbcConfig,
    pub turnover: TurnoverConfig,
    pub reorder: ReorderConfig,
    pub eoq: EoqConfig,
    pub supplier: SupplierConfig,
    pub forecast: ForecastConfig,
}

impl AnalyticsConfig {
    /// Reads a JSON config; absent sections and keys keep their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| AnalyticsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config: Self =
            serde_json::from_str(&raw).map_err(|source| AnalyticsError::ConfigFile {
                path: path.display().to_string(),
                source,
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.abc.validate()?;
        self.reorder.validate()?;
        self.eoq.validate()?;
        self.forecast.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config: AnalyticsConfig = serde_json::from_str(
            r#"{ "eoq": { "ordering_cost": 75.0 }, "supplier": { "undefined_variance": "worst_case" } }"#,
        )
        .unwrap();
        assert_eq!(config.eoq.ordering_cost, 75.0);
        assert_eq!(config.eoq.holding_cost_rate, 0.25);
        assert_eq!(config.supplier.undefined_variance, UndefinedVariancePolicy::WorstCase);
        assert_eq!(config.supplier.zero_ordered, ZeroOrderedPolicy::Error);
        assert_eq!(config.abc, AbcConfig::default());
    }

    #[test]
    fn inverted_abc_thresholds_are_rejected() {
        let config = AbcConfig {
            a_threshold: 96.0,
            ..AbcConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(AnalyticsError::InvalidConfig { field: "a_threshold", .. })
        ));
    }

    #[test]
    fn service_level_must_be_a_probability() {
        for level in [0.0, 1.0, 1.5, f64::NAN] {
            let config = ReorderConfig {
                service_level: level,
                ..ReorderConfig::default()
            };
            assert!(config.validate().is_err(), "{level} accepted");
        }
    }

    #[test]
    fn forecast_options_are_checked() {
        assert!(ForecastConfig::default().validate().is_ok());
        let zero_window = ForecastConfig {
            window: 0,
            ..ForecastConfig::default()
        };
        assert!(zero_window.validate().is_err());
        let bad_alpha = ForecastConfig {
            alpha: 0.0,
            ..ForecastConfig::default()
        };
        assert!(bad_alpha.validate().is_err());
    }
}
