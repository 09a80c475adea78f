// src/forecast/traits.rs

use serde::Serialize;
use std::fmt::{self, Debug};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ForecastMethod {
    #[serde(rename = "Moving Average")]
    MovingAverage,
    #[serde(rename = "Exponential Smoothing")]
    ExponentialSmoothing,
}

impl fmt::Display for ForecastMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MovingAverage => write!(f, "Moving Average"),
            Self::ExponentialSmoothing => write!(f, "Exponential Smoothing"),
        }
    }
}

/// Turns a daily demand history into the level the forecast holds flat.
///
/// We require `Send` + `Sync` so one forecaster can serve several threads
/// reading the same snapshot.
pub trait DemandForecaster: Debug + Send + Sync {
    /// Demand level at the end of `history`.
    ///
    /// # Arguments
    /// * `history` - Units per day, oldest first, with no date gaps.
    ///
    /// Returns `None` for an empty history.
    fn level(&self, history: &[f64]) -> Option<f64>;

    fn method(&self) -> ForecastMethod;
}
