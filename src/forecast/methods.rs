// src/forecast/methods.rs

use crate::analysis::config::ForecastConfig;
use crate::error::{AnalyticsError, Result};
use crate::forecast::traits::{DemandForecaster, ForecastMethod};

// =========================================================================
// 1. Moving Average
// =========================================================================

/// Mean of the trailing `window` days. Shorter histories average whatever
/// is there.
#[derive(Debug, Clone)]
pub struct MovingAverage {
    window: usize,
}

impl MovingAverage {
    pub fn new(window: usize) -> Result<Self> {
        if window == 0 {
            return Err(AnalyticsError::config("window", "must be at least one day"));
        }
        Ok(Self { window })
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl DemandForecaster for MovingAverage {
    fn level(&self, history: &[f64]) -> Option<f64> {
        if history.is_empty() {
            return None;
        }
        let tail = &history[history.len().saturating_sub(self.window)..];
        Some(tail.iter().sum::<f64>() / tail.len() as f64)
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::MovingAverage
    }
}

// =========================================================================
// 2. Simple Exponential Smoothing
// =========================================================================

/// S_t = alpha * x_t + (1 - alpha) * S_{t-1}, seeded with the first day.
///
/// Small alpha is stable, alpha near 1 follows the latest day.
#[derive(Debug, Clone)]
pub struct ExponentialSmoothing {
    alpha: f64,
}

impl ExponentialSmoothing {
    pub fn new(alpha: f64) -> Result<Self> {
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(AnalyticsError::config(
                "alpha",
                format!("{alpha} is not in (0, 1]"),
            ));
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }
}

impl DemandForecaster for ExponentialSmoothing {
    fn level(&self, history: &[f64]) -> Option<f64> {
        let (&first, rest) = history.split_first()?;
        Some(
            rest.iter()
                .fold(first, |level, &x| self.alpha * x + (1.0 - self.alpha) * level),
        )
    }

    fn method(&self) -> ForecastMethod {
        ForecastMethod::ExponentialSmoothing
    }
}

/// Builds the forecaster for `method` from its config parameters.
pub fn forecaster_for(
    method: ForecastMethod,
    config: &ForecastConfig,
) -> Result<Box<dyn DemandForecaster>> {
    Ok(match method {
        ForecastMethod::MovingAverage => Box::new(MovingAverage::new(config.window)?),
        ForecastMethod::ExponentialSmoothing => Box::new(ExponentialSmoothing::new(config.alpha)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_average_uses_trailing_window() {
        let ma = MovingAverage::new(3).unwrap();
        assert_eq!(ma.level(&[10.0, 1.0, 2.0, 3.0]), Some(2.0));
        assert_eq!(ma.level(&[]), None);
    }

    #[test]
    fn moving_average_accepts_short_history() {
        let ma = MovingAverage::new(7).unwrap();
        assert_eq!(ma.level(&[4.0, 8.0]), Some(6.0));
    }

    #[test]
    fn smoothing_is_seeded_with_first_value() {
        let ses = ExponentialSmoothing::new(0.5).unwrap();
        // 10 -> 0.5*20 + 0.5*10 = 15 -> 0.5*0 + 0.5*15 = 7.5
        assert_eq!(ses.level(&[10.0, 20.0, 0.0]), Some(7.5));
        assert_eq!(ses.level(&[4.0]), Some(4.0));
        assert_eq!(ses.level(&[]), None);
    }

    #[test]
    fn alpha_one_tracks_last_value() {
        let ses = ExponentialSmoothing::new(1.0).unwrap();
        assert_eq!(ses.level(&[3.0, 9.0, 5.0]), Some(5.0));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        assert!(MovingAverage::new(0).is_err());
        assert!(ExponentialSmoothing::new(0.0).is_err());
        assert!(ExponentialSmoothing::new(1.01).is_err());
        assert!(ExponentialSmoothing::new(f64::NAN).is_err());
    }

    #[test]
    fn factory_matches_method() {
        let config = ForecastConfig::default();
        for method in [ForecastMethod::MovingAverage, ForecastMethod::ExponentialSmoothing] {
            assert_eq!(forecaster_for(method, &config).unwrap().method(), method);
        }
    }
}
