// src/analysis/bands.rs
//
// Scalar classifiers. Analyzers compute a metric per row and map it through
// one of these; none of them look at tables.

use crate::analysis::config::UndefinedVariancePolicy;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum AbcClass {
    A,
    B,
    C,
}

pub fn abc_class(cumulative_pct: f64, a_threshold: f64, b_threshold: f64) -> AbcClass {
    if cumulative_pct <= a_threshold {
        AbcClass::A
    } else if cumulative_pct <= b_threshold {
        AbcClass::B
    } else {
        AbcClass::C
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TurnoverCategory {
    #[serde(rename = "Fast Moving")]
    FastMoving,
    Normal,
    #[serde(rename = "Slow Moving")]
    SlowMoving,
    #[serde(rename = "Dead Stock")]
    DeadStock,
}

pub fn turnover_category(turnover_ratio: f64) -> TurnoverCategory {
    if turnover_ratio >= 12.0 {
        TurnoverCategory::FastMoving
    } else if turnover_ratio >= 4.0 {
        TurnoverCategory::Normal
    } else if turnover_ratio >= 1.0 {
        TurnoverCategory::SlowMoving
    } else {
        TurnoverCategory::DeadStock
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Recommendation {
    #[serde(rename = "Increase ROP")]
    Increase,
    #[serde(rename = "Decrease ROP")]
    Decrease,
    Optimal,
}

/// Flags a stored reorder point that is more than 20% away from the computed
/// one.
pub fn recommend(calculated_rop: i64, current_rop: i64) -> Recommendation {
    let adjustment = (calculated_rop - current_rop) as f64;
    let tolerance = current_rop as f64 * 0.2;
    if adjustment > tolerance {
        Recommendation::Increase
    } else if adjustment < -tolerance {
        Recommendation::Decrease
    } else {
        Recommendation::Optimal
    }
}

/// Points for delivery-date consistency, from the standard deviation of
/// (actual - expected) in days.
pub fn consistency_score(variance_std_days: Option<f64>, policy: UndefinedVariancePolicy) -> u32 {
    match variance_std_days {
        None => match policy {
            UndefinedVariancePolicy::BestCase => 20,
            UndefinedVariancePolicy::WorstCase => 5,
        },
        Some(std) if std <= 1.0 => 20,
        Some(std) if std <= 3.0 => 15,
        Some(std) if std <= 7.0 => 10,
        Some(_) => 5,
    }
}

/// Supplier tiers, declared worst to best so that `Ord` ranks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum SupplierTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Both rates are percentages. Each tier's bar is at least as high as the one
/// below it on both axes, so raising either rate never lowers the tier.
pub fn supplier_tier(on_time_rate: f64, fill_rate: f64) -> SupplierTier {
    if on_time_rate >= 95.0 && fill_rate >= 98.0 {
        SupplierTier::Platinum
    } else if on_time_rate >= 90.0 && fill_rate >= 95.0 {
        SupplierTier::Gold
    } else if on_time_rate >= 80.0 && fill_rate >= 90.0 {
        SupplierTier::Silver
    } else {
        SupplierTier::Bronze
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LeadTimeReliability {
    #[serde(rename = "Highly Reliable")]
    HighlyReliable,
    Reliable,
    Variable,
    Unreliable,
}

/// Band for a lead-time coefficient of variation given in percent.
pub fn lead_time_reliability(
    cv_pct: Option<f64>,
    policy: UndefinedVariancePolicy,
) -> LeadTimeReliability {
    match cv_pct {
        None => match policy {
            UndefinedVariancePolicy::BestCase => LeadTimeReliability::HighlyReliable,
            UndefinedVariancePolicy::WorstCase => LeadTimeReliability::Unreliable,
        },
        Some(cv) if cv <= 10.0 => LeadTimeReliability::HighlyReliable,
        Some(cv) if cv <= 25.0 => LeadTimeReliability::Reliable,
        Some(cv) if cv <= 40.0 => LeadTimeReliability::Variable,
        Some(_) => LeadTimeReliability::Unreliable,
    }
}

impl fmt::Display for AbcClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl fmt::Display for SupplierTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}
