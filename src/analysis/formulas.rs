// src/analysis/formulas.rs

//! Inventory formulas shared by the reorder and EOQ optimizers.
//!
//! Everything here is a pure function of its scalar inputs; the analyzers
//! decide which statistics feed them.

/// Inverse cumulative distribution function (quantile) of the standard normal.
///
/// Acklam's rational approximation; relative error below 1.2e-9.
pub fn inverse_normal_cdf(p: f64) -> f64 {
    // Handle edge cases
    if p >= 1.0 {
        // Cap at reasonable sigma
        return 5.0;
    }
    if p <= 0.0 {
        return -5.0;
    }
    if p == 0.5 {
        return 0.0;
    }

    const A: [f64; 6] = [
        -3.969683028665376e+01,
        2.209460984245205e+02,
        -2.759285104469687e+02,
        1.383577518672690e+02,
        -3.066479806614716e+01,
        2.506628277459239e+00,
    ];
    const B: [f64; 5] = [
        -5.447609879822406e+01,
        1.615858368580409e+02,
        -1.556989798598866e+02,
        6.680131188771972e+01,
        -1.328068155288572e+01,
    ];
    const C: [f64; 6] = [
        -7.784894002430293e-03,
        -3.223964580411365e-01,
        -2.400758277161838e+00,
        -2.549732539343734e+00,
        4.374664141464968e+00,
        2.938163982698783e+00,
    ];
    const D: [f64; 4] = [
        7.784695709041462e-03,
        3.224671290700398e-01,
        2.445134137142996e+00,
        3.754408661907416e+00,
    ];
    const P_LOW: f64 = 0.02425;

    let tail = |q: f64| {
        let numerator = ((((C[0] * q + C[1]) * q + C[2]) * q + C[3]) * q + C[4]) * q + C[5];
        let denominator = (((D[0] * q + D[1]) * q + D[2]) * q + D[3]) * q + 1.0;
        numerator / denominator
    };

    if p < P_LOW {
        tail((-2.0 * p.ln()).sqrt())
    } else if p > 1.0 - P_LOW {
        -tail((-2.0 * (1.0 - p).ln()).sqrt())
    } else {
        let q = p - 0.5;
        let r = q * q;
        let numerator = (((((A[0] * r + A[1]) * r + A[2]) * r + A[3]) * r + A[4]) * r + A[5]) * q;
        let denominator = ((((B[0] * r + B[1]) * r + B[2]) * r + B[3]) * r + B[4]) * r + 1.0;
        numerator / denominator
    }
}

/// Safety stock under joint demand and lead-time variability.
///
/// # Formula
/// SS = Z * sqrt(LT * σd² + d² * σLT²)
///
/// # Arguments
/// * `z_score` - Quantile of the target service level.
/// * `avg_daily_demand` / `std_daily_demand` - d and σd.
/// * `avg_lead_time` / `std_lead_time` - LT and σLT, in days.
pub fn safety_stock(
    z_score: f64,
    avg_daily_demand: f64,
    std_daily_demand: f64,
    avg_lead_time: f64,
    std_lead_time: f64,
) -> f64 {
    let variance = avg_lead_time * std_daily_demand.powi(2)
        + avg_daily_demand.powi(2) * std_lead_time.powi(2);
    let stock = z_score * variance.max(0.0).sqrt();

    // Ensure non-negative
    stock.max(0.0)
}

/// ROP = d * LT + SS, before rounding to whole units.
pub fn reorder_point(avg_daily_demand: f64, avg_lead_time: f64, safety_stock: f64) -> f64 {
    avg_daily_demand * avg_lead_time + safety_stock
}

/// Wilson's economic order quantity, EOQ = sqrt(2DS / H).
///
/// The caller guarantees `holding_cost > 0`.
pub fn economic_order_quantity(annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> f64 {
    (2.0 * annual_demand * ordering_cost / holding_cost).sqrt()
}

/// Annual ordering plus holding cost when ordering `quantity` units at a time:
/// D/Q * S + Q/2 * H.
pub fn total_inventory_cost(
    annual_demand: f64,
    ordering_cost: f64,
    holding_cost: f64,
    quantity: f64,
) -> f64 {
    if quantity <= 0.0 {
        return if annual_demand > 0.0 { f64::INFINITY } else { 0.0 };
    }
    annual_demand / quantity * ordering_cost + quantity / 2.0 * holding_cost
}

/// The minimum of `total_inventory_cost`, reached at the unrounded EOQ:
/// sqrt(2DSH).
pub fn optimal_inventory_cost(annual_demand: f64, ordering_cost: f64, holding_cost: f64) -> f64 {
    (2.0 * annual_demand * ordering_cost * holding_cost).sqrt()
}

/// Rounds to whole units, ties to even.
pub fn whole_units(value: f64) -> i64 {
    value.round_ties_even() as i64
}
