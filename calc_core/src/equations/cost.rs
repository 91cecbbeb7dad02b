//! # Cost Estimating Formulas
//!
//! Line-item arithmetic for the staircase estimator. Prices are per linear
//! meter of staircase; labor is hours times an hourly rate.

/// Cost of a material priced per linear meter
#[inline]
pub fn linear_cost(unit_price: f64, length_m: f64) -> f64 {
    unit_price * length_m
}

/// Labor cost for a number of hours at an hourly rate
#[inline]
pub fn labor_cost(hours: f64, hourly_rate: f64) -> f64 {
    hours * hourly_rate
}

/// Logistics charge for a delivery window
///
/// ```text
/// L = days · (fee_per_day + rate_per_day · subtotal)
/// ```
#[inline]
pub fn logistics_cost(delivery_days: f64, fee_per_day: f64, rate_per_day: f64, subtotal: f64) -> f64 {
    delivery_days * (fee_per_day + rate_per_day * subtotal)
}
