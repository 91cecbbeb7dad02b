//! # Pressure Design of Straight Pipe
//!
//! Closed-form wall thickness equations for straight pipe under internal
//! pressure, per ASME B31.3 para. 304.1.2 (Eq. 3a), valid for t < D/6.
//!
//! ## Notation
//!
//! - `P` = Internal design gauge pressure (MPa)
//! - `D` = Outside diameter (mm)
//! - `S` = Allowable stress at design temperature (MPa)
//! - `E` = Longitudinal weld joint quality factor (0 < E ≤ 1)
//! - `Y` = Material/temperature coefficient (Table 304.1.1)
//! - `C` = Corrosion, erosion and mechanical allowance (mm)
//! - `t` = Wall thickness (mm)
//!
//! All arguments are SI. Callers convert once at the boundary, never here.

use crate::errors::{CalcError, CalcResult};

/// Minimum required wall thickness including allowances
///
/// # Formula (ASME B31.3 Eq. 3a plus allowance)
/// ```text
/// t = P·D / (2·(S·E + P·Y)) + C
/// ```
///
/// # Returns
/// Required thickness in mm
#[inline]
pub fn required_thickness(p: f64, d: f64, s: f64, e: f64, y: f64, c: f64) -> f64 {
    (p * d) / (2.0 * (s * e + p * y)) + c
}

/// Maximum allowable internal pressure for a wall thickness
///
/// Inverse of [`required_thickness`] with C = 0:
/// ```text
/// P_max = 2·S·E·t / (D - 2·Y·t)
/// ```
///
/// # Errors
/// `DegenerateFormula` when `D - 2·Y·t <= 0`; the wall would be too thick
/// for the diameter and the formula would yield an infinite or negative
/// pressure.
pub fn max_allowable_pressure(s: f64, e: f64, t: f64, d: f64, y: f64) -> CalcResult<f64> {
    let denominator = d - 2.0 * y * t;
    if !(denominator > 0.0) {
        return Err(CalcError::degenerate_formula(
            "P_max = (2·S·E·t)/(D - 2·Y·t)",
            format!(
                "D - 2·Y·t = {:.4} mm must be positive (D = {:.4} mm, Y = {:.4}, t = {:.4} mm)",
                denominator, d, y, t
            ),
        ));
    }
    Ok((2.0 * s * e * t) / denominator)
}

/// Ratio of a capacity pressure to the design pressure.
///
/// `None` when the design pressure is not positive.
#[inline]
pub fn safety_factor(capacity_pressure: f64, design_pressure: f64) -> Option<f64> {
    if design_pressure > 0.0 {
        Some(capacity_pressure / design_pressure)
    } else {
        None
    }
}
