//! # Pipe Wall Thickness Calculation
//!
//! Required wall thickness and pressure capacity of straight pipe under
//! internal pressure (ASME B31.3 para. 304.1.2), checked against a standard
//! schedule.
//!
//! ## Procedure
//!
//! 1. Validate every input; all offending fields are reported together
//! 2. Normalise pressure, diameter, stress and allowance to MPa / mm
//! 3. `t = P·D / (2·(S·E + P·Y)) + C`
//! 4. `P_max = 2·S·E·t / (D - 2·Y·t)` for the required thickness
//! 5. If the schedule lists the nominal size: schedule capacity, safety
//!    factor and adequacy (`t ≤ t_sch`)
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::pipe_thickness::{calculate, PipeThicknessInput};
//! use calc_core::schedules::ScheduleClass;
//! use calc_core::units::{Quantity, QuantityKind, Unit};
//!
//! let input = PipeThicknessInput {
//!     label: "L-101".to_string(),
//!     pressure: Quantity::new(150.0, QuantityKind::Pressure, Unit::Psi).unwrap(),
//!     outside_diameter: Quantity::new(2.375, QuantityKind::Length, Unit::Inch).unwrap(),
//!     allowable_stress: Quantity::si(138.0, QuantityKind::Stress),
//!     joint_efficiency: 1.0,
//!     y_coefficient: 0.4,
//!     allowance: Quantity::si(1.0, QuantityKind::Length),
//!     nominal_size: "2".to_string(),
//!     schedule: ScheduleClass::Sch40,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.is_adequate(), Some(true));
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::equations::pipe::{max_allowable_pressure, required_thickness, safety_factor};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};
use crate::schedules::{lookup_schedule_thickness, ScheduleClass};
use crate::units::{Inches, Megapascals, Millimeters, Psi, Quantity, QuantityKind};

/// Message shown when the numeric inputs are out of range
pub const VALIDATION_MESSAGE: &str =
    "Todos los valores numéricos deben ser positivos y E entre 0 y 1.";

/// Input parameters for a pipe thickness check.
///
/// Dimensional values carry the unit the user entered them in.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "L-101",
///   "pressure": { "value": 10.0, "kind": "pressure", "unit": "bar" },
///   "outside_diameter": { "value": 60.3, "kind": "length", "unit": "mm" },
///   "allowable_stress": { "value": 20000.0, "kind": "stress", "unit": "psi" },
///   "joint_efficiency": 0.85,
///   "y_coefficient": 0.4,
///   "allowance": { "value": 1.5, "kind": "length", "unit": "mm" },
///   "nominal_size": "2",
///   "schedule": "SCH40"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipeThicknessInput {
    /// User label for this line (e.g., "L-101")
    pub label: String,

    /// Internal design pressure P (MPa, psi or bar)
    pub pressure: Quantity,

    /// Outside diameter D (mm or inches)
    pub outside_diameter: Quantity,

    /// Allowable stress S (MPa or psi)
    pub allowable_stress: Quantity,

    /// Weld joint efficiency E, 0 < E ≤ 1
    pub joint_efficiency: f64,

    /// Coefficient Y (0.4 for ferritic steel below 482 °C)
    pub y_coefficient: f64,

    /// Corrosion and manufacturing allowance C (mm or inches)
    pub allowance: Quantity,

    /// Nominal pipe size label, e.g. "1 1/2"
    pub nominal_size: String,

    pub schedule: ScheduleClass,
}

/// Inputs after conversion to MPa and mm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SiPipeInputs {
    pub pressure: Megapascals,
    pub outside_diameter: Millimeters,
    pub allowable_stress: Megapascals,
    pub joint_efficiency: f64,
    pub y_coefficient: f64,
    pub allowance: Millimeters,
}

impl PipeThicknessInput {
    /// Validate input parameters.
    ///
    /// A quantity of the wrong kind is an `InvalidInput`. Out-of-range
    /// values are collected and reported as one `ValidationFailed`.
    pub fn validate(&self) -> CalcResult<()> {
        let expected = [
            ("pressure", &self.pressure, QuantityKind::Pressure),
            ("outside_diameter", &self.outside_diameter, QuantityKind::Length),
            ("allowable_stress", &self.allowable_stress, QuantityKind::Stress),
            ("allowance", &self.allowance, QuantityKind::Length),
        ];
        for (field, quantity, kind) in expected {
            if quantity.kind != kind {
                return Err(CalcError::invalid_input(
                    field,
                    quantity.to_string(),
                    format!("Expected a {:?} quantity", kind).to_lowercase(),
                ));
            }
        }

        let strictly_positive = [
            ("pressure", self.pressure.value),
            ("outside_diameter", self.outside_diameter.value),
            ("allowable_stress", self.allowable_stress.value),
            ("joint_efficiency", self.joint_efficiency),
            ("y_coefficient", self.y_coefficient),
        ];

        let mut fields: Vec<String> = strictly_positive
            .iter()
            .filter(|(_, v)| !(v.is_finite() && *v > 0.0))
            .map(|(name, _)| name.to_string())
            .collect();

        if self.joint_efficiency > 1.0 && !fields.iter().any(|f| f == "joint_efficiency") {
            fields.push("joint_efficiency".to_string());
        }
        if !(self.allowance.value.is_finite() && self.allowance.value >= 0.0) {
            fields.push("allowance".to_string());
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CalcError::validation_failed(fields, VALIDATION_MESSAGE))
        }
    }

    /// Convert every dimensional input to MPa / mm.
    pub fn to_si(&self) -> CalcResult<SiPipeInputs> {
        Ok(SiPipeInputs {
            pressure: Megapascals(self.pressure.to_si()?),
            outside_diameter: Millimeters(self.outside_diameter.to_si()?),
            allowable_stress: Megapascals(self.allowable_stress.to_si()?),
            joint_efficiency: self.joint_efficiency,
            y_coefficient: self.y_coefficient,
            allowance: Millimeters(self.allowance.to_si()?),
        })
    }
}

/// Comparison of the required wall against a standard schedule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCheck {
    pub schedule: ScheduleClass,

    /// Nominal schedule wall (mm)
    pub thickness_mm: f64,
    pub thickness_in: f64,

    /// Maximum allowable pressure with the schedule wall
    pub max_pressure_mpa: f64,
    pub max_pressure_psi: f64,

    /// `max_pressure_mpa / P`; absent when P is not positive
    pub safety_factor: Option<f64>,

    /// `t_required ≤ t_schedule`
    pub adequate: bool,
}

impl ScheduleCheck {
    /// "ADECUADO" or "INADECUADO"
    pub fn verdict(&self) -> &'static str {
        if self.adequate {
            "ADECUADO"
        } else {
            "INADECUADO"
        }
    }
}

/// Results from a pipe thickness calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "required_thickness_mm": 0.498,
///   "required_thickness_in": 0.0196,
///   "max_pressure_mpa": 1.0,
///   "max_pressure_psi": 145.04,
///   "schedule_check": null
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipeThicknessResult {
    /// Inputs as used by the formulas
    pub si_inputs: SiPipeInputs,

    /// Minimum required thickness including allowance
    pub required_thickness_mm: f64,
    pub required_thickness_in: f64,

    /// Pressure capacity of the required thickness
    pub max_pressure_mpa: f64,
    pub max_pressure_psi: f64,

    /// Absent when the schedule has no entry for the nominal size
    pub schedule_check: Option<ScheduleCheck>,

    /// Formulas applied, for the report appendix
    pub equations: EquationTracker,
}

impl PipeThicknessResult {
    pub fn safety_factor(&self) -> Option<f64> {
        self.schedule_check.and_then(|c| c.safety_factor)
    }

    /// `None` when no schedule thickness was available
    pub fn is_adequate(&self) -> Option<bool> {
        self.schedule_check.map(|c| c.adequate)
    }
}

/// Calculate the required wall thickness and check it against the schedule.
///
/// # Errors
///
/// * `InvalidInput` / `ValidationFailed` - inputs out of range; nothing is computed
/// * `DegenerateFormula` - `D - 2·Y·t ≤ 0` for the required or schedule wall
pub fn calculate(input: &PipeThicknessInput) -> CalcResult<PipeThicknessResult> {
    input.validate()?;

    let si = input.to_si()?;
    let mut equations = EquationTracker::new();
    equations.record_for_member(Equation::UnitNormalization, "Entradas en MPa / mm", &input.label);

    let p = si.pressure.value();
    let d = si.outside_diameter.value();
    let s = si.allowable_stress.value();
    let e = si.joint_efficiency;
    let y = si.y_coefficient;
    let c = si.allowance.value();

    let t_req = required_thickness(p, d, s, e, y, c);
    equations.record_for_member(Equation::RequiredThickness, "Espesor mínimo requerido", &input.label);

    let p_max = max_allowable_pressure(s, e, t_req, d, y)?;
    equations.record_for_member(Equation::MaxAllowablePressure, "Espesor requerido", &input.label);

    debug!(
        label = %input.label,
        p_mpa = p,
        d_mm = d,
        s_mpa = s,
        t_req_mm = t_req,
        p_max_mpa = p_max,
        "pipe thickness computed"
    );

    let schedule_check = match lookup_schedule_thickness(input.schedule, &input.nominal_size) {
        Some(t_sch) => {
            let p_sch = max_allowable_pressure(s, e, t_sch, d, y)?;
            let fs = safety_factor(p_sch, p);
            let schedule_name = input.schedule.to_string();

            equations.record_for_member(Equation::ScheduleAdequacy, schedule_name.as_str(), &input.label);
            equations.record_for_member(Equation::MaxAllowablePressure, schedule_name.as_str(), &input.label);
            equations.record_for_member(Equation::SafetyFactor, schedule_name.as_str(), &input.label);

            debug!(schedule = %input.schedule, t_sch_mm = t_sch, p_sch_mpa = p_sch, ?fs, "schedule check");

            Some(ScheduleCheck {
                schedule: input.schedule,
                thickness_mm: t_sch,
                thickness_in: Inches::from(Millimeters(t_sch)).value(),
                max_pressure_mpa: p_sch,
                max_pressure_psi: Psi::from(Megapascals(p_sch)).value(),
                safety_factor: fs,
                adequate: t_req <= t_sch,
            })
        }
        None => {
            warn!(
                schedule = %input.schedule,
                nominal_size = %input.nominal_size,
                "no standard wall thickness for this size; schedule check skipped"
            );
            None
        }
    };

    Ok(PipeThicknessResult {
        si_inputs: si,
        required_thickness_mm: t_req,
        required_thickness_in: Inches::from(Millimeters(t_req)).value(),
        max_pressure_mpa: p_max,
        max_pressure_psi: Psi::from(Megapascals(p_max)).value(),
        schedule_check,
        equations,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::Unit;

    fn reference_input() -> PipeThicknessInput {
        PipeThicknessInput {
            label: "Test Line".to_string(),
            pressure: Quantity::si(1.0, QuantityKind::Pressure),
            outside_diameter: Quantity::si(100.0, QuantityKind::Length),
            allowable_stress: Quantity::si(100.0, QuantityKind::Stress),
            joint_efficiency: 1.0,
            y_coefficient: 0.4,
            allowance: Quantity::si(0.0, QuantityKind::Length),
            nominal_size: "1/2".to_string(),
            schedule: ScheduleClass::Sch40,
        }
    }

    #[test]
    fn test_reference_case() {
        let result = calculate(&reference_input()).unwrap();
        assert!((result.required_thickness_mm - 100.0 / 200.8).abs() < 1e-9);
        assert!((result.max_pressure_mpa - 1.0).abs() < 1e-9);
        assert!((result.required_thickness_in - result.required_thickness_mm / 25.4).abs() < 1e-12);
        assert!((result.max_pressure_psi - 145.038).abs() < 1e-6);
    }

    #[test]
    fn test_schedule_check_present() {
        let result = calculate(&reference_input()).unwrap();
        let check = result.schedule_check.unwrap();
        assert_eq!(check.thickness_mm, 2.77);
        assert!((check.thickness_in - 2.77 / 25.4).abs() < 1e-12);
        assert!(check.adequate);
        assert_eq!(check.verdict(), "ADECUADO");

        // P_sch = 2·100·1·2.77 / (100 - 2·0.4·2.77)
        let expected = 554.0 / (100.0 - 2.216);
        assert!((check.max_pressure_mpa - expected).abs() < 1e-9);
        assert!((result.safety_factor().unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_missing_schedule_entry() {
        let mut input = reference_input();
        input.schedule = ScheduleClass::Sch160;
        input.nominal_size = "3 1/2".to_string();

        let result = calculate(&input).unwrap();
        assert!(result.schedule_check.is_none());
        assert!(result.safety_factor().is_none());
        assert!(result.is_adequate().is_none());
        assert!(!result.equations.contains(Equation::SafetyFactor));
    }

    #[test]
    fn test_inadequate_schedule() {
        let mut input = reference_input();
        input.pressure = Quantity::si(20.0, QuantityKind::Pressure);
        input.schedule = ScheduleClass::Sch5S;

        let result = calculate(&input).unwrap();
        let check = result.schedule_check.unwrap();
        assert!(result.required_thickness_mm > check.thickness_mm);
        assert!(!check.adequate);
        assert_eq!(check.verdict(), "INADECUADO");
        assert!(check.safety_factor.unwrap() < 1.0);
    }

    #[test]
    fn test_imperial_inputs_normalised_once() {
        let mut input = reference_input();
        input.pressure = Quantity::new(145.038, QuantityKind::Pressure, Unit::Psi).unwrap();
        input.outside_diameter = Quantity::new(100.0 / 25.4, QuantityKind::Length, Unit::Inch).unwrap();

        let result = calculate(&input).unwrap();
        assert!((result.si_inputs.pressure.value() - 1.0).abs() < 1e-12);
        assert!((result.si_inputs.outside_diameter.value() - 100.0).abs() < 1e-9);
        assert!((result.required_thickness_mm - 100.0 / 200.8).abs() < 1e-9);
    }

    #[test]
    fn test_bar_pressure() {
        let mut input = reference_input();
        input.pressure = Quantity::new(10.0, QuantityKind::Pressure, Unit::Bar).unwrap();

        let result = calculate(&input).unwrap();
        assert!((result.si_inputs.pressure.value() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_validation_collects_all_fields() {
        let mut input = reference_input();
        input.pressure.value = 0.0;
        input.y_coefficient = -0.4;
        input.joint_efficiency = 1.2;

        match calculate(&input).unwrap_err() {
            CalcError::ValidationFailed { fields, reason } => {
                assert_eq!(fields, vec!["pressure", "y_coefficient", "joint_efficiency"]);
                assert_eq!(reason, VALIDATION_MESSAGE);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_validation_rejects_each_field() {
        let cases: [fn(&mut PipeThicknessInput); 6] = [
            |i| i.pressure.value = -1.0,
            |i| i.outside_diameter.value = 0.0,
            |i| i.allowable_stress.value = f64::NAN,
            |i| i.joint_efficiency = 0.0,
            |i| i.y_coefficient = 0.0,
            |i| i.allowance.value = -0.1,
        ];
        for mutate in cases {
            let mut input = reference_input();
            mutate(&mut input);
            let err = input.validate().unwrap_err();
            assert_eq!(err.error_code(), "VALIDATION_FAILED");
        }
    }

    #[test]
    fn test_wrong_quantity_kind() {
        let mut input = reference_input();
        input.outside_diameter = Quantity::si(100.0, QuantityKind::Pressure);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_degenerate_denominator() {
        // Allowance pushes t past D/(2Y): 5 - 2·1·3.025 < 0
        let mut input = reference_input();
        input.y_coefficient = 1.0;
        input.outside_diameter = Quantity::si(5.0, QuantityKind::Length);
        input.allowance = Quantity::si(3.0, QuantityKind::Length);
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_FORMULA");
    }

    #[test]
    fn test_degenerate_schedule_wall() {
        // Required wall is thin, but SCH160 4" (13.49 mm) gives 10 - 2·0.4·13.49 < 0
        let mut input = reference_input();
        input.outside_diameter = Quantity::si(10.0, QuantityKind::Length);
        input.nominal_size = "4".to_string();
        input.schedule = ScheduleClass::Sch160;

        let t_req = required_thickness(1.0, 10.0, 100.0, 1.0, 0.4, 0.0);
        assert!(max_allowable_pressure(100.0, 1.0, t_req, 10.0, 0.4).is_ok());

        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "DEGENERATE_FORMULA");
    }

    #[test]
    fn test_equations_recorded() {
        let result = calculate(&reference_input()).unwrap();
        let used = result.equations.unique_equations();
        assert_eq!(
            used,
            vec![
                Equation::UnitNormalization,
                Equation::RequiredThickness,
                Equation::MaxAllowablePressure,
                Equation::ScheduleAdequacy,
                Equation::SafetyFactor,
            ]
        );
    }

    #[test]
    fn test_input_serialization() {
        let input = reference_input();
        let json = serde_json::to_string(&input).unwrap();
        assert!(json.contains("\"schedule\":\"SCH40\""));
        let roundtrip: PipeThicknessInput = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, input);
    }
}
