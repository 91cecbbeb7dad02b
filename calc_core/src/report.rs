//! Plain-text report lines.
//!
//! Formats already-computed results for the terminal and for the PDF
//! procedure page. Nothing here recomputes a formula.

use crate::calculations::pipe_thickness::PipeThicknessResult;
use crate::calculations::stair_cost::{format_cop, CostBreakdown, StairCostResult};
use crate::errors::CalcResult;
use crate::units::{display_equivalent, Quantity};

/// Heading of the step-by-step procedure
pub const PROCEDURE_TITLE: &str = "=== Procedimiento de Cálculo ===";

/// `"Presión: 1.00 MPa = 145.04 psi"`
pub fn conversion_line(name: &str, quantity: &Quantity) -> CalcResult<String> {
    let companion = display_equivalent(quantity)?;
    Ok(format!("{}: {} = {}", name, quantity, companion))
}

/// Step-by-step derivation of a pipe thickness result.
///
/// Steps 2, 4 and 5 only appear when a schedule thickness was found.
pub fn procedure_text(result: &PipeThicknessResult) -> String {
    let si = &result.si_inputs;
    let p = si.pressure.value();
    let d = si.outside_diameter.value();
    let s = si.allowable_stress.value();
    let e = si.joint_efficiency;
    let y = si.y_coefficient;
    let c = si.allowance.value();

    let mut lines = vec![
        PROCEDURE_TITLE.to_string(),
        format!("P = {:.2} MPa, D = {:.2} mm, S = {:.2} MPa", p, d, s),
        format!("E = {:.2}, Y = {:.2}, C = {:.2} mm", e, y, c),
        String::new(),
        "1. Fórmula t = (P·D)/(2·(S·E + P·Y)) + C".to_string(),
        format!(
            "   t = ({:.2}·{:.2})/(2·({:.2}·{:.2} + {:.2}·{:.2})) + {:.2} = {:.4} mm",
            p, d, s, e, p, y, c, result.required_thickness_mm
        ),
    ];

    if let Some(check) = &result.schedule_check {
        lines.push(format!(
            "2. Comparación con {}: {:.2} mm -> {}",
            check.schedule,
            check.thickness_mm,
            check.verdict()
        ));
    }

    lines.push(String::new());
    lines.push("3. P_max = (2·S·E·t)/(D - 2·Y·t)".to_string());
    lines.push(format!(
        "   P_max = {:.4} MPa / {:.2} psi",
        result.max_pressure_mpa, result.max_pressure_psi
    ));

    if let Some(check) = &result.schedule_check {
        lines.push(format!(
            "4. P_max_schedule = {:.4} MPa / {:.2} psi",
            check.max_pressure_mpa, check.max_pressure_psi
        ));
        if let Some(fs) = check.safety_factor {
            lines.push(format!("5. Factor de seguridad = {:.4}", fs));
        }
    }

    lines.join("\n")
}

/// Headline results: required thickness, schedule thickness, safety factor.
pub fn pipe_result_lines(result: &PipeThicknessResult) -> Vec<String> {
    let mut lines = vec![format!(
        "Espesor mínimo requerido: {:.2} mm / {:.4} inches",
        result.required_thickness_mm, result.required_thickness_in
    )];

    if let Some(check) = &result.schedule_check {
        lines.push(format!(
            "Espesor {}: {:.2} mm / {:.4} inches",
            check.schedule, check.thickness_mm, check.thickness_in
        ));
        if let Some(fs) = check.safety_factor {
            lines.push(format!("Factor de seguridad: {:.2}", fs));
        }
    }

    lines
}

/// `"Costo Total del Proyecto: $3,177,450.00 COP"`
pub fn stair_summary_line(result: &StairCostResult) -> String {
    format!("Costo Total del Proyecto: ${} COP", format_cop(result.total_cop()))
}

/// Two-column text table of a breakdown, amounts right-aligned.
pub fn breakdown_table(title: &str, breakdown: &CostBreakdown) -> String {
    let width = breakdown
        .lines()
        .iter()
        .map(|l| l.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Costo".len());

    let mut out = format!("{}\n", title);
    for line in breakdown.lines() {
        let pad = width - line.label.chars().count();
        out.push_str(&format!(
            "  {}{}  {:>18}\n",
            line.label,
            " ".repeat(pad),
            format_cop(line.amount)
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::pipe_thickness::{calculate, PipeThicknessInput};
    use crate::calculations::stair_cost::{self, LogisticsPolicy, StairCostInput};
    use crate::schedules::ScheduleClass;
    use crate::units::{QuantityKind, Unit};

    fn reference_input(schedule: ScheduleClass, size: &str) -> PipeThicknessInput {
        PipeThicknessInput {
            label: "L-1".to_string(),
            pressure: Quantity::si(1.0, QuantityKind::Pressure),
            outside_diameter: Quantity::si(100.0, QuantityKind::Length),
            allowable_stress: Quantity::si(100.0, QuantityKind::Stress),
            joint_efficiency: 1.0,
            y_coefficient: 0.4,
            allowance: Quantity::si(0.0, QuantityKind::Length),
            nominal_size: size.to_string(),
            schedule,
        }
    }

    #[test]
    fn test_procedure_text_with_schedule() {
        let result = calculate(&reference_input(ScheduleClass::Sch40, "1/2")).unwrap();
        let text = procedure_text(&result);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "=== Procedimiento de Cálculo ===");
        assert_eq!(lines[1], "P = 1.00 MPa, D = 100.00 mm, S = 100.00 MPa");
        assert_eq!(lines[2], "E = 1.00, Y = 0.40, C = 0.00 mm");
        assert_eq!(lines[3], "");
        assert_eq!(lines[4], "1. Fórmula t = (P·D)/(2·(S·E + P·Y)) + C");
        assert_eq!(
            lines[5],
            "   t = (1.00·100.00)/(2·(100.00·1.00 + 1.00·0.40)) + 0.00 = 0.4980 mm"
        );
        assert_eq!(lines[6], "2. Comparación con SCH40: 2.77 mm -> ADECUADO");
        assert_eq!(lines[7], "");
        assert_eq!(lines[8], "3. P_max = (2·S·E·t)/(D - 2·Y·t)");
        assert_eq!(lines[9], "   P_max = 1.0000 MPa / 145.04 psi");
        assert!(lines[10].starts_with("4. P_max_schedule = 5.6"));
        assert!(lines[11].starts_with("5. Factor de seguridad = 5.6"));
        assert_eq!(lines.len(), 12);
    }

    #[test]
    fn test_procedure_text_without_schedule() {
        let result = calculate(&reference_input(ScheduleClass::Sch160, "3 1/2")).unwrap();
        let text = procedure_text(&result);

        assert!(!text.contains("Comparación"));
        assert!(!text.contains("P_max_schedule"));
        assert!(!text.contains("Factor de seguridad"));
        assert_eq!(text.lines().count(), 9);
    }

    #[test]
    fn test_pipe_result_lines() {
        let result = calculate(&reference_input(ScheduleClass::Sch40, "1/2")).unwrap();
        let lines = pipe_result_lines(&result);
        assert_eq!(lines[0], "Espesor mínimo requerido: 0.50 mm / 0.0196 inches");
        assert_eq!(lines[1], "Espesor SCH40: 2.77 mm / 0.1091 inches");
        assert!(lines[2].starts_with("Factor de seguridad: 5.6"));
    }

    #[test]
    fn test_conversion_lines() {
        let mpa = Quantity::new(1.0, QuantityKind::Pressure, Unit::Megapascal).unwrap();
        assert_eq!(conversion_line("Presión", &mpa).unwrap(), "Presión: 1.00 MPa = 145.04 psi");

        let bar = Quantity::new(2.0, QuantityKind::Pressure, Unit::Bar).unwrap();
        assert_eq!(conversion_line("Presión", &bar).unwrap(), "Presión: 2.00 bar = 200.00 kPa");
    }

    #[test]
    fn test_stair_summary_line() {
        let result =
            stair_cost::calculate(&StairCostInput::default(), &LogisticsPolicy::default()).unwrap();
        assert_eq!(
            stair_summary_line(&result),
            "Costo Total del Proyecto: $3,177,450.00 COP"
        );

        let table = breakdown_table("Materiales", &result.materials);
        assert!(table.starts_with("Materiales\n"));
        assert!(table.contains("1,500,000.00"));
        assert_eq!(table.lines().count(), 5);
    }
}
