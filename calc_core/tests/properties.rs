//! End-to-end checks of the calculator laws through the public API.

use calc_core::calculations::pipe_thickness::{self, PipeThicknessInput};
use calc_core::calculations::stair_cost::{self, LogisticsPolicy, StairCostInput};
use calc_core::equations::pipe::{max_allowable_pressure, required_thickness};
use calc_core::schedules::{lookup_schedule_thickness, ScheduleClass};
use calc_core::units::{to_imperial, to_si, Quantity, QuantityKind, Unit};
use calc_core::CalcError;

const KINDS: [QuantityKind; 3] = [QuantityKind::Pressure, QuantityKind::Length, QuantityKind::Stress];

fn pipe_input(p: f64, d: f64, s: f64, e: f64, y: f64) -> PipeThicknessInput {
    PipeThicknessInput {
        label: "P-1".to_string(),
        pressure: Quantity::si(p, QuantityKind::Pressure),
        outside_diameter: Quantity::si(d, QuantityKind::Length),
        allowable_stress: Quantity::si(s, QuantityKind::Stress),
        joint_efficiency: e,
        y_coefficient: y,
        allowance: Quantity::si(0.0, QuantityKind::Length),
        nominal_size: "1/2".to_string(),
        schedule: ScheduleClass::Sch40,
    }
}

#[test]
fn unit_round_trip_for_every_kind() {
    let samples = [1e-6, 0.01, 0.4980, 1.0, 25.4, 145.038, 1234.5678, 1e9];
    for kind in KINDS {
        for x in samples {
            let back = to_si(to_imperial(x, kind), kind);
            assert!((back - x).abs() <= 1e-12 * x.max(1.0), "{:?} {} -> {}", kind, x, back);
        }
    }
}

#[test]
fn bar_and_kpa_share_one_factor() {
    let bar = Quantity::new(1.0, QuantityKind::Pressure, Unit::Bar).unwrap();
    assert!((bar.to_si().unwrap() - 0.1).abs() < 1e-15);
    assert!((bar.convert_to(Unit::Kilopascal).unwrap().value - 100.0).abs() < 1e-9);
}

#[test]
fn required_thickness_reference_value() {
    let t = required_thickness(1.0, 100.0, 100.0, 1.0, 0.4, 0.0);
    assert!((t - 100.0 / 200.8).abs() < 1e-12);
    assert!((t - 0.49801).abs() < 1e-5);
}

#[test]
fn max_pressure_inverts_required_thickness() {
    let p = max_allowable_pressure(100.0, 1.0, 0.4980, 100.0, 0.4).unwrap();
    assert!((p - 1.0).abs() < 1e-3);

    // Exact inverse over a spread of realistic inputs
    for &(p, d, s, e, y) in &[
        (0.5, 21.3, 138.0, 1.0, 0.4),
        (10.0, 114.3, 115.0, 0.85, 0.4),
        (4.2, 60.3, 200.0, 0.6, 0.7),
    ] {
        let t = required_thickness(p, d, s, e, y, 0.0);
        let back = max_allowable_pressure(s, e, t, d, y).unwrap();
        assert!((back - p).abs() < 1e-9 * p, "P = {} recovered as {}", p, back);
    }
}

#[test]
fn schedule_lookup_and_absent_safety_factor() {
    assert_eq!(lookup_schedule_thickness(ScheduleClass::Sch40, "1/2"), Some(2.77));
    assert_eq!(lookup_schedule_thickness(ScheduleClass::Sch160, "3 1/2"), None);

    let mut input = pipe_input(1.0, 100.0, 100.0, 1.0, 0.4);
    input.schedule = ScheduleClass::Sch160;
    input.nominal_size = "3 1/2".to_string();

    let result = pipe_thickness::calculate(&input).unwrap();
    assert!(result.schedule_check.is_none());
    assert_eq!(result.safety_factor(), None);
}

#[test]
fn validation_blocks_every_formula() {
    let bad_inputs = [
        pipe_input(0.0, 100.0, 100.0, 1.0, 0.4),
        pipe_input(1.0, -100.0, 100.0, 1.0, 0.4),
        pipe_input(1.0, 100.0, 0.0, 1.0, 0.4),
        pipe_input(1.0, 100.0, 100.0, 0.0, 0.4),
        pipe_input(1.0, 100.0, 100.0, 1.5, 0.4),
        pipe_input(1.0, 100.0, 100.0, 1.0, 0.0),
    ];
    for input in bad_inputs {
        match pipe_thickness::calculate(&input) {
            Err(CalcError::ValidationFailed { fields, .. }) => assert_eq!(fields.len(), 1),
            other => panic!("expected validation failure, got {:?}", other),
        }
    }
}

#[test]
fn staircase_totals() {
    let input = StairCostInput {
        label: "Escalera".to_string(),
        length_m: 10.0,
        delivery_days: 7.0,
        step_price: 150_000.0,
        balustrade_price: 50_000.0,
        handrail_price: 46_000.0,
        anti_slip_price: 20_000.0,
        consumables_price: 25_000.0,
        labor_hours: 8.0,
        hourly_rate: 20_000.0,
    };

    let result = stair_cost::calculate(&input, &LogisticsPolicy::default()).unwrap();
    assert_eq!(result.materials.subtotal(), 2_660_000.0);
    assert_eq!(result.labor.subtotal(), 410_000.0);
    assert!(result.total_cop() >= 2_660_000.0 + 410_000.0);

    // Without logistics the total is exactly the two subtotals
    let free = LogisticsPolicy {
        daily_fee: 0.0,
        daily_rate: 0.0,
    };
    let result = stair_cost::calculate(&input, &free).unwrap();
    assert_eq!(result.total_cop(), 3_070_000.0);
}
