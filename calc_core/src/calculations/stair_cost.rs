//! # Metal Staircase Cost Estimate
//!
//! Sums material and fabrication line items for a metal staircase and adds
//! a logistics charge that depends on the delivery window. All prices are in
//! Colombian pesos (COP); material prices are per linear meter.
//!
//! Three breakdowns are produced, each an ordered list of labelled amounts:
//!
//! | Breakdown    | Lines                                                        |
//! |--------------|--------------------------------------------------------------|
//! | Materiales   | Escalones, Barandas, Pasamanos, Antideslizante               |
//! | Fabricación  | Consumibles, Mano de obra                                    |
//! | Resumen      | Subtotal Materiales, Subtotal Fabricación, Logística, Total  |
//!
//! ## Example
//!
//! ```rust
//! use calc_core::calculations::stair_cost::{calculate, LogisticsPolicy, StairCostInput};
//!
//! let input = StairCostInput::default();
//! let result = calculate(&input, &LogisticsPolicy::default()).unwrap();
//!
//! assert_eq!(result.materials.subtotal(), 2_660_000.0);
//! assert_eq!(result.labor.subtotal(), 410_000.0);
//! assert!(result.total_cop() > 3_070_000.0);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::equations::cost::{labor_cost, linear_cost, logistics_cost};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::{CalcError, CalcResult};

pub const LINE_STEPS: &str = "Escalones";
pub const LINE_BALUSTRADE: &str = "Barandas";
pub const LINE_HANDRAIL: &str = "Pasamanos";
pub const LINE_ANTI_SLIP: &str = "Antideslizante";
pub const LINE_CONSUMABLES: &str = "Consumibles";
pub const LINE_LABOR: &str = "Mano de obra";
pub const LINE_MATERIALS_SUBTOTAL: &str = "Subtotal Materiales";
pub const LINE_LABOR_SUBTOTAL: &str = "Subtotal Fabricación";
pub const LINE_LOGISTICS: &str = "Logística";
pub const LINE_TOTAL: &str = "Costo Total Proyecto (COP)";

/// Input parameters for a staircase estimate.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Escalera bodega",
///   "length_m": 10.0,
///   "delivery_days": 7.0,
///   "step_price": 150000.0,
///   "balustrade_price": 50000.0,
///   "handrail_price": 46000.0,
///   "anti_slip_price": 20000.0,
///   "consumables_price": 25000.0,
///   "labor_hours": 8.0,
///   "hourly_rate": 20000.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StairCostInput {
    pub label: String,

    /// Total staircase length (m)
    pub length_m: f64,

    /// Delivery window (days)
    pub delivery_days: f64,

    /// Metal steps (COP/m)
    pub step_price: f64,

    /// Balustrades (COP/m)
    pub balustrade_price: f64,

    /// Handrail (COP/m)
    pub handrail_price: f64,

    /// Anti-slip strip (COP/m)
    pub anti_slip_price: f64,

    /// Welding and metalworking consumables (COP/m)
    pub consumables_price: f64,

    /// Man-hours required
    pub labor_hours: f64,

    /// Cost per man-hour (COP)
    pub hourly_rate: f64,
}

impl Default for StairCostInput {
    fn default() -> Self {
        Self {
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
        }
    }
}

impl StairCostInput {
    /// Every numeric input must be finite and non-negative.
    pub fn validate(&self) -> CalcResult<()> {
        let values = [
            ("length_m", self.length_m),
            ("delivery_days", self.delivery_days),
            ("step_price", self.step_price),
            ("balustrade_price", self.balustrade_price),
            ("handrail_price", self.handrail_price),
            ("anti_slip_price", self.anti_slip_price),
            ("consumables_price", self.consumables_price),
            ("labor_hours", self.labor_hours),
            ("hourly_rate", self.hourly_rate),
        ];

        let fields: Vec<String> = values
            .iter()
            .filter(|(_, v)| !(v.is_finite() && *v >= 0.0))
            .map(|(name, _)| name.to_string())
            .collect();

        if fields.is_empty() {
            Ok(())
        } else {
            Err(CalcError::validation_failed(
                fields,
                "Los valores deben ser números no negativos",
            ))
        }
    }
}

/// How the logistics line is charged.
///
/// `logistics = days × (daily_fee + daily_rate × (materials + labor))`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogisticsPolicy {
    /// Fixed charge per delivery day (COP)
    pub daily_fee: f64,

    /// Fraction of the materials + labor subtotal charged per day
    pub daily_rate: f64,
}

impl Default for LogisticsPolicy {
    fn default() -> Self {
        Self {
            daily_fee: 0.0,
            daily_rate: 0.005,
        }
    }
}

impl LogisticsPolicy {
    pub fn validate(&self) -> CalcResult<()> {
        let mut fields = Vec::new();
        if !(self.daily_fee.is_finite() && self.daily_fee >= 0.0) {
            fields.push("daily_fee".to_string());
        }
        if !(self.daily_rate.is_finite() && self.daily_rate >= 0.0) {
            fields.push("daily_rate".to_string());
        }
        if fields.is_empty() {
            Ok(())
        } else {
            Err(CalcError::validation_failed(fields, "Logistics policy must be non-negative"))
        }
    }
}

/// One labelled amount in a breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub label: String,
    pub amount: f64,
}

/// Ordered list of labelled amounts. Insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostBreakdown {
    lines: Vec<CostLine>,
}

impl CostBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, amount: f64) {
        self.lines.push(CostLine {
            label: label.into(),
            amount,
        });
    }

    /// Amount of the first line with this label
    pub fn get(&self, label: &str) -> Option<f64> {
        self.lines.iter().find(|l| l.label == label).map(|l| l.amount)
    }

    /// Sum of every line
    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(|l| l.amount).sum()
    }

    pub fn lines(&self) -> &[CostLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Material line items, each `price × length`.
pub fn materials_costs(input: &StairCostInput) -> CalcResult<CostBreakdown> {
    input.validate()?;

    let mut breakdown = CostBreakdown::new();
    breakdown.push(LINE_STEPS, linear_cost(input.step_price, input.length_m));
    breakdown.push(LINE_BALUSTRADE, linear_cost(input.balustrade_price, input.length_m));
    breakdown.push(LINE_HANDRAIL, linear_cost(input.handrail_price, input.length_m));
    breakdown.push(LINE_ANTI_SLIP, linear_cost(input.anti_slip_price, input.length_m));
    Ok(breakdown)
}

/// Fabrication line items: consumables per meter and labor hours.
pub fn labor_costs(input: &StairCostInput) -> CalcResult<CostBreakdown> {
    input.validate()?;

    let mut breakdown = CostBreakdown::new();
    breakdown.push(LINE_CONSUMABLES, linear_cost(input.consumables_price, input.length_m));
    breakdown.push(LINE_LABOR, labor_cost(input.labor_hours, input.hourly_rate));
    Ok(breakdown)
}

/// Summary breakdown with logistics and the project total.
///
/// The subtotal lines repeat the materials and labor sums unchanged.
pub fn total_costs(
    materials: &CostBreakdown,
    labor: &CostBreakdown,
    delivery_days: f64,
    policy: &LogisticsPolicy,
) -> CalcResult<CostBreakdown> {
    if !(delivery_days.is_finite() && delivery_days >= 0.0) {
        return Err(CalcError::invalid_input(
            "delivery_days",
            delivery_days.to_string(),
            "Delivery days must be non-negative",
        ));
    }
    policy.validate()?;

    let materials_subtotal = materials.subtotal();
    let labor_subtotal = labor.subtotal();
    let logistics = logistics_cost(
        delivery_days,
        policy.daily_fee,
        policy.daily_rate,
        materials_subtotal + labor_subtotal,
    );

    let mut breakdown = CostBreakdown::new();
    breakdown.push(LINE_MATERIALS_SUBTOTAL, materials_subtotal);
    breakdown.push(LINE_LABOR_SUBTOTAL, labor_subtotal);
    breakdown.push(LINE_LOGISTICS, logistics);
    breakdown.push(LINE_TOTAL, materials_subtotal + labor_subtotal + logistics);
    Ok(breakdown)
}

/// The three breakdowns of an estimate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StairCostResult {
    pub materials: CostBreakdown,
    pub labor: CostBreakdown,
    pub total: CostBreakdown,
    pub equations: EquationTracker,
}

impl StairCostResult {
    /// The "Costo Total Proyecto (COP)" amount
    pub fn total_cop(&self) -> f64 {
        self.total.get(LINE_TOTAL).unwrap_or_default()
    }
}

/// Run the full estimate.
pub fn calculate(input: &StairCostInput, policy: &LogisticsPolicy) -> CalcResult<StairCostResult> {
    let materials = materials_costs(input)?;
    let labor = labor_costs(input)?;
    let total = total_costs(&materials, &labor, input.delivery_days, policy)?;

    let mut equations = EquationTracker::new();
    equations.record_for_member(Equation::MaterialLineCost, "Materiales", &input.label);
    equations.record_for_member(Equation::MaterialLineCost, LINE_CONSUMABLES, &input.label);
    equations.record_for_member(Equation::LaborCost, LINE_LABOR, &input.label);
    equations.record_for_member(Equation::LogisticsCost, LINE_LOGISTICS, &input.label);
    equations.record_for_member(Equation::ProjectTotal, "Resumen Total", &input.label);

    debug!(
        label = %input.label,
        materials = materials.subtotal(),
        labor = labor.subtotal(),
        total = total.get(LINE_TOTAL),
        "stair cost computed"
    );

    Ok(StairCostResult {
        materials,
        labor,
        total,
        equations,
    })
}

/// Format a peso amount with thousands separators and two decimals.
///
/// ```rust
/// use calc_core::calculations::stair_cost::format_cop;
///
/// assert_eq!(format_cop(3_139_300.0), "3,139,300.00");
/// assert_eq!(format_cop(-1234.5), "-1,234.50");
/// ```
pub fn format_cop(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u128;
    let whole = (cents / 100).to_string();
    let fraction = cents % 100;

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}{}.{:02}", sign, grouped, fraction)
}
