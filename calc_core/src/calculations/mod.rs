//! # Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`pipe_thickness`] - ASME B31.3 wall thickness with schedule check
//! - [`stair_cost`] - Metal staircase cost estimate

pub mod pipe_thickness;
pub mod stair_cost;

use serde::{Deserialize, Serialize};

pub use pipe_thickness::{PipeThicknessInput, PipeThicknessResult, ScheduleCheck};
pub use stair_cost::{CostBreakdown, CostLine, LogisticsPolicy, StairCostInput, StairCostResult};

use crate::errors::CalcResult;

/// Enum wrapper for all calculation types.
///
/// Lets a job file hold either calculator's input with a `"type"` tag:
///
/// ```json
/// { "type": "StairCost", "label": "Escalera", "length_m": 10.0, ... }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    PipeThickness(PipeThicknessInput),
    StairCost(StairCostInput),
}

/// Output of [`CalculationItem::run`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationOutput {
    PipeThickness(PipeThicknessResult),
    StairCost(StairCostResult),
}

impl CalculationItem {
    /// Get the user-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::PipeThickness(p) => &p.label,
            CalculationItem::StairCost(s) => &s.label,
        }
    }

    /// Get the calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::PipeThickness(_) => "PipeThickness",
            CalculationItem::StairCost(_) => "StairCost",
        }
    }

    /// Run the wrapped calculation. The policy only applies to staircases.
    pub fn run(&self, logistics: &LogisticsPolicy) -> CalcResult<CalculationOutput> {
        match self {
            CalculationItem::PipeThickness(input) => {
                pipe_thickness::calculate(input).map(CalculationOutput::PipeThickness)
            }
            CalculationItem::StairCost(input) => {
                stair_cost::calculate(input, logistics).map(CalculationOutput::StairCost)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_serialization() {
        let item = CalculationItem::StairCost(StairCostInput::default());
        let json = serde_json::to_string(&item).unwrap();
        assert!(json.starts_with(r#"{"type":"StairCost""#));

        let roundtrip: CalculationItem = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, item);
        assert_eq!(roundtrip.label(), "Escalera");
        assert_eq!(roundtrip.calc_type(), "StairCost");
    }

    #[test]
    fn test_run_dispatches() {
        let item = CalculationItem::StairCost(StairCostInput::default());
        match item.run(&LogisticsPolicy::default()).unwrap() {
            CalculationOutput::StairCost(result) => {
                assert_eq!(result.materials.subtotal(), 2_660_000.0);
            }
            other => panic!("unexpected output: {:?}", other),
        }
    }
}
