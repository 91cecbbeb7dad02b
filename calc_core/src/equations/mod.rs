//! # Calculator Equations
//!
//! Every formula the calculators evaluate lives here, as small pure
//! functions over SI values. Keeping them in one place enables:
//! - Verification against the code paragraph they come from
//! - A single source for the equation registry and PDF appendix
//! - Consistent implementation between the CLI and report output
//!
//! ## Modules
//!
//! - [`pipe`] - ASME B31.3 straight pipe under internal pressure
//! - [`cost`] - Staircase cost line items
//! - [`registry`] - Equation metadata and tracking for PDF appendix generation
//!
//! ## Units
//!
//! - **Pressure / stress**: MPa
//! - **Length / thickness**: mm
//! - **Money**: COP
//!
//! ## References
//!
//! - ASME B31.3-2022: Process Piping, para. 304.1.2
//! - ASME B36.10M / B36.19M: Welded and seamless pipe dimensions

pub mod cost;
pub mod pipe;
pub mod registry;

pub use cost::{labor_cost, linear_cost, logistics_cost};
pub use pipe::{max_allowable_pressure, required_thickness, safety_factor};

pub use registry::{
    CodeReference,
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
