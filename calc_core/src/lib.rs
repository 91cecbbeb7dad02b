//! # calc_core - Piping and Fabrication Calculation Engine
//!
//! `calc_core` is the computational heart of Forja: an ASME B31.3 pipe wall
//! thickness calculator and a metal staircase cost estimator. All inputs and
//! outputs are JSON-serializable, and reports (PDF, XLSX) are rendered from
//! already-computed results.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **SI inside**: User units are normalised once, formulas only see MPa and mm
//! - **Rich Errors**: Structured error types, not just strings
//! - **Absent, not zero**: Missing schedule data is `None` all the way down
//!
//! ## Quick Start
//!
//! ```rust
//! use calc_core::calculations::stair_cost::{calculate, LogisticsPolicy, StairCostInput};
//! use calc_core::report::stair_summary_line;
//!
//! let result = calculate(&StairCostInput::default(), &LogisticsPolicy::default()).unwrap();
//! println!("{}", stair_summary_line(&result));
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit conversion and type-safe unit wrappers
//! - [`schedules`] - Standard pipe schedule wall thicknesses
//! - [`equations`] - Formulas and the equation registry
//! - [`calculations`] - Pipe thickness and staircase cost calculations
//! - [`report`] - Plain-text result lines and calculation procedure
//! - [`pdf`] - Typst-rendered PDF report
//! - [`spreadsheet`] - XLSX cost breakdown
//! - [`config`] - TOML settings
//! - [`file_io`] - Atomic artifact writes
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod config;
pub mod equations;
pub mod errors;
pub mod file_io;
pub mod pdf;
pub mod report;
pub mod schedules;
pub mod spreadsheet;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{CalculationItem, CalculationOutput};
pub use config::Settings;
pub use errors::{CalcError, CalcResult};
pub use units::{Quantity, QuantityKind, Unit};
