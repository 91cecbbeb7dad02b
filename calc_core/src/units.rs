//! # Unit Types
//!
//! Unit handling for the pipe calculator. Every conversion factor lives in
//! one table keyed by `(QuantityKind, Unit)`; call sites never carry their
//! own literals.
//!
//! ## SI Base Units
//!
//! Formulas are defined only in SI, so every input is normalised once at the
//! boundary:
//! - Pressure and stress: megapascal (MPa)
//! - Length: millimeter (mm)
//!
//! Imperial companions are psi and inch. Bar and kPa are accepted for
//! pressure and resolve through the same table (1 bar = 0.1 MPa = 100 kPa).
//!
//! ## Example
//!
//! ```rust
//! use calc_core::units::{to_imperial, to_si, Quantity, QuantityKind, Unit};
//!
//! let psi = to_imperial(1.0, QuantityKind::Pressure);
//! assert!((psi - 145.038).abs() < 1e-9);
//! assert!((to_si(psi, QuantityKind::Pressure) - 1.0).abs() < 1e-12);
//!
//! let p = Quantity::new(10.0, QuantityKind::Pressure, Unit::Bar).unwrap();
//! assert!((p.to_si().unwrap() - 1.0).abs() < 1e-12);
//! ```

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};

// ============================================================================
// Conversion Factors
// ============================================================================

/// psi per megapascal
pub const PSI_PER_MPA: f64 = 145.038;

/// millimeters per inch
pub const MM_PER_INCH: f64 = 25.4;

/// megapascals per bar
pub const MPA_PER_BAR: f64 = 0.1;

/// kilopascals per megapascal
pub const KPA_PER_MPA: f64 = 1000.0;

/// Conversion from a unit to its SI base: `base = value * mul / div`.
///
/// Keeping numerator and denominator apart means MPa -> psi is exactly
/// `value * 145.038` and mm -> inch is exactly `value / 25.4`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitFactor {
    pub mul: f64,
    pub div: f64,
}

impl UnitFactor {
    pub const IDENTITY: UnitFactor = UnitFactor { mul: 1.0, div: 1.0 };

    /// Convert a value in this unit to the SI base unit
    pub fn to_base(self, value: f64) -> f64 {
        value * self.mul / self.div
    }

    /// Convert a value in the SI base unit to this unit
    pub fn from_base(self, value: f64) -> f64 {
        value * self.div / self.mul
    }
}

const MPA: UnitFactor = UnitFactor::IDENTITY;
const PSI: UnitFactor = UnitFactor { mul: 1.0, div: PSI_PER_MPA };
const BAR: UnitFactor = UnitFactor { mul: MPA_PER_BAR, div: 1.0 };
const KPA: UnitFactor = UnitFactor { mul: 1.0, div: KPA_PER_MPA };
const MM: UnitFactor = UnitFactor::IDENTITY;
const INCH: UnitFactor = UnitFactor { mul: MM_PER_INCH, div: 1.0 };

/// The conversion table. `None` means the unit does not measure that kind.
pub fn unit_factor(kind: QuantityKind, unit: Unit) -> Option<UnitFactor> {
    use QuantityKind::*;
    match (kind, unit) {
        (Pressure | Stress, Unit::Megapascal) => Some(MPA),
        (Pressure | Stress, Unit::Psi) => Some(PSI),
        (Pressure, Unit::Bar) => Some(BAR),
        (Pressure, Unit::Kilopascal) => Some(KPA),
        (Length, Unit::Millimeter) => Some(MM),
        (Length, Unit::Inch) => Some(INCH),
        _ => None,
    }
}

// ============================================================================
// Quantity Kinds and Units
// ============================================================================

/// Physical quantity measured by a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    Pressure,
    Length,
    Stress,
}

impl QuantityKind {
    /// SI unit the formulas expect for this kind
    pub fn si_unit(self) -> Unit {
        match self {
            QuantityKind::Pressure | QuantityKind::Stress => Unit::Megapascal,
            QuantityKind::Length => Unit::Millimeter,
        }
    }

    /// Imperial counterpart of the SI unit
    pub fn imperial_unit(self) -> Unit {
        match self {
            QuantityKind::Pressure | QuantityKind::Stress => Unit::Psi,
            QuantityKind::Length => Unit::Inch,
        }
    }

    /// Units accepted for this kind
    pub fn units(self) -> &'static [Unit] {
        match self {
            QuantityKind::Pressure => &[Unit::Megapascal, Unit::Psi, Unit::Bar, Unit::Kilopascal],
            QuantityKind::Stress => &[Unit::Megapascal, Unit::Psi],
            QuantityKind::Length => &[Unit::Millimeter, Unit::Inch],
        }
    }

    /// First kind that accepts `unit`; MPa and psi resolve to pressure.
    pub fn infer(unit: Unit) -> Option<QuantityKind> {
        [QuantityKind::Pressure, QuantityKind::Length, QuantityKind::Stress]
            .into_iter()
            .find(|kind| kind.units().contains(&unit))
    }
}

/// Measurement system a unit belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitSystem {
    Si,
    Imperial,
}

/// Units understood by the calculators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "MPa")]
    Megapascal,
    #[serde(rename = "psi")]
    Psi,
    #[serde(rename = "bar")]
    Bar,
    #[serde(rename = "kPa")]
    Kilopascal,
    #[serde(rename = "mm")]
    Millimeter,
    #[serde(rename = "inches")]
    Inch,
}

impl Unit {
    /// Label shown next to values in results and reports
    pub fn label(self) -> &'static str {
        match self {
            Unit::Megapascal => "MPa",
            Unit::Psi => "psi",
            Unit::Bar => "bar",
            Unit::Kilopascal => "kPa",
            Unit::Millimeter => "mm",
            Unit::Inch => "inches",
        }
    }

    pub fn system(self) -> UnitSystem {
        match self {
            Unit::Psi | Unit::Inch => UnitSystem::Imperial,
            Unit::Megapascal | Unit::Bar | Unit::Kilopascal | Unit::Millimeter => UnitSystem::Si,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Unit {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mpa" => Ok(Unit::Megapascal),
            "psi" => Ok(Unit::Psi),
            "bar" => Ok(Unit::Bar),
            "kpa" => Ok(Unit::Kilopascal),
            "mm" => Ok(Unit::Millimeter),
            "in" | "inch" | "inches" => Ok(Unit::Inch),
            _ => Err(CalcError::invalid_input(
                "unit",
                s,
                "Expected one of MPa, psi, bar, kPa, mm, in",
            )),
        }
    }
}

// ============================================================================
// Free Conversion Functions
// ============================================================================

/// Convert an SI value (MPa or mm) to imperial (psi or inch).
pub fn to_imperial(value: f64, kind: QuantityKind) -> f64 {
    match kind {
        QuantityKind::Pressure | QuantityKind::Stress => PSI.from_base(value),
        QuantityKind::Length => INCH.from_base(value),
    }
}

/// Convert an imperial value (psi or inch) to SI (MPa or mm).
pub fn to_si(value: f64, kind: QuantityKind) -> f64 {
    match kind {
        QuantityKind::Pressure | QuantityKind::Stress => PSI.to_base(value),
        QuantityKind::Length => INCH.to_base(value),
    }
}

// ============================================================================
// Quantity
// ============================================================================

/// A value tagged with what it measures and the unit it was entered in.
///
/// ## JSON Example
///
/// ```json
/// { "value": 150.0, "kind": "pressure", "unit": "psi" }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quantity {
    pub value: f64,
    pub kind: QuantityKind,
    pub unit: Unit,
}

impl Quantity {
    /// Create a quantity, rejecting units that do not measure `kind`.
    pub fn new(value: f64, kind: QuantityKind, unit: Unit) -> CalcResult<Self> {
        if unit_factor(kind, unit).is_none() {
            return Err(CalcError::invalid_input(
                format!("{:?}", kind).to_lowercase(),
                format!("{} {}", value, unit),
                format!("Unit '{}' cannot measure {:?}", unit, kind),
            ));
        }
        Ok(Quantity { value, kind, unit })
    }

    /// Quantity already in the SI base unit of `kind`
    pub fn si(value: f64, kind: QuantityKind) -> Self {
        Quantity {
            value,
            kind,
            unit: kind.si_unit(),
        }
    }

    /// Value in the SI base unit (MPa or mm)
    pub fn to_si(&self) -> CalcResult<f64> {
        Ok(self.factor()?.to_base(self.value))
    }

    /// Re-express this quantity in another unit of the same kind.
    pub fn convert_to(&self, unit: Unit) -> CalcResult<Quantity> {
        let target = Quantity::new(0.0, self.kind, unit)?;
        let base = self.to_si()?;
        Ok(Quantity {
            value: target.factor()?.from_base(base),
            ..target
        })
    }

    pub fn system(&self) -> UnitSystem {
        self.unit.system()
    }

    fn factor(&self) -> CalcResult<UnitFactor> {
        unit_factor(self.kind, self.unit).ok_or_else(|| {
            CalcError::invalid_input(
                format!("{:?}", self.kind).to_lowercase(),
                self.unit.label(),
                "Unit does not match quantity kind",
            )
        })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.value, self.unit)
    }
}

/// The companion unit shown beside a user entry.
///
/// MPa and psi show each other, bar shows kPa, and lengths swap mm/inch.
pub fn display_equivalent(quantity: &Quantity) -> CalcResult<Quantity> {
    let companion = match quantity.unit {
        Unit::Megapascal => Unit::Psi,
        Unit::Psi => Unit::Megapascal,
        Unit::Bar => Unit::Kilopascal,
        Unit::Kilopascal => Unit::Megapascal,
        Unit::Millimeter => Unit::Inch,
        Unit::Inch => Unit::Millimeter,
    };
    quantity.convert_to(companion)
}

// ============================================================================
// Typed Wrappers
// ============================================================================

/// Pressure or stress in megapascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Megapascals(pub f64);

/// Pressure or stress in pounds per square inch
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Psi(pub f64);

/// Pressure in bar
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bar(pub f64);

/// Pressure in kilopascals
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilopascals(pub f64);

/// Length in millimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Millimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Megapascals> for Psi {
    fn from(mpa: Megapascals) -> Self {
        Psi(PSI.from_base(mpa.0))
    }
}

impl From<Psi> for Megapascals {
    fn from(psi: Psi) -> Self {
        Megapascals(PSI.to_base(psi.0))
    }
}

impl From<Bar> for Megapascals {
    fn from(bar: Bar) -> Self {
        Megapascals(BAR.to_base(bar.0))
    }
}

impl From<Bar> for Kilopascals {
    fn from(bar: Bar) -> Self {
        Kilopascals(KPA.from_base(BAR.to_base(bar.0)))
    }
}

impl From<Kilopascals> for Megapascals {
    fn from(kpa: Kilopascals) -> Self {
        Megapascals(KPA.to_base(kpa.0))
    }
}

impl From<Millimeters> for Inches {
    fn from(mm: Millimeters) -> Self {
        Inches(INCH.from_base(mm.0))
    }
}

impl From<Inches> for Millimeters {
    fn from(inches: Inches) -> Self {
        Millimeters(INCH.to_base(inches.0))
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Megapascals);
impl_arithmetic!(Psi);
impl_arithmetic!(Bar);
impl_arithmetic!(Kilopascals);
impl_arithmetic!(Millimeters);
impl_arithmetic!(Inches);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_units_agree_with_factor_table() {
        for kind in [QuantityKind::Pressure, QuantityKind::Length, QuantityKind::Stress] {
            for &unit in kind.units() {
                assert!(unit_factor(kind, unit).is_some(), "{:?} {:?}", kind, unit);
            }
            assert!(kind.units().contains(&kind.si_unit()));
            assert!(kind.units().contains(&kind.imperial_unit()));
            assert_eq!(kind.imperial_unit().system(), UnitSystem::Imperial);
        }
    }

    #[test]
    fn test_infer_kind() {
        assert_eq!(QuantityKind::infer(Unit::Bar), Some(QuantityKind::Pressure));
        assert_eq!(QuantityKind::infer(Unit::Psi), Some(QuantityKind::Pressure));
        assert_eq!(QuantityKind::infer(Unit::Inch), Some(QuantityKind::Length));
    }

    const KINDS: [QuantityKind; 3] = [QuantityKind::Pressure, QuantityKind::Length, QuantityKind::Stress];

    #[test]
    fn test_round_trip_all_kinds() {
        for kind in KINDS {
            for x in [1e-6, 0.4980, 1.0, 25.4, 145.038, 1234.5678, 1e6] {
                let back = to_si(to_imperial(x, kind), kind);
                assert!((back - x).abs() <= 1e-9 * x.max(1.0), "{:?} {} -> {}", kind, x, back);
            }
        }
    }

    #[test]
    fn test_reference_factors() {
        assert_eq!(to_imperial(1.0, QuantityKind::Pressure), 145.038);
        assert_eq!(to_imperial(2.0, QuantityKind::Stress), 290.076);
        assert_eq!(to_si(1.0, QuantityKind::Length), 25.4);
        assert_eq!(to_imperial(25.4, QuantityKind::Length), 1.0);
    }

    #[test]
    fn test_bar_paths_share_one_factor() {
        let p = Quantity::new(7.5, QuantityKind::Pressure, Unit::Bar).unwrap();
        let mpa = p.to_si().unwrap();
        let kpa = p.convert_to(Unit::Kilopascal).unwrap().value;
        assert!((mpa - 0.75).abs() < 1e-12);
        assert!((kpa - 750.0).abs() < 1e-9);
        // kPa and MPa derived from the same bar reading must agree
        assert!((kpa / KPA_PER_MPA - mpa).abs() < 1e-12);

        let typed: Kilopascals = Bar(1.0).into();
        assert!((typed.0 - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_kind_mismatch_rejected() {
        assert!(Quantity::new(1.0, QuantityKind::Length, Unit::Psi).is_err());
        assert!(Quantity::new(1.0, QuantityKind::Stress, Unit::Bar).is_err());
        assert!(Quantity::new(1.0, QuantityKind::Pressure, Unit::Bar).is_ok());
    }

    #[test]
    fn test_display_equivalent() {
        let p = Quantity::new(1.0, QuantityKind::Pressure, Unit::Megapascal).unwrap();
        let eq = display_equivalent(&p).unwrap();
        assert_eq!(eq.unit, Unit::Psi);
        assert_eq!(eq.to_string(), "145.04 psi");

        let b = Quantity::new(2.0, QuantityKind::Pressure, Unit::Bar).unwrap();
        assert_eq!(display_equivalent(&b).unwrap().to_string(), "200.00 kPa");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("MPa".parse::<Unit>().unwrap(), Unit::Megapascal);
        assert_eq!("inches".parse::<Unit>().unwrap(), Unit::Inch);
        assert_eq!(" in ".parse::<Unit>().unwrap(), Unit::Inch);
        assert!("furlong".parse::<Unit>().is_err());
    }

    #[test]
    fn test_typed_wrappers() {
        let t: Inches = Millimeters(50.8).into();
        assert!((t.0 - 2.0).abs() < 1e-12);
        let sum = Millimeters(1.0) + Millimeters(2.5);
        assert_eq!(sum.value(), 3.5);
        let psi: Psi = Megapascals(1.0).into();
        assert_eq!(psi.0, 145.038);
    }

    #[test]
    fn test_serialization() {
        let q = Quantity::new(150.0, QuantityKind::Pressure, Unit::Psi).unwrap();
        let json = serde_json::to_string(&q).unwrap();
        assert_eq!(json, r#"{"value":150.0,"kind":"pressure","unit":"psi"}"#);
        let roundtrip: Quantity = serde_json::from_str(&json).unwrap();
        assert_eq!(q, roundtrip);

        assert_eq!(serde_json::to_string(&Millimeters(2.77)).unwrap(), "2.77");
    }
}
