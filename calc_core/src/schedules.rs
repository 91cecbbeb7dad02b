//! Standard Pipe Schedules
//!
//! Nominal wall thickness (mm) by schedule class and nominal pipe size, per
//! ASME B36.10M (carbon steel, SCH40/80/160) and B36.19M (stainless, 5S/10S).
//!
//! The table is built once and never mutated. A size/schedule pair without a
//! standard thickness is absent (`None`), never zero, so downstream safety
//! factor math cannot silently use a wrong value.
//!
//! ## Example
//!
//! ```rust
//! use calc_core::schedules::{lookup_schedule_thickness, ScheduleClass};
//!
//! assert_eq!(lookup_schedule_thickness(ScheduleClass::Sch40, "1/2"), Some(2.77));
//! assert_eq!(lookup_schedule_thickness(ScheduleClass::Sch160, "3 1/2"), None);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Schedule class (wall thickness series)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ScheduleClass {
    /// SCH5S (stainless, light wall)
    #[serde(rename = "SCH5")]
    Sch5S,
    /// SCH10S (stainless)
    #[serde(rename = "SCH10")]
    Sch10S,
    /// SCH40 (standard wall for sizes up to 10")
    #[serde(rename = "SCH40")]
    Sch40,
    /// SCH80 (extra strong up to 8")
    #[serde(rename = "SCH80")]
    Sch80,
    /// SCH160
    #[serde(rename = "SCH160")]
    Sch160,
}

impl ScheduleClass {
    /// All schedule classes, thinnest first
    pub const ALL: [ScheduleClass; 5] = [
        ScheduleClass::Sch5S,
        ScheduleClass::Sch10S,
        ScheduleClass::Sch40,
        ScheduleClass::Sch80,
        ScheduleClass::Sch160,
    ];

    /// The integer class number (5, 10, 40, 80, 160)
    pub fn number(&self) -> u16 {
        match self {
            ScheduleClass::Sch5S => 5,
            ScheduleClass::Sch10S => 10,
            ScheduleClass::Sch40 => 40,
            ScheduleClass::Sch80 => 80,
            ScheduleClass::Sch160 => 160,
        }
    }

    /// Look up a class by its integer number
    pub fn from_number(number: u16) -> Option<ScheduleClass> {
        ScheduleClass::ALL.into_iter().find(|s| s.number() == number)
    }
}

impl fmt::Display for ScheduleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SCH{}", self.number())
    }
}

impl FromStr for ScheduleClass {
    type Err = CalcError;

    /// Accepts "SCH40", "sch40", "40", "SCH10S", "10S"
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        let digits = upper
            .trim_start_matches("SCH")
            .trim_end_matches('S')
            .trim();
        digits
            .parse::<u16>()
            .ok()
            .and_then(ScheduleClass::from_number)
            .ok_or_else(|| {
                CalcError::invalid_input("schedule", s, "Expected one of SCH5, SCH10, SCH40, SCH80, SCH160")
            })
    }
}

/// Nominal pipe sizes (inches) in ascending order
pub const NOMINAL_SIZES: [&str; 10] = [
    "1/2", "3/4", "1", "1 1/4", "1 1/2", "2", "2 1/2", "3", "3 1/2", "4",
];

type Table = BTreeMap<ScheduleClass, BTreeMap<&'static str, f64>>;

static SCHEDULE_TABLE: Lazy<Table> = Lazy::new(|| {
    let rows: [(ScheduleClass, &[(&str, f64)]); 5] = [
        (
            ScheduleClass::Sch5S,
            &[
                ("1/2", 1.65), ("3/4", 1.65), ("1", 1.65), ("1 1/4", 1.65), ("1 1/2", 1.65),
                ("2", 1.65), ("2 1/2", 2.11), ("3", 2.11), ("3 1/2", 2.11), ("4", 2.11),
            ],
        ),
        (
            ScheduleClass::Sch10S,
            &[
                ("1/2", 2.11), ("3/4", 2.11), ("1", 2.77), ("1 1/4", 2.77), ("1 1/2", 2.77),
                ("2", 2.77), ("2 1/2", 3.05), ("3", 3.05), ("3 1/2", 3.05), ("4", 3.05),
            ],
        ),
        (
            ScheduleClass::Sch40,
            &[
                ("1/2", 2.77), ("3/4", 2.87), ("1", 3.38), ("1 1/4", 3.56), ("1 1/2", 3.68),
                ("2", 3.91), ("2 1/2", 5.16), ("3", 5.49), ("3 1/2", 5.74), ("4", 6.02),
            ],
        ),
        (
            ScheduleClass::Sch80,
            &[
                ("1/2", 3.73), ("3/4", 3.91), ("1", 4.55), ("1 1/4", 4.85), ("1 1/2", 5.08),
                ("2", 5.54), ("2 1/2", 7.01), ("3", 7.62), ("3 1/2", 8.08), ("4", 8.56),
            ],
        ),
        (
            // No SCH160 is listed for 3 1/2"
            ScheduleClass::Sch160,
            &[
                ("1/2", 4.78), ("3/4", 5.56), ("1", 6.35), ("1 1/4", 6.35), ("1 1/2", 7.14),
                ("2", 8.74), ("2 1/2", 9.53), ("3", 11.13), ("4", 13.49),
            ],
        ),
    ];

    rows.into_iter()
        .map(|(schedule, sizes)| (schedule, sizes.iter().copied().collect()))
        .collect()
});

/// Standard wall thickness (mm) for a schedule and nominal size.
///
/// Returns `None` when the pair has no standard thickness.
pub fn lookup_schedule_thickness(schedule: ScheduleClass, nominal_size: &str) -> Option<f64> {
    SCHEDULE_TABLE
        .get(&schedule)
        .and_then(|sizes| sizes.get(nominal_size.trim()))
        .copied()
}

/// Schedules that list a thickness for the given nominal size
pub fn available_schedules(nominal_size: &str) -> Vec<ScheduleClass> {
    ScheduleClass::ALL
        .into_iter()
        .filter(|s| lookup_schedule_thickness(*s, nominal_size).is_some())
        .collect()
}

/// True if the size appears in the nominal size list
pub fn is_known_size(nominal_size: &str) -> bool {
    let size = nominal_size.trim();
    NOMINAL_SIZES.iter().any(|s| *s == size)
}
