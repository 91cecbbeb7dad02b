//! XLSX export of a staircase estimate.
//!
//! One worksheet per breakdown ("Materiales", "Fabricación", "Resumen Total"),
//! each a two-column table of label and "Costo" with a bold header row.

use rust_xlsxwriter::{Format, Workbook, XlsxError};
use tracing::info;

use crate::calculations::stair_cost::{CostBreakdown, StairCostResult};
use crate::errors::{CalcError, CalcResult};

pub const SHEET_MATERIALS: &str = "Materiales";
pub const SHEET_LABOR: &str = "Fabricación";
pub const SHEET_TOTAL: &str = "Resumen Total";

const MONEY_FORMAT: &str = "#,##0.00";

/// Header row written on every sheet
pub const HEADER: [&str; 2] = ["Concepto", "Costo"];

/// One worksheet as it is written: a name plus one row per cost line
/// below the header.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetPlan<'a> {
    pub name: &'a str,
    pub rows: Vec<(&'a str, f64)>,
}

impl<'a> SheetPlan<'a> {
    fn from_breakdown(name: &'a str, breakdown: &'a CostBreakdown) -> Self {
        SheetPlan {
            name,
            rows: breakdown
                .lines()
                .iter()
                .map(|line| (line.label.as_str(), line.amount))
                .collect(),
        }
    }
}

/// Lay out the three breakdowns in workbook order.
pub fn plan_cost_sheets<'a>(
    materials: &'a CostBreakdown,
    labor: &'a CostBreakdown,
    total: &'a CostBreakdown,
) -> Vec<SheetPlan<'a>> {
    vec![
        SheetPlan::from_breakdown(SHEET_MATERIALS, materials),
        SheetPlan::from_breakdown(SHEET_LABOR, labor),
        SheetPlan::from_breakdown(SHEET_TOTAL, total),
    ]
}

/// Render the three breakdowns to an in-memory workbook.
pub fn render_cost_workbook(
    materials: &CostBreakdown,
    labor: &CostBreakdown,
    total: &CostBreakdown,
) -> CalcResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    write_sheets(&mut workbook, &plan_cost_sheets(materials, labor, total))
        .and_then(|()| workbook.save_to_buffer())
        .map(|bytes| {
            info!(bytes = bytes.len(), "cost workbook rendered");
            bytes
        })
        .map_err(|e| CalcError::export_failed("xlsx", e.to_string()))
}

/// Convenience wrapper over [`render_cost_workbook`] for a full estimate
pub fn render_stair_workbook(result: &StairCostResult) -> CalcResult<Vec<u8>> {
    render_cost_workbook(&result.materials, &result.labor, &result.total)
}

fn write_sheets(workbook: &mut Workbook, sheets: &[SheetPlan<'_>]) -> Result<(), XlsxError> {
    let header_format = Format::new().set_bold();
    let money_format = Format::new().set_num_format(MONEY_FORMAT);

    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name)?;
        worksheet.set_column_width(0, 28)?;
        worksheet.set_column_width(1, 18)?;

        worksheet.write_string_with_format(0, 0, HEADER[0], &header_format)?;
        worksheet.write_string_with_format(0, 1, HEADER[1], &header_format)?;

        for (row, (label, amount)) in (1u32..).zip(&sheet.rows) {
            worksheet.write_string(row, 0, *label)?;
            worksheet.write_number_with_format(row, 1, *amount, &money_format)?;
        }
    }

    Ok(())
}
