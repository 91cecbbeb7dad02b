//! # Forja CLI
//!
//! Command-line front end for the calc_core calculators:
//!
//! ```text
//! forja convert 150 psi
//! forja pipe --pressure 10 --pressure-unit bar --diameter 60.3 --stress 138 --size 2 --pdf informe.pdf
//! forja stairs --length 12 --delivery-days 5 --xlsx presupuesto.xlsx
//! forja schedules --size "1 1/2"
//! forja config --write
//! forja stairs --save-job escalera.json
//! forja run escalera.json --json
//! ```
//!
//! Errors are printed as a message plus the structured error JSON, and the
//! process exits with a failure code.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, Level};

use calc_core::calculations::pipe_thickness::{self, PipeThicknessInput, PipeThicknessResult};
use calc_core::calculations::stair_cost::{self, StairCostInput, StairCostResult};
use calc_core::calculations::{CalculationItem, CalculationOutput};
use calc_core::config::Settings;
use calc_core::errors::{CalcError, CalcResult};
use calc_core::file_io::{read_json, write_atomic, write_json};
use calc_core::pdf::render_pipe_pdf;
use calc_core::report::{
    breakdown_table, conversion_line, pipe_result_lines, procedure_text, stair_summary_line,
};
use calc_core::schedules::{available_schedules, lookup_schedule_thickness, ScheduleClass, NOMINAL_SIZES};
use calc_core::spreadsheet::{render_stair_workbook, SHEET_LABOR, SHEET_MATERIALS, SHEET_TOTAL};
use calc_core::units::{Quantity, QuantityKind, Unit};

#[derive(Parser)]
#[command(name = "forja")]
#[command(version, about = "Pipe wall thickness (ASME B31.3) and metal staircase cost calculators")]
struct Cli {
    /// Settings file (TOML); defaults are used when it does not exist
    #[arg(long, global = true, default_value = "forja.toml")]
    config: PathBuf,

    /// Logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: Level,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a pressure, stress or length to its companion unit
    Convert {
        value: f64,
        /// MPa, psi, bar, kPa, mm or in
        unit: Unit,
        /// Quantity kind; inferred from the unit when omitted
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        #[arg(long)]
        json: bool,
    },
    /// Required wall thickness and schedule check
    Pipe(PipeArgs),
    /// Staircase cost estimate
    Stairs(StairArgs),
    /// List standard schedule wall thicknesses
    Schedules {
        /// Only this nominal size, e.g. "1 1/2"
        #[arg(long)]
        size: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Print the effective settings as TOML
    Config {
        /// Write the settings to the --config path
        #[arg(long)]
        write: bool,
    },
    /// Run a calculation from a JSON job file
    Run {
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Pressure,
    Length,
    Stress,
}

impl From<KindArg> for QuantityKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Pressure => QuantityKind::Pressure,
            KindArg::Length => QuantityKind::Length,
            KindArg::Stress => QuantityKind::Stress,
        }
    }
}

#[derive(Args)]
struct OutputArgs {
    /// Print the result as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Write the pipe report PDF to this path
    #[arg(long)]
    pdf: Option<PathBuf>,

    /// Write the cost workbook to this path
    #[arg(long)]
    xlsx: Option<PathBuf>,
}

#[derive(Args)]
struct PipeArgs {
    #[arg(long, default_value = "Tubería")]
    label: String,

    /// Internal design pressure P
    #[arg(long)]
    pressure: f64,
    #[arg(long, default_value = "MPa")]
    pressure_unit: Unit,

    /// Outside diameter D
    #[arg(long)]
    diameter: f64,
    #[arg(long, default_value = "mm")]
    diameter_unit: Unit,

    /// Allowable stress S
    #[arg(long)]
    stress: f64,
    #[arg(long, default_value = "MPa")]
    stress_unit: Unit,

    /// Joint efficiency E
    #[arg(long, default_value_t = 1.0)]
    efficiency: f64,

    /// Coefficient Y
    #[arg(short = 'y', long, default_value_t = 0.4)]
    y_coefficient: f64,

    /// Corrosion / manufacturing allowance C
    #[arg(long, default_value_t = 0.0)]
    tolerance: f64,
    #[arg(long, default_value = "mm")]
    tolerance_unit: Unit,

    /// Nominal pipe size, e.g. "1/2" or "1 1/2"
    #[arg(long, default_value = "1/2")]
    size: String,

    #[arg(long, default_value = "SCH40")]
    schedule: ScheduleClass,

    /// Save the inputs as a job file for `run`
    #[arg(long)]
    save_job: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

impl PipeArgs {
    fn to_input(&self) -> CalcResult<PipeThicknessInput> {
        Ok(PipeThicknessInput {
            label: self.label.clone(),
            pressure: Quantity::new(self.pressure, QuantityKind::Pressure, self.pressure_unit)?,
            outside_diameter: Quantity::new(self.diameter, QuantityKind::Length, self.diameter_unit)?,
            allowable_stress: Quantity::new(self.stress, QuantityKind::Stress, self.stress_unit)?,
            joint_efficiency: self.efficiency,
            y_coefficient: self.y_coefficient,
            allowance: Quantity::new(self.tolerance, QuantityKind::Length, self.tolerance_unit)?,
            nominal_size: self.size.clone(),
            schedule: self.schedule,
        })
    }
}

#[derive(Args)]
struct StairArgs {
    #[arg(long, default_value = "Escalera")]
    label: String,

    /// Total staircase length (m)
    #[arg(long, default_value_t = 10.0)]
    length: f64,

    #[arg(long, default_value_t = 7.0)]
    delivery_days: f64,

    /// Metal steps (COP/m)
    #[arg(long, default_value_t = 150_000.0)]
    step_price: f64,

    /// Balustrades (COP/m)
    #[arg(long, default_value_t = 50_000.0)]
    balustrade_price: f64,

    /// Handrail (COP/m)
    #[arg(long, default_value_t = 46_000.0)]
    handrail_price: f64,

    /// Anti-slip strip (COP/m)
    #[arg(long, default_value_t = 20_000.0)]
    anti_slip_price: f64,

    /// Metalworking consumables (COP/m)
    #[arg(long, default_value_t = 25_000.0)]
    consumables_price: f64,

    #[arg(long, default_value_t = 8.0)]
    labor_hours: f64,

    /// Cost per man-hour (COP)
    #[arg(long, default_value_t = 20_000.0)]
    hourly_rate: f64,

    /// Save the inputs as a job file for `run`
    #[arg(long)]
    save_job: Option<PathBuf>,

    #[command(flatten)]
    output: OutputArgs,
}

impl StairArgs {
    fn to_input(&self) -> StairCostInput {
        StairCostInput {
            label: self.label.clone(),
            length_m: self.length,
            delivery_days: self.delivery_days,
            step_price: self.step_price,
            balustrade_price: self.balustrade_price,
            handrail_price: self.handrail_price,
            anti_slip_price: self.anti_slip_price,
            consumables_price: self.consumables_price,
            labor_hours: self.labor_hours,
            hourly_rate: self.hourly_rate,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!("{}", json);
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CalcResult<()> {
    let settings = Settings::load_or_default(&cli.config)?;
    debug!(config = %cli.config.display(), "settings resolved");

    match cli.command {
        Command::Convert { value, unit, kind, json } => convert(value, unit, kind, json),
        Command::Pipe(args) => {
            let input = args.to_input()?;
            let result = pipe_thickness::calculate(&input)?;
            if let Some(path) = &args.save_job {
                write_json(path, &CalculationItem::PipeThickness(input.clone()))?;
            }
            print_pipe(&input, &result, args.output.json)?;
            export_pipe(&settings, &args.output, &input, &result)
        }
        Command::Stairs(args) => {
            let input = args.to_input();
            let result = stair_cost::calculate(&input, &settings.logistics)?;
            if let Some(path) = &args.save_job {
                write_json(path, &CalculationItem::StairCost(input.clone()))?;
            }
            print_stairs(&result, args.output.json)?;
            export_stairs(&settings, &args.output, &result)
        }
        Command::Schedules { size, json } => schedules(size.as_deref(), json),
        Command::Config { write } => {
            print!("{}", settings.to_toml()?);
            if write {
                settings.save(&cli.config)?;
                eprintln!("Guardado: {}", cli.config.display());
            }
            Ok(())
        }
        Command::Run { file, output } => {
            let item: CalculationItem = read_json(&file)?;
            debug!(label = item.label(), kind = item.calc_type(), "job loaded");

            match (&item, item.run(&settings.logistics)?) {
                (CalculationItem::PipeThickness(input), CalculationOutput::PipeThickness(result)) => {
                    print_pipe(input, &result, output.json)?;
                    export_pipe(&settings, &output, input, &result)
                }
                (_, CalculationOutput::StairCost(result)) => {
                    print_stairs(&result, output.json)?;
                    export_stairs(&settings, &output, &result)
                }
                (_, CalculationOutput::PipeThickness(_)) => Err(CalcError::Internal {
                    message: "calculation output does not match its input".to_string(),
                }),
            }
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> CalcResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn convert(value: f64, unit: Unit, kind: Option<KindArg>, json: bool) -> CalcResult<()> {
    let kind = match kind {
        Some(kind) => QuantityKind::from(kind),
        None => QuantityKind::infer(unit).ok_or_else(|| {
            CalcError::invalid_input("unit", unit.to_string(), "Unit does not measure any known quantity")
        })?,
    };
    let quantity = Quantity::new(value, kind, unit)?;

    if json {
        #[derive(Serialize)]
        struct Conversion {
            input: Quantity,
            si: Quantity,
            imperial: Quantity,
            equivalent: Quantity,
        }
        return print_json(&Conversion {
            input: quantity,
            si: quantity.convert_to(kind.si_unit())?,
            imperial: quantity.convert_to(kind.imperial_unit())?,
            equivalent: calc_core::units::display_equivalent(&quantity)?,
        });
    }

    let name = match kind {
        QuantityKind::Pressure => "Presión",
        QuantityKind::Length => "Longitud",
        QuantityKind::Stress => "Esfuerzo",
    };
    println!("{}", conversion_line(name, &quantity)?);
    Ok(())
}

fn print_pipe(input: &PipeThicknessInput, result: &PipeThicknessResult, json: bool) -> CalcResult<()> {
    if json {
        return print_json(result);
    }

    println!("Conversiones de Unidades");
    println!("  {}", conversion_line("Presión", &input.pressure)?);
    println!();
    println!("Resultados");
    for line in pipe_result_lines(result) {
        println!("  {}", line);
    }
    if result.schedule_check.is_none() {
        println!(
            "  {} no tiene espesor tabulado para {}\"",
            input.schedule, input.nominal_size
        );
    }
    println!();
    println!("{}", procedure_text(result));
    Ok(())
}

fn print_stairs(result: &StairCostResult, json: bool) -> CalcResult<()> {
    if json {
        return print_json(result);
    }

    println!("{}", breakdown_table(SHEET_MATERIALS, &result.materials));
    println!("{}", breakdown_table(SHEET_LABOR, &result.labor));
    println!("{}", breakdown_table(SHEET_TOTAL, &result.total));
    println!("{}", stair_summary_line(result));
    Ok(())
}

fn export_pipe(
    settings: &Settings,
    output: &OutputArgs,
    input: &PipeThicknessInput,
    result: &PipeThicknessResult,
) -> CalcResult<()> {
    if output.xlsx.is_some() {
        return Err(CalcError::invalid_input("xlsx", "pipe", "Spreadsheets are only produced for staircase estimates"));
    }
    if let Some(path) = &output.pdf {
        let bytes = render_pipe_pdf(input, result, &settings.report)?;
        write_export(settings, path, &bytes)?;
    }
    Ok(())
}

fn export_stairs(settings: &Settings, output: &OutputArgs, result: &StairCostResult) -> CalcResult<()> {
    if output.pdf.is_some() {
        return Err(CalcError::invalid_input("pdf", "stairs", "PDF reports are only produced for pipe calculations"));
    }
    if let Some(path) = &output.xlsx {
        let bytes = render_stair_workbook(result)?;
        write_export(settings, path, &bytes)?;
    }
    Ok(())
}

fn write_export(settings: &Settings, path: &Path, bytes: &[u8]) -> CalcResult<()> {
    let target = settings.resolve_output(path);
    write_atomic(&target, bytes)?;
    eprintln!("Guardado: {}", target.display());
    Ok(())
}

fn schedules(size: Option<&str>, json: bool) -> CalcResult<()> {
    let sizes: Vec<&str> = match size {
        Some(s) => {
            let s = s.trim();
            if !calc_core::schedules::is_known_size(s) {
                return Err(CalcError::invalid_input(
                    "size",
                    s,
                    format!("Expected one of: {}", NOMINAL_SIZES.join(", ")),
                ));
            }
            vec![s]
        }
        None => NOMINAL_SIZES.to_vec(),
    };

    if json {
        #[derive(Serialize)]
        struct Row<'a> {
            size: &'a str,
            schedule: ScheduleClass,
            thickness_mm: f64,
        }
        let rows: Vec<Row> = sizes
            .iter()
            .flat_map(|&size| {
                available_schedules(size).into_iter().filter_map(move |schedule| {
                    lookup_schedule_thickness(schedule, size).map(|thickness_mm| Row {
                        size,
                        schedule,
                        thickness_mm,
                    })
                })
            })
            .collect();
        return print_json(&rows);
    }

    print!("{:>8}", "NPS");
    for schedule in ScheduleClass::ALL {
        print!("{:>9}", schedule.to_string());
    }
    println!();
    for size in sizes {
        print!("{:>8}", size);
        for schedule in ScheduleClass::ALL {
            match lookup_schedule_thickness(schedule, size) {
                Some(t) => print!("{:>9.2}", t),
                None => print!("{:>9}", "-"),
            }
        }
        println!();
    }
    Ok(())
}
