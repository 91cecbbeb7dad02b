//! # PDF Generation Module
//!
//! Renders the pipe thickness report with Typst.
//!
//! ## Architecture
//!
//! - The Typst template is embedded as a string constant
//! - Data is injected via `{{PLACEHOLDER}}` replacement before compilation
//! - Fonts come from `typst-assets`, so no files are read at runtime
//! - Output is raw PDF bytes (`Vec<u8>`)
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::calculations::pipe_thickness::{calculate, PipeThicknessInput};
//! use calc_core::config::ReportSettings;
//! use calc_core::pdf::render_pipe_pdf;
//! use calc_core::schedules::ScheduleClass;
//! use calc_core::units::{Quantity, QuantityKind};
//!
//! let input = PipeThicknessInput {
//!     label: "L-101".to_string(),
//!     pressure: Quantity::si(1.0, QuantityKind::Pressure),
//!     outside_diameter: Quantity::si(60.3, QuantityKind::Length),
//!     allowable_stress: Quantity::si(138.0, QuantityKind::Stress),
//!     joint_efficiency: 1.0,
//!     y_coefficient: 0.4,
//!     allowance: Quantity::si(1.0, QuantityKind::Length),
//!     nominal_size: "2".to_string(),
//!     schedule: ScheduleClass::Sch40,
//! };
//!
//! let result = calculate(&input).unwrap();
//! let pdf_bytes = render_pipe_pdf(&input, &result, &ReportSettings::default()).unwrap();
//! std::fs::write("informe_tuberia.pdf", pdf_bytes).unwrap();
//! ```

use chrono::Local;
use tracing::info;
use typst::diag::{FileError, FileResult};
use typst::foundations::{Bytes, Datetime};
use typst::syntax::{FileId, Source};
use typst::text::{Font, FontBook};
use typst::utils::LazyHash;
use typst::{Library, LibraryExt, World};
use typst_pdf::PdfOptions;

use crate::calculations::pipe_thickness::{PipeThicknessInput, PipeThicknessResult};
use crate::config::ReportSettings;
use crate::errors::{CalcError, CalcResult};
use crate::report::{pipe_result_lines, procedure_text};

// ============================================================================
// Typst World Implementation
// ============================================================================

/// A minimal Typst world for compiling documents without external files.
struct PdfWorld {
    /// The main source document
    main: Source,
    book: LazyHash<FontBook>,
    fonts: Vec<Font>,
    library: LazyHash<Library>,
}

impl PdfWorld {
    fn new(source: String) -> Self {
        let fonts = Self::load_fonts();
        let book = FontBook::from_fonts(&fonts);

        PdfWorld {
            main: Source::detached(source),
            book: LazyHash::new(book),
            fonts,
            library: LazyHash::new(Library::default()),
        }
    }

    /// Bundled fonts only (Libertinus Serif, New Computer Modern, DejaVu Sans Mono)
    fn load_fonts() -> Vec<Font> {
        typst_assets::fonts()
            .flat_map(|font_bytes| Font::iter(Bytes::new(font_bytes.to_vec())))
            .collect()
    }
}

impl World for PdfWorld {
    fn library(&self) -> &LazyHash<Library> {
        &self.library
    }

    fn book(&self) -> &LazyHash<FontBook> {
        &self.book
    }

    fn main(&self) -> FileId {
        self.main.id()
    }

    fn source(&self, id: FileId) -> FileResult<Source> {
        if id == self.main.id() {
            Ok(self.main.clone())
        } else {
            Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
        }
    }

    fn file(&self, id: FileId) -> FileResult<Bytes> {
        Err(FileError::NotFound(id.vpath().as_rootless_path().into()))
    }

    fn font(&self, index: usize) -> Option<Font> {
        self.fonts.get(index).cloned()
    }

    fn today(&self, _offset: Option<i64>) -> Option<Datetime> {
        let now = Local::now();
        Datetime::from_ymd(
            now.format("%Y").to_string().parse().ok()?,
            now.format("%m").to_string().parse().ok()?,
            now.format("%d").to_string().parse().ok()?,
        )
    }
}

// ============================================================================
// PDF Template
// ============================================================================

const PIPE_TEMPLATE: &str = r##"
#set page(
  paper: "a4",
  margin: (top: 2.5cm, bottom: 2.5cm, left: 2cm, right: 2cm),
  header: align(right)[
    #text(size: 9pt, fill: gray)[{{COMPANY}}]
  ],
  footer: context [
    #line(length: 100%, stroke: 0.5pt + gray)
    #v(4pt)
    #grid(
      columns: (1fr, 1fr, 1fr),
      align(left)[#text(size: 9pt)[Trabajo: {{JOB_ID}}]],
      align(center)[#text(size: 9pt)[Página #counter(page).display()]],
      align(right)[#text(size: 9pt)[{{DATE}}]],
    )
  ]
)

#set text(font: "Libertinus Serif", size: 11pt, lang: "es")

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[Calculadora de Tubería - Informe de Resultados]
    #v(4pt)
    #text(size: 12pt)[{{LABEL}}]
  ]
]

#v(12pt)

#table(
  columns: (auto, 1fr),
  stroke: none,
  row-gutter: 4pt,
  [Ingeniero:], [{{ENGINEER}}],
  [Trabajo:], [{{JOB_ID}}],
  [Fecha:], [{{DATE}}],
  [Código:], [ASME B31.3 para. 304.1.2],
)

#v(8pt)
#line(length: 100%, stroke: 0.5pt)

== Parámetros de Entrada

#table(
  columns: (1fr, auto),
  inset: 8pt,
  stroke: 0.5pt,
  align: (left, right),
  [Presión interna], [{{PRESSURE}}],
  [Diámetro externo], [{{DIAMETER}}],
  [Esfuerzo admisible], [{{STRESS}}],
  [E, Y, C], [E: {{E}}, Y: {{Y}}, C: {{ALLOWANCE}}],
  [Tamaño nominal / Schedule], [{{SIZE}}" / {{SCHEDULE}}],
)

== Resultados

{{RESULT_LINES}}

#v(12pt)

#let verdict = "{{VERDICT}}"
#if verdict != "" [
  #align(center)[
    #block(
      width: auto,
      fill: if verdict == "ADECUADO" { rgb("#d4edda") } else { rgb("#f8d7da") },
      inset: 14pt,
      radius: 4pt
    )[
      #text(size: 14pt, weight: "bold")[{{SCHEDULE}}: #verdict]
    ]
  ]
] else [
  #text(style: "italic")[El schedule {{SCHEDULE}} no tiene espesor tabulado para {{SIZE}}".]
]

#pagebreak()

== Procedimiento Detallado de Cálculo

#set text(size: 9pt)
#raw(block: true, {{PROCEDURE}})
#set text(size: 11pt)

#v(24pt)
#text(size: 9pt, fill: gray)[
  Los resultados deben ser verificados por un ingeniero responsable.
]
"##;

// ============================================================================
// PDF Rendering
// ============================================================================

/// Render a pipe thickness result to PDF.
///
/// Input parameters are shown in the units the user entered; the procedure
/// page and results use the SI values the formulas ran on.
///
/// # Errors
///
/// `ExportFailed` when Typst compilation or PDF serialisation fails.
pub fn render_pipe_pdf(
    input: &PipeThicknessInput,
    result: &PipeThicknessResult,
    settings: &ReportSettings,
) -> CalcResult<Vec<u8>> {
    let date = Local::now().format("%Y-%m-%d").to_string();

    let result_lines = pipe_result_lines(result)
        .iter()
        .map(|line| format!("- {}", escape_typst(line)))
        .collect::<Vec<_>>()
        .join("\n");

    let verdict = result
        .schedule_check
        .map(|check| check.verdict())
        .unwrap_or("");

    let mut source = PIPE_TEMPLATE
        .replace("{{COMPANY}}", &escape_typst(&settings.company))
        .replace("{{ENGINEER}}", &escape_typst(&settings.engineer))
        .replace("{{JOB_ID}}", &escape_typst(&settings.job_id))
        .replace("{{DATE}}", &date)
        .replace("{{LABEL}}", &escape_typst(&input.label))
        .replace("{{PRESSURE}}", &input.pressure.to_string())
        .replace("{{DIAMETER}}", &input.outside_diameter.to_string())
        .replace("{{STRESS}}", &input.allowable_stress.to_string())
        .replace("{{E}}", &format!("{:.2}", input.joint_efficiency))
        .replace("{{Y}}", &format!("{:.2}", input.y_coefficient))
        .replace("{{ALLOWANCE}}", &input.allowance.to_string())
        .replace("{{SIZE}}", &escape_typst(&input.nominal_size))
        .replace("{{SCHEDULE}}", &input.schedule.to_string())
        .replace("{{RESULT_LINES}}", &result_lines)
        .replace("{{VERDICT}}", verdict)
        .replace("{{PROCEDURE}}", &typst_string(&procedure_text(result)));

    source.push_str(&result.equations.generate_appendix_typst());

    let pdf_bytes = compile_pdf(source)?;
    info!(label = %input.label, bytes = pdf_bytes.len(), "pipe report rendered");
    Ok(pdf_bytes)
}

/// Compile a Typst source string to PDF bytes.
fn compile_pdf(source: String) -> CalcResult<Vec<u8>> {
    let world = PdfWorld::new(source);
    let warned = typst::compile(&world);

    let document = warned.output.map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::export_failed("pdf", format!("Typst compilation failed: {}", error_msgs.join("; ")))
    })?;

    typst_pdf::pdf(&document, &PdfOptions::default()).map_err(|errors| {
        let error_msgs: Vec<String> = errors.iter().map(|e| e.message.to_string()).collect();
        CalcError::export_failed("pdf", format!("PDF rendering failed: {}", error_msgs.join("; ")))
    })
}

/// Escape special Typst characters in user-provided text
fn escape_typst(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            '*' => "\\*".to_string(),
            '_' => "\\_".to_string(),
            '#' => "\\#".to_string(),
            '$' => "\\$".to_string(),
            '@' => "\\@".to_string(),
            '<' => "\\<".to_string(),
            '>' => "\\>".to_string(),
            '[' => "\\[".to_string(),
            ']' => "\\]".to_string(),
            '\\' => "\\\\".to_string(),
            '`' => "\\`".to_string(),
            '/' => "\\/".to_string(),
            _ => c.to_string(),
        })
        .collect()
}

/// Quote text as a Typst string literal
fn typst_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}
