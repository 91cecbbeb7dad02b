//! # Equation Registry
//!
//! Central registry of every formula the calculators apply. Each equation
//! carries its code reference, formula text and variable definitions, so a
//! report can list exactly what was used.
//!
//! ## Usage
//!
//! ```rust
//! use calc_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_member(Equation::RequiredThickness, "Espesor mínimo", "L-101");
//!
//! let meta = Equation::RequiredThickness.metadata();
//! assert!(meta.formula_plain.contains("2(S*E + P*Y)"));
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// Code References
// ============================================================================

/// Reference to a code, standard, or estimating practice.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CodeReference {
    /// ASME B31.3 Process Piping
    AsmeB31_3 {
        year: u16,
        paragraph: &'static str,
    },
    /// ASME B36.10M / B36.19M pipe dimension standards
    AsmeB36 {
        standard: &'static str,
        year: u16,
    },
    /// NIST SP 811 unit conversion factors
    NistSp811,
    /// Unit-price cost estimating (quantity × unit price)
    UnitPriceEstimating,
}

impl CodeReference {
    /// Format the reference for display in reports
    pub fn citation(&self) -> String {
        match self {
            CodeReference::AsmeB31_3 { year, paragraph } => {
                format!("ASME B31.3-{} para. {}", year, paragraph)
            }
            CodeReference::AsmeB36 { standard, year } => {
                format!("ASME {}-{}", standard, year)
            }
            CodeReference::NistSp811 => "NIST SP 811 (2008), Appendix B".to_string(),
            CodeReference::UnitPriceEstimating => "Estimación por precios unitarios".to_string(),
        }
    }
}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the report appendix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Normalisation of user units to SI
    UnitConversions,
    /// Required wall thickness
    WallThickness,
    /// Pressure capacity of a given wall
    PressureCapacity,
    /// Comparisons against standard schedules
    DesignChecks,
    /// Staircase cost line items
    CostEstimating,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::UnitConversions => "Conversión de Unidades",
            EquationCategory::WallThickness => "Espesor de Pared",
            EquationCategory::PressureCapacity => "Presión Admisible",
            EquationCategory::DesignChecks => "Verificaciones de Diseño",
            EquationCategory::CostEstimating => "Estimación de Costos",
        }
    }

    /// Sort order for the appendix (lower = earlier)
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::UnitConversions => 1,
            EquationCategory::WallThickness => 2,
            EquationCategory::PressureCapacity => 3,
            EquationCategory::DesignChecks => 4,
            EquationCategory::CostEstimating => 5,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "P", "D", "t")
    pub symbol: &'static str,
    pub description: &'static str,
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Everything needed to cite an equation in a report or in EQUATIONS.md.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    pub name: &'static str,
    pub description: &'static str,
    /// The formula in Typst math notation for PDF rendering
    pub formula_typst: &'static str,
    /// The formula in plain text for markdown
    pub formula_plain: &'static str,
    pub reference: CodeReference,
    pub variables: Vec<Variable>,
    pub assumptions: Vec<&'static str>,
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by the calculators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    /// psi → MPa, inch → mm, bar → MPa
    UnitNormalization,
    /// t = PD / (2(SE + PY)) + C
    RequiredThickness,
    /// P_max = 2SEt / (D - 2Yt)
    MaxAllowablePressure,
    /// t_req ≤ t_sch
    ScheduleAdequacy,
    /// FS = P_max,sch / P
    SafetyFactor,
    /// price × length
    MaterialLineCost,
    /// hours × rate
    LaborCost,
    /// days × (fee + rate × subtotal)
    LogisticsCost,
    /// materials + labor + logistics
    ProjectTotal,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::UnitNormalization => EquationMetadata {
                name: "Normalización a Unidades SI",
                description: "Conversión de las entradas del usuario a MPa y mm antes de aplicar cualquier fórmula",
                formula_typst: r#"$P_"MPa" = P_"psi" / 145.038$, $D_"mm" = 25.4 dot D_"in"$, $P_"MPa" = 0.1 dot P_"bar"$"#,
                formula_plain: "P_MPa = P_psi / 145.038, D_mm = 25.4 * D_in, P_MPa = 0.1 * P_bar",
                reference: CodeReference::NistSp811,
                variables: vec![
                    Variable::new("P", "Presión o esfuerzo", "MPa, psi, bar"),
                    Variable::new("D", "Longitud (diámetro, espesor, tolerancia)", "mm, in"),
                ],
                assumptions: vec!["Factores multiplicativos exactos, sin redondeo intermedio"],
                category: EquationCategory::UnitConversions,
                source_module: "units.rs",
                source_function: "to_si",
            },

            Equation::RequiredThickness => EquationMetadata {
                name: "Espesor Mínimo Requerido",
                description: "Espesor de pared para presión interna más la tolerancia por corrosión y fabricación",
                formula_typst: r#"$t = (P D) / (2 (S E + P Y)) + C$"#,
                formula_plain: "t = P*D / (2(S*E + P*Y)) + C",
                reference: CodeReference::AsmeB31_3 { year: 2022, paragraph: "304.1.2, Eq. (3a)" },
                variables: vec![
                    Variable::new("t", "Espesor requerido", "mm"),
                    Variable::new("P", "Presión interna de diseño", "MPa"),
                    Variable::new("D", "Diámetro externo", "mm"),
                    Variable::new("S", "Esfuerzo admisible", "MPa"),
                    Variable::new("E", "Factor de eficiencia de la junta", "-"),
                    Variable::new("Y", "Coeficiente del material", "-"),
                    Variable::new("C", "Tolerancia de corrosión y fabricación", "mm"),
                ],
                assumptions: vec!["Tubería recta bajo presión interna", "Válida para t < D/6"],
                category: EquationCategory::WallThickness,
                source_module: "equations/pipe.rs",
                source_function: "required_thickness",
            },

            Equation::MaxAllowablePressure => EquationMetadata {
                name: "Presión Máxima Admisible",
                description: "Presión interna máxima que soporta un espesor de pared dado",
                formula_typst: r#"$P_"max" = (2 S E t) / (D - 2 Y t)$"#,
                formula_plain: "P_max = 2*S*E*t / (D - 2*Y*t)",
                reference: CodeReference::AsmeB31_3 { year: 2022, paragraph: "304.1.2, Eq. (3a)" },
                variables: vec![
                    Variable::new("P_\"max\"", "Presión máxima admisible", "MPa"),
                    Variable::new("t", "Espesor de pared", "mm"),
                    Variable::new("D", "Diámetro externo", "mm"),
                ],
                assumptions: vec!["Inversa de la ecuación de espesor con C = 0", "Requiere D - 2Yt > 0"],
                category: EquationCategory::PressureCapacity,
                source_module: "equations/pipe.rs",
                source_function: "max_allowable_pressure",
            },

            Equation::ScheduleAdequacy => EquationMetadata {
                name: "Comparación con Schedule",
                description: "El schedule es adecuado si su espesor nominal cubre el espesor requerido",
                formula_typst: r#"$t_"req" <= t_"sch"$"#,
                formula_plain: "t_req <= t_sch",
                reference: CodeReference::AsmeB36 { standard: "B36.10M", year: 2022 },
                variables: vec![
                    Variable::new("t_\"req\"", "Espesor requerido", "mm"),
                    Variable::new("t_\"sch\"", "Espesor nominal del schedule", "mm"),
                ],
                assumptions: vec!["Espesores nominales de B36.10M (SCH40/80/160) y B36.19M (5S/10S)"],
                category: EquationCategory::DesignChecks,
                source_module: "schedules.rs",
                source_function: "lookup_schedule_thickness",
            },

            Equation::SafetyFactor => EquationMetadata {
                name: "Factor de Seguridad",
                description: "Relación entre la presión máxima del schedule y la presión de diseño",
                formula_typst: r#"$"FS" = P_"max,sch" / P$"#,
                formula_plain: "FS = P_max_sch / P",
                reference: CodeReference::AsmeB31_3 { year: 2022, paragraph: "304.1.2" },
                variables: vec![
                    Variable::new("\"FS\"", "Factor de seguridad", "-"),
                    Variable::new("P_\"max,sch\"", "Presión máxima con espesor del schedule", "MPa"),
                    Variable::new("P", "Presión de diseño", "MPa"),
                ],
                assumptions: vec!["Solo se calcula cuando el schedule tiene espesor tabulado"],
                category: EquationCategory::DesignChecks,
                source_module: "equations/pipe.rs",
                source_function: "safety_factor",
            },

            Equation::MaterialLineCost => EquationMetadata {
                name: "Costo de Material por Metro",
                description: "Costo de cada material como precio unitario por longitud de escalera",
                formula_typst: r#"$C_i = p_i dot L$"#,
                formula_plain: "C_i = p_i * L",
                reference: CodeReference::UnitPriceEstimating,
                variables: vec![
                    Variable::new("p_i", "Precio unitario del material", "COP/m"),
                    Variable::new("L", "Longitud total de la escalera", "m"),
                ],
                assumptions: vec!["Todos los materiales se cotizan por metro lineal"],
                category: EquationCategory::CostEstimating,
                source_module: "equations/cost.rs",
                source_function: "linear_cost",
            },

            Equation::LaborCost => EquationMetadata {
                name: "Costo de Mano de Obra",
                description: "Horas hombre por el costo de la hora",
                formula_typst: r#"$C_"MO" = h dot r$"#,
                formula_plain: "C_MO = h * r",
                reference: CodeReference::UnitPriceEstimating,
                variables: vec![
                    Variable::new("h", "Horas hombre", "h"),
                    Variable::new("r", "Costo hora hombre", "COP/h"),
                ],
                assumptions: vec!["Tarifa horaria única"],
                category: EquationCategory::CostEstimating,
                source_module: "equations/cost.rs",
                source_function: "labor_cost",
            },

            Equation::LogisticsCost => EquationMetadata {
                name: "Costo de Logística",
                description: "Cargo por el tiempo de entrega, fijo por día más un porcentaje diario del subtotal",
                formula_typst: r#"$C_"log" = d (f + r_d dot (C_"mat" + C_"fab"))$"#,
                formula_plain: "C_log = d * (f + r_d * (C_mat + C_fab))",
                reference: CodeReference::UnitPriceEstimating,
                variables: vec![
                    Variable::new("d", "Tiempo de entrega", "días"),
                    Variable::new("f", "Cargo fijo diario", "COP/día"),
                    Variable::new("r_d", "Tasa diaria sobre el subtotal", "1/día"),
                ],
                assumptions: vec!["La logística no altera los subtotales de materiales ni de fabricación"],
                category: EquationCategory::CostEstimating,
                source_module: "equations/cost.rs",
                source_function: "logistics_cost",
            },

            Equation::ProjectTotal => EquationMetadata {
                name: "Costo Total del Proyecto",
                description: "Suma de materiales, fabricación y logística",
                formula_typst: r#"$C_"total" = C_"mat" + C_"fab" + C_"log"$"#,
                formula_plain: "C_total = C_mat + C_fab + C_log",
                reference: CodeReference::UnitPriceEstimating,
                variables: vec![
                    Variable::new("C_\"mat\"", "Subtotal de materiales", "COP"),
                    Variable::new("C_\"fab\"", "Subtotal de fabricación", "COP"),
                    Variable::new("C_\"log\"", "Logística", "COP"),
                ],
                assumptions: vec!["Montos en pesos colombianos sin impuestos"],
                category: EquationCategory::CostEstimating,
                source_module: "calculations/stair_cost.rs",
                source_function: "total_costs",
            },
        }
    }

    /// Get all equations in a given category
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .filter(|eq| eq.metadata().category == category)
            .copied()
            .collect()
    }

    /// Get all categories, in appendix order
    pub fn all_categories() -> Vec<EquationCategory> {
        use EquationCategory::*;
        let mut cats = vec![UnitConversions, WallThickness, PressureCapacity, DesignChecks, CostEstimating];
        cats.sort_by_key(|c| c.sort_order());
        cats
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    Equation::UnitNormalization,
    Equation::RequiredThickness,
    Equation::MaxAllowablePressure,
    Equation::ScheduleAdequacy,
    Equation::SafetyFactor,
    Equation::MaterialLineCost,
    Equation::LaborCost,
    Equation::LogisticsCost,
    Equation::ProjectTotal,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being used in a calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    pub equation: Equation,
    /// Where/why it was used (e.g., "Espesor SCH40")
    pub context: String,
    /// The calculation label this equation was applied to
    pub member_label: Option<String>,
}

impl EquationUsage {
    pub fn new(equation: Equation, context: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: None,
        }
    }

    pub fn for_member(equation: Equation, context: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            member_label: Some(label.into()),
        }
    }
}

/// Collector for equation usage during a calculation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an equation was used
    pub fn record(&mut self, equation: Equation, context: impl Into<String>) {
        self.usages.push(EquationUsage::new(equation, context));
    }

    /// Record equation usage for a specific calculation label
    pub fn record_for_member(&mut self, equation: Equation, context: impl Into<String>, label: impl Into<String>) {
        self.usages.push(EquationUsage::for_member(equation, context, label));
    }

    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Unique equations used, in first-use order
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    pub fn contains(&self, equation: Equation) -> bool {
        self.usages.iter().any(|u| u.equation == equation)
    }

    /// Group unique equations by category for the appendix
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }
}

// ============================================================================
// Typst Appendix Generation
// ============================================================================

impl EquationTracker {
    /// Generate Typst markup for the "Lista de Ecuaciones" appendix.
    ///
    /// ```rust
    /// use calc_core::equations::registry::{Equation, EquationTracker};
    ///
    /// let mut tracker = EquationTracker::new();
    /// tracker.record(Equation::MaxAllowablePressure, "P_max");
    /// assert!(tracker.generate_appendix_typst().contains("Presión Máxima Admisible"));
    /// ```
    pub fn generate_appendix_typst(&self) -> String {
        let mut output = String::new();

        output.push_str(r##"
#pagebreak()

#align(center)[
  #block(width: 100%, fill: rgb("#f0f0f0"), inset: 12pt, radius: 4pt)[
    #text(size: 16pt, weight: "bold")[Anexo: Lista de Ecuaciones]
  ]
]

#v(12pt)
"##);

        let by_category = self.by_category();
        if by_category.is_empty() {
            output.push_str("#text(style: \"italic\")[No se registraron ecuaciones.]\n");
            return output;
        }

        for (category, equations) in by_category {
            output.push_str(&format!("\n== {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();
                output.push_str(&format!("=== {}\n\n", meta.name));
                output.push_str(&format!("#text(size: 10pt)[{}]\n\n", meta.description));
                output.push_str(&format!("*Fórmula:* {}\n\n", meta.formula_typst));
                output.push_str(&format!("*Referencia:* {}\n\n", meta.reference.citation()));

                if !meta.variables.is_empty() {
                    output.push_str("#table(\n");
                    output.push_str("  columns: (auto, 1fr, auto),\n");
                    output.push_str("  inset: 6pt,\n");
                    output.push_str("  stroke: 0.5pt,\n");
                    output.push_str("  table.header([*Símbolo*], [*Descripción*], [*Unidades*]),\n");
                    for var in &meta.variables {
                        output.push_str(&format!(
                            "  [${}$], [{}], [{}],\n",
                            var.symbol, var.description, var.units
                        ));
                    }
                    output.push_str(")\n\n");
                }

                let mut contexts: Vec<&str> = self
                    .usages
                    .iter()
                    .filter(|u| u.equation == equation)
                    .map(|u| u.context.as_str())
                    .collect();
                contexts.dedup();
                if !contexts.is_empty() {
                    output.push_str(&format!("*Aplicada en:* {}\n\n", contexts.join(", ")));
                }

                output.push_str("#v(6pt)\n#line(length: 100%, stroke: 0.25pt + gray)\n#v(6pt)\n\n");
            }
        }

        output
    }
}

// ============================================================================
// Markdown Generation for EQUATIONS.md
// ============================================================================

/// Generate the EQUATIONS.md reference listing every registered equation.
///
/// ```rust
/// use calc_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Forja Equations Reference"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(8_000);

    output.push_str(r#"# Forja Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

Every formula used by the pipe thickness and staircase cost calculators.
All pipe formulas take SI inputs (MPa, mm); user units are normalised first.

---

"#);

    let categories = Equation::all_categories();
    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }
        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();
            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }
            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_equations_have_metadata() {
        assert_eq!(ALL_EQUATIONS.len(), 9);
        for eq in ALL_EQUATIONS {
            let meta = eq.metadata();
            assert!(!meta.name.is_empty(), "Equation {:?} has no name", eq);
            assert!(!meta.formula_typst.is_empty(), "Equation {:?} has no formula", eq);
            assert!(!meta.variables.is_empty(), "Equation {:?} has no variables", eq);
            assert!(!meta.source_function.is_empty(), "Equation {:?} has no source", eq);
        }

        let thickness = Equation::RequiredThickness.metadata();
        assert_eq!(thickness.formula_plain, "t = P*D / (2(S*E + P*Y)) + C");
    }

    #[test]
    fn test_code_reference_citation() {
        let b31 = CodeReference::AsmeB31_3 { year: 2022, paragraph: "304.1.2" };
        assert_eq!(b31.citation(), "ASME B31.3-2022 para. 304.1.2");
        let b36 = CodeReference::AsmeB36 { standard: "B36.19M", year: 2018 };
        assert_eq!(b36.citation(), "ASME B36.19M-2018");
    }

    #[test]
    fn test_equation_tracker() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::MaxAllowablePressure, "Espesor requerido");
        tracker.record(Equation::RequiredThickness, "Espesor requerido");
        tracker.record(Equation::MaxAllowablePressure, "SCH40");

        assert_eq!(tracker.usages().len(), 3);
        assert_eq!(
            tracker.unique_equations(),
            vec![Equation::MaxAllowablePressure, Equation::RequiredThickness]
        );
        assert!(tracker.contains(Equation::RequiredThickness));
        assert!(!tracker.contains(Equation::SafetyFactor));
    }

    #[test]
    fn test_by_category_sorted() {
        let mut tracker = EquationTracker::new();
        tracker.record(Equation::SafetyFactor, "test");
        tracker.record(Equation::UnitNormalization, "test");
        tracker.record(Equation::RequiredThickness, "test");

        let cats: Vec<_> = tracker.by_category().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            cats,
            vec![
                EquationCategory::UnitConversions,
                EquationCategory::WallThickness,
                EquationCategory::DesignChecks
            ]
        );
    }

    #[test]
    fn test_generate_appendix_typst() {
        let mut tracker = EquationTracker::new();
        tracker.record_for_member(Equation::RequiredThickness, "Espesor requerido", "L-101");
        tracker.record_for_member(Equation::MaxAllowablePressure, "SCH40", "L-101");

        let typst = tracker.generate_appendix_typst();
        assert!(typst.contains("Anexo: Lista de Ecuaciones"));
        assert!(typst.contains("Espesor Mínimo Requerido"));
        assert!(typst.contains("ASME B31.3-2022"));
        assert!(typst.contains("*Aplicada en:* SCH40"));
    }

    #[test]
    fn test_generate_appendix_empty_tracker() {
        let typst = EquationTracker::new().generate_appendix_typst();
        assert!(typst.contains("No se registraron ecuaciones"));
    }

    #[test]
    fn test_generate_equations_markdown() {
        let markdown = generate_equations_markdown();
        assert!(markdown.contains("# Forja Equations Reference"));
        assert!(markdown.contains("## Espesor de Pared"));
        assert!(markdown.contains("## Estimación de Costos"));
        assert!(markdown.contains("`P_max = 2*S*E*t / (D - 2*Y*t)`"));
        assert!(markdown.contains("equations/pipe.rs"));
        assert!(markdown.contains("**Total Equations:** 9"));
        assert!(markdown.contains("**Categories:** 5"));
    }
}
