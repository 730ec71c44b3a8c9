// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outline — the serializer-neutral form of a fact sheet.
//
// The outline decides *what* is printed and in which order; the PDF and Word
// writers only decide *how*. Empty optional fields never reach the outline,
// and a section with nothing in it is dropped, except unit and formula which
// are always present.

use chrono::NaiveDate;
use indicadores_core::fact_sheet::non_blank;
use indicadores_core::types::Proposal;
use indicadores_core::FactSheetRecord;
use serde_json::Value;

/// Marker prefixed to list entries in both output formats.
pub const BULLET: &str = "•";

/// Title used when the indicator has no name.
pub const DEFAULT_TITLE: &str = "Ficha metodológica";

/// One unit of content inside a section.
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Free-flowing text.
    Paragraph(String),
    /// `label: value` line; the label is emphasised.
    Field { label: String, value: String },
    /// List entry, rendered with a leading bullet.
    Bullet(String),
    /// Small heading inside a section.
    Subheading(String),
    /// Text whose line breaks and spacing matter (formulas, data tables).
    Preformatted(String),
}

impl Block {
    /// Text lines exactly as they appear in either document.
    pub fn text_lines(&self) -> Vec<String> {
        match self {
            Self::Paragraph(text) | Self::Subheading(text) => vec![text.clone()],
            Self::Field { label, value } => vec![format!("{label}: {value}")],
            Self::Bullet(text) => vec![format!("{BULLET} {text}")],
            Self::Preformatted(text) => text.split('\n').map(str::to_string).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub blocks: Vec<Block>,
}

/// Ordered content of an exportable document.
#[derive(Debug, Clone, PartialEq)]
pub struct Outline {
    pub title: String,
    pub subtitle: Option<String>,
    pub sections: Vec<Section>,
    /// Generation-date line printed at the very end.
    pub footer: String,
}

impl Outline {
    /// Read a fact sheet into its canonical section order.
    pub fn from_fact_sheet(record: &FactSheetRecord, generated_on: NaiveDate) -> Self {
        let mut builder = OutlineBuilder::default();

        builder.section("Objetivo").paragraph(&record.objective);
        builder.section("Importancia").paragraph(&record.importance);
        builder
            .section("Numerador y denominador")
            .field("Numerador", record.numerator.as_deref())
            .field("Denominador", record.denominator.as_deref());

        let definitions = builder.section("Definición de variables");
        for (symbol, definition) in &record.variable_definitions {
            definitions.bullet(&format!("{symbol}: {definition}"));
        }

        builder
            .required_section("Unidad de medida")
            .raw(Block::Paragraph(record.unit.clone()));

        let formula = builder.required_section("Fórmula");
        formula.raw(Block::Preformatted(record.formula.clone()));
        if !record.formula_detail.is_empty() {
            formula.raw(Block::Subheading("Donde:".into()));
            for (symbol, description) in &record.formula_detail {
                formula.bullet(&format!("{symbol} = {description}"));
            }
        }

        if let Some(table) = record.data_table.as_ref().and_then(opaque_text) {
            builder.section("Tabla de datos").preformatted(&table);
        }
        if let Some(chart) = record.chart.as_ref().and_then(opaque_text) {
            builder.section("Gráfica").preformatted(&chart);
        }

        builder
            .section("Cobertura geográfica")
            .paragraph_opt(record.coverage.as_deref());
        builder
            .section("Desagregación")
            .paragraph_opt(record.disaggregation.as_deref());
        builder
            .section("Información temporal")
            .field("Periodo", record.temporal_coverage.as_deref())
            .field("Frecuencia", record.frequency.as_deref())
            .field("Periodicidad", record.periodicity.as_deref())
            .field(
                "Cobertura temporal de la fuente",
                record.source_temporal_coverage.as_deref(),
            );

        let source = &record.source;
        builder
            .section("Fuente")
            .field("Nombre", Some(source.name.as_str()))
            .field("Institución", Some(source.institution.as_str()))
            .field("Programa", source.program.as_deref())
            .field("URL", source.url.as_deref());

        let limitations = builder.section("Limitaciones");
        for limitation in &record.limitations {
            limitations.bullet(limitation);
        }

        let alignment = &record.alignment;
        let sdg = &alignment.sdg;
        let sdg_number = non_blank(Some(sdg.number.as_str()));
        let sdg_line = match (sdg_number, non_blank(Some(sdg.name.as_str()))) {
            (Some(number), Some(name)) => Some(format!("{number} - {name}")),
            (Some(number), None) => Some(number.to_string()),
            (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        };
        let framework = &alignment.environmental_framework;
        let section = builder.section("Alineación");
        section
            .group("Objetivos de Desarrollo Sostenible (ODS)")
            .field("ODS", sdg_line.as_deref())
            .field("Meta", sdg.target.as_deref());
        section
            .group("Marco para el Desarrollo de las Estadísticas Ambientales (MDEA)")
            .field("Componente", Some(framework.component.as_str()))
            .field("Subcomponente", framework.subcomponent.as_deref())
            .field("Tema", framework.topic.as_deref());
        if let Some(plan) = &alignment.development_plan {
            section
                .group("Plan Nacional de Desarrollo (PND)")
                .field("Eje", Some(plan.axis.as_str()))
                .field("Objetivo", Some(plan.objective.as_str()))
                .field("Estrategia", Some(plan.strategy.as_str()));
        }
        section.close_group();

        builder
            .section("Descarga")
            .field("Documento disponible", record.download.link());

        let title = non_blank(Some(record.indicator.name.as_str()))
            .unwrap_or(DEFAULT_TITLE)
            .to_string();
        let subtitle = match record.indicator.short_code() {
            Some(code) => format!("{DEFAULT_TITLE} · {code}"),
            None => DEFAULT_TITLE.to_string(),
        };

        builder.finish(title, Some(subtitle), generated_on)
    }

    /// Outline of the accumulated proposals for one variable.
    pub fn from_proposals(
        proposals: &[Proposal],
        variable_id: Option<&str>,
        variable_name: Option<&str>,
        generated_on: NaiveDate,
    ) -> Self {
        let mut builder = OutlineBuilder::default();

        for proposal in proposals {
            let heading = format!("{}. {}", proposal.id, proposal.name.trim());
            builder
                .section(&heading)
                .paragraph(&proposal.description)
                .field("Enfoque", Some(proposal.approach.as_str()))
                .field("Tipo", Some(proposal.kind.as_str()))
                .field("Objetivo", proposal.objective.as_deref())
                .field("Importancia", proposal.importance.as_deref());
        }

        let subtitle = match (non_blank(variable_id), non_blank(variable_name)) {
            (Some(id), Some(name)) => Some(format!("Variable {id} · {name}")),
            (Some(id), None) => Some(format!("Variable {id}")),
            (None, Some(name)) => Some(name.to_string()),
            (None, None) => None,
        };

        builder.finish("Propuestas de indicadores".into(), subtitle, generated_on)
    }

    /// Every line of text in document order, headings included.
    ///
    /// Both writers emit exactly these lines (before word-wrapping), which is
    /// what the equivalence tests compare against.
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = vec![self.title.clone()];
        lines.extend(self.subtitle.iter().cloned());
        for section in &self.sections {
            lines.push(section.heading.clone());
            for block in &section.blocks {
                lines.extend(block.text_lines());
            }
        }
        lines.push(self.footer.clone());
        lines
    }

    #[cfg(test)]
    pub fn has_section(&self, heading: &str) -> bool {
        self.sections.iter().any(|s| s.heading == heading)
    }
}

/// Footer line carrying the generation date.
pub fn footer_for(date: NaiveDate) -> String {
    format!("Generado el {}", date.format("%d/%m/%Y"))
}

/// Text for an opaque value: strings verbatim, anything else pretty-printed.
fn opaque_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    };
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

// -- Builder ------------------------------------------------------------------

#[derive(Default)]
struct OutlineBuilder {
    sections: Vec<SectionBuilder>,
}

struct SectionBuilder {
    heading: String,
    blocks: Vec<Block>,
    required: bool,
    /// Subheading waiting for its first field; dropped if none arrives.
    pending_group: Option<String>,
}

impl OutlineBuilder {
    fn section(&mut self, heading: &str) -> &mut SectionBuilder {
        self.push(heading, false)
    }

    fn required_section(&mut self, heading: &str) -> &mut SectionBuilder {
        self.push(heading, true)
    }

    fn push(&mut self, heading: &str, required: bool) -> &mut SectionBuilder {
        self.sections.push(SectionBuilder {
            heading: heading.to_string(),
            blocks: Vec::new(),
            required,
            pending_group: None,
        });
        let last = self.sections.len() - 1;
        &mut self.sections[last]
    }

    fn finish(self, title: String, subtitle: Option<String>, generated_on: NaiveDate) -> Outline {
        let sections = self
            .sections
            .into_iter()
            .filter(|s| s.required || !s.blocks.is_empty())
            .map(|s| Section {
                heading: s.heading,
                blocks: s.blocks,
            })
            .collect();
        Outline {
            title,
            subtitle,
            sections,
            footer: footer_for(generated_on),
        }
    }
}

impl SectionBuilder {
    fn raw(&mut self, block: Block) -> &mut Self {
        if let Some(group) = self.pending_group.take() {
            self.blocks.push(Block::Subheading(group));
        }
        self.blocks.push(block);
        self
    }

    fn paragraph(&mut self, text: &str) -> &mut Self {
        self.paragraph_opt(Some(text))
    }

    fn paragraph_opt(&mut self, text: Option<&str>) -> &mut Self {
        match non_blank(text) {
            Some(t) => self.raw(Block::Paragraph(t.to_string())),
            None => self,
        }
    }

    fn preformatted(&mut self, text: &str) -> &mut Self {
        self.raw(Block::Preformatted(text.to_string()))
    }

    fn field(&mut self, label: &str, value: Option<&str>) -> &mut Self {
        match non_blank(value) {
            Some(v) => self.raw(Block::Field {
                label: label.to_string(),
                value: v.to_string(),
            }),
            None => self,
        }
    }

    fn bullet(&mut self, text: &str) -> &mut Self {
        match non_blank(Some(text)) {
            Some(t) => self.raw(Block::Bullet(t.to_string())),
            None => self,
        }
    }

    /// Start a subheading that only appears if a field follows it.
    fn group(&mut self, heading: &str) -> &mut Self {
        self.pending_group = Some(heading.to_string());
        self
    }

    fn close_group(&mut self) -> &mut Self {
        self.pending_group = None;
        self
    }
}
