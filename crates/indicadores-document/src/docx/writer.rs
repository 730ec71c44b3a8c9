// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word writer — render an `Outline` as a `.docx` package with `docx-rs`.
//
// Headings map to the built-in "Heading1"/"Heading2" paragraph styles so the
// document gets a navigable structure in Word. Every outline text line
// becomes exactly one paragraph.

use std::io::Cursor;

use chrono::NaiveDate;
use docx_rs::{AlignmentType, Docx, Paragraph, Run, RunFonts, Style, StyleType};
use indicadores_core::error::IndicadoresError;
use indicadores_core::types::Proposal;
use indicadores_core::FactSheetRecord;
use tracing::{debug, info, instrument};

use crate::outline::{BULLET, Block, Outline};

const HEADING_STYLE: &str = "Heading1";
const SUBHEADING_STYLE: &str = "Heading2";
const MONO_FONT: &str = "Courier New";

/// Creates `.docx` documents from fact sheets and proposal lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Render an outline to `.docx` bytes.
    #[instrument(skip(self, outline), fields(sections = outline.sections.len()))]
    pub fn create_from_outline(&self, outline: &Outline) -> Result<Vec<u8>, IndicadoresError> {
        info!(title = %outline.title, "Creating Word document");

        let mut docx = Docx::new()
            .add_style(
                Style::new(HEADING_STYLE, StyleType::Paragraph)
                    .name("Heading 1")
                    .size(26)
                    .bold()
                    .color("1F4E79"),
            )
            .add_style(
                Style::new(SUBHEADING_STYLE, StyleType::Paragraph)
                    .name("Heading 2")
                    .size(22)
                    .bold()
                    .color("1F4E79"),
            );

        docx = docx.add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                Run::new()
                    .add_text(&outline.title)
                    .bold()
                    .size(36)
                    .color("2E7D32"),
            ),
        );
        if let Some(subtitle) = &outline.subtitle {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .align(AlignmentType::Center)
                    .add_run(Run::new().add_text(subtitle).italic().size(24)),
            );
        }

        for section in &outline.sections {
            docx = docx.add_paragraph(
                Paragraph::new()
                    .style(HEADING_STYLE)
                    .add_run(Run::new().add_text(&section.heading)),
            );
            for block in &section.blocks {
                for paragraph in block_paragraphs(block) {
                    docx = docx.add_paragraph(paragraph);
                }
            }
        }

        docx = docx.add_paragraph(
            Paragraph::new().align(AlignmentType::Center).add_run(
                Run::new()
                    .add_text(&outline.footer)
                    .italic()
                    .size(16)
                    .color("808080"),
            ),
        );

        let mut buffer = Cursor::new(Vec::new());
        docx.build()
            .pack(&mut buffer)
            .map_err(|err| IndicadoresError::DocxError(err.to_string()))?;
        let bytes = buffer.into_inner();

        debug!(bytes = bytes.len(), "Word document packed");
        Ok(bytes)
    }

    pub fn create_fact_sheet(
        &self,
        record: &FactSheetRecord,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>, IndicadoresError> {
        self.create_from_outline(&Outline::from_fact_sheet(record, generated_on))
    }

    pub fn create_proposal_list(
        &self,
        proposals: &[Proposal],
        variable_id: Option<&str>,
        variable_name: Option<&str>,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>, IndicadoresError> {
        let outline = Outline::from_proposals(proposals, variable_id, variable_name, generated_on);
        self.create_from_outline(&outline)
    }
}

fn body_run(text: &str) -> Run {
    Run::new().add_text(text).size(20)
}

fn block_paragraphs(block: &Block) -> Vec<Paragraph> {
    match block {
        Block::Paragraph(text) => vec![Paragraph::new().add_run(body_run(text))],
        Block::Field { label, value } => vec![
            Paragraph::new()
                .add_run(Run::new().add_text(format!("{label}: ")).bold().size(20))
                .add_run(body_run(value)),
        ],
        Block::Bullet(text) => vec![
            Paragraph::new()
                .indent(Some(360), None, None, None)
                .add_run(body_run(&format!("{BULLET} {text}"))),
        ],
        Block::Subheading(text) => vec![
            Paragraph::new()
                .style(SUBHEADING_STYLE)
                .add_run(Run::new().add_text(text)),
        ],
        Block::Preformatted(text) => text
            .split('\n')
            .map(|line| {
                Paragraph::new().indent(Some(360), None, None, None).add_run(
                    Run::new()
                        .add_text(line)
                        .size(18)
                        .fonts(RunFonts::new().ascii(MONO_FONT).hi_ansi(MONO_FONT)),
                )
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{full_record, generated_on, minimal_record, proposals};
    use docx_rs::{DocumentChild, ParagraphChild, RunChild, read_docx};
    use pretty_assertions::assert_eq;

    /// Paragraph texts in document order, empty paragraphs included.
    fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
        let docx = read_docx(bytes).unwrap();
        docx.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(para) => Some(
                    para.children
                        .iter()
                        .filter_map(|pc| match pc {
                            ParagraphChild::Run(run) => Some(
                                run.children
                                    .iter()
                                    .filter_map(|rc| match rc {
                                        RunChild::Text(t) => Some(t.text.clone()),
                                        _ => None,
                                    })
                                    .collect::<String>(),
                            ),
                            _ => None,
                        })
                        .collect::<String>(),
                ),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn docx_is_a_zip_package() {
        let bytes = DocxWriter::new()
            .create_fact_sheet(&minimal_record(), generated_on())
            .unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn paragraphs_match_outline_lines() {
        let outline = Outline::from_fact_sheet(&full_record(), generated_on());
        let bytes = DocxWriter::new().create_from_outline(&outline).unwrap();
        assert_eq!(paragraph_texts(&bytes), outline.text_lines());
    }

    #[test]
    fn minimal_record_has_unit_and_formula_headings() {
        let bytes = DocxWriter::new()
            .create_fact_sheet(&minimal_record(), generated_on())
            .unwrap();
        let texts = paragraph_texts(&bytes);
        assert!(texts.iter().any(|t| t == "Unidad de medida"));
        assert!(texts.iter().any(|t| t == "Fórmula"));
        assert!(!texts.iter().any(|t| t == "Limitaciones"));
    }

    #[test]
    fn proposal_list_carries_every_proposal() {
        let list = proposals();
        let bytes = DocxWriter::new()
            .create_proposal_list(&list, Some("CPV-005"), Some("Agua entubada"), generated_on())
            .unwrap();
        let texts = paragraph_texts(&bytes);
        for proposal in &list {
            assert!(texts.iter().any(|t| t.contains(&proposal.name)));
        }
    }

    #[test]
    fn absent_sections_are_absent_from_the_docx() {
        let mut record = full_record();
        record.limitations.clear();
        record.alignment.development_plan = None;
        let bytes = DocxWriter::new()
            .create_fact_sheet(&record, generated_on())
            .unwrap();
        let texts = paragraph_texts(&bytes);

        assert!(texts.iter().any(|t| t == "Alineación"));
        assert!(texts.iter().any(|t| t == "Institución: INEGI"));
        assert!(!texts.iter().any(|t| t == "Limitaciones"));
        assert!(!texts.iter().any(|t| t.contains("Plan Nacional de Desarrollo")));
        assert!(!texts.iter().any(|t| t.starts_with("Estrategia:")));
    }
}
