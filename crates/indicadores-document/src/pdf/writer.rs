// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF writer — render fact sheets and proposal lists using `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`. Positions come from `PdfLayout`; this module only
// maps each placed line to text ops. The saved bytes then go through
// `encoding::reencode_builtin_text` so accented text shows up correctly.

use chrono::NaiveDate;
use indicadores_core::error::IndicadoresError;
use indicadores_core::types::Proposal;
use indicadores_core::{FactSheetRecord, PaperSize};
use printpdf::color::Color;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, Rgb,
    TextItem,
};
use tracing::{debug, info, instrument, warn};

use super::encoding::reencode_builtin_text;
use super::layout::{LineStyle, PdfLayout, PlacedLine};
use crate::outline::Outline;

const TITLE_RGB: (u8, u8, u8) = (0x2E, 0x7D, 0x32);
const HEADING_RGB: (u8, u8, u8) = (0x1F, 0x4E, 0x79);
const BODY_RGB: (u8, u8, u8) = (0x33, 0x33, 0x33);
const FOOTER_RGB: (u8, u8, u8) = (0x80, 0x80, 0x80);

/// Creates PDF documents from fact sheets and proposal lists.
pub struct PdfWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
}

impl PdfWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }

    /// Create a new writer defaulting to A4.
    pub fn a4() -> Self {
        Self::new(PaperSize::A4)
    }

    /// Position every line of the outline without rendering it.
    pub fn layout(&self, outline: &Outline) -> PdfLayout {
        PdfLayout::compute(outline, self.paper_size)
    }

    // -- Rendering ------------------------------------------------------------

    /// Render an outline to PDF bytes.
    #[instrument(skip(self, outline), fields(sections = outline.sections.len()))]
    pub fn create_from_outline(&self, outline: &Outline) -> Result<Vec<u8>, IndicadoresError> {
        let layout = self.layout(outline);
        let title = outline.title.as_str();

        info!(paper = ?self.paper_size, title, pages = layout.page_count(), "Creating PDF");

        let page_w = Mm(layout.page_width_mm);
        let page_h = Mm(layout.page_height_mm);
        let page_h_pt = page_h.into_pt().0;

        let pages: Vec<PdfPage> = layout
            .pages
            .iter()
            .map(|page| {
                let mut ops = Vec::new();
                for line in &page.lines {
                    push_line_ops(&mut ops, line, page_h_pt);
                }
                PdfPage::new(page_w, page_h, ops)
            })
            .collect();

        let mut doc = PdfDocument::new(title);
        doc.with_pages(pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings");
        }
        if output.is_empty() {
            return Err(IndicadoresError::PdfError("printpdf produced no output".into()));
        }
        let output = reencode_builtin_text(&output)?;

        debug!(bytes = output.len(), "PDF serialised");
        Ok(output)
    }

    /// Render a fact sheet.
    pub fn create_fact_sheet(
        &self,
        record: &FactSheetRecord,
        generated_on: NaiveDate,
    ) -> Result<Vec<u8>, IndicadoresError> {
        self.create_from_outline(&Outline::from_fact_sheet(record, generated_on))
    }

    /// Render the accumulated proposals for a variable.
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

/// Append the text ops for one placed line.
///
/// A field label is written in the bold face and the value follows in the
/// regular face inside the same text section, so the cursor advances between
/// the two runs.
fn push_line_ops(ops: &mut Vec<Op>, line: &PlacedLine, page_h_pt: f32) {
    if line.text.is_empty() && line.label.is_none() {
        return;
    }

    let size = Pt(line.style.font_size_pt());
    let font = font_for(line.style);

    ops.push(Op::StartTextSection);
    ops.push(Op::SetFillColor {
        col: color_for(line.style),
    });
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Mm(line.x_mm).into_pt(),
            y: Pt(page_h_pt - Mm(line.y_mm).into_pt().0),
        },
    });

    if let Some(label) = &line.label {
        ops.push(Op::SetFontSizeBuiltinFont {
            size,
            font: BuiltinFont::HelveticaBold,
        });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(label.clone())],
            font: BuiltinFont::HelveticaBold,
        });
    }

    if !line.text.is_empty() {
        let text = if line.label.is_some() {
            format!(" {}", line.text)
        } else {
            line.text.clone()
        };
        ops.push(Op::SetFontSizeBuiltinFont { size, font });
        ops.push(Op::WriteTextBuiltinFont {
            items: vec![TextItem::Text(text)],
            font,
        });
    }

    ops.push(Op::EndTextSection);
}

fn font_for(style: LineStyle) -> BuiltinFont {
    match style {
        LineStyle::Mono => BuiltinFont::Courier,
        s if s.is_bold() => BuiltinFont::HelveticaBold,
        LineStyle::Subtitle | LineStyle::Footer => BuiltinFont::HelveticaOblique,
        _ => BuiltinFont::Helvetica,
    }
}

fn color_for(style: LineStyle) -> Color {
    let (r, g, b) = match style {
        LineStyle::Title => TITLE_RGB,
        LineStyle::Heading | LineStyle::Subheading => HEADING_RGB,
        LineStyle::Footer => FOOTER_RGB,
        _ => BODY_RGB,
    };
    Color::Rgb(Rgb::new(
        r as f32 / 255.0,
        g as f32 / 255.0,
        b as f32 / 255.0,
        None,
    ))
}
