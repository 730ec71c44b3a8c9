// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// indicadores-document — Fact-sheet export for the Indicadores client.
//
// A `FactSheetRecord` is first read into a serializer-neutral `Outline`
// (ordered sections of headings, paragraphs, fields and bullets). The PDF
// writer lays that outline out on fixed-size pages with `printpdf`; the Word
// writer turns it into a `docx-rs` document. Both walk the same outline, so
// they always carry the same text in the same order.

pub mod docx;
pub mod export;
pub mod naming;
pub mod outline;
pub mod pdf;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export the primary structs so callers can use `indicadores_document::PdfWriter` etc.
pub use docx::writer::DocxWriter;
pub use export::{ExportArtifact, Exporter};
pub use outline::Outline;
pub use pdf::reader::PdfReader;
pub use pdf::writer::PdfWriter;
