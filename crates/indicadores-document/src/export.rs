// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export — pick a serializer, name the file, and write it atomically.
//
// Files are written to a temporary sibling and renamed into place, so a
// failed export never leaves a truncated document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use indicadores_core::error::IndicadoresError;
use indicadores_core::types::Proposal;
use indicadores_core::{ExportFormat, FactSheetRecord, PaperSize};
use tempfile::NamedTempFile;
use tracing::{info, instrument};

use crate::docx::DocxWriter;
use crate::naming;
use crate::outline::Outline;
use crate::pdf::{PdfReader, PdfWriter};

/// A rendered document ready to be saved.
#[derive(Debug, Clone)]
pub struct ExportArtifact {
    /// Suggested file name, extension included.
    pub file_name: String,
    pub format: ExportFormat,
    pub bytes: Vec<u8>,
    /// Pages counted by re-parsing the output; PDF only.
    pub page_count: Option<usize>,
}

/// Renders fact sheets and proposal lists in either output format.
#[derive(Debug, Clone, Copy)]
pub struct Exporter {
    paper_size: PaperSize,
}

impl Default for Exporter {
    fn default() -> Self {
        Self::new(PaperSize::A4)
    }
}

impl Exporter {
    pub fn new(paper_size: PaperSize) -> Self {
        Self { paper_size }
    }

    /// Render a fact sheet. `fallback` names the file when the indicator has
    /// no short code (usually the queried variable id).
    #[instrument(skip(self, record))]
    pub fn fact_sheet(
        &self,
        record: &FactSheetRecord,
        fallback: Option<&str>,
        format: ExportFormat,
        generated_on: NaiveDate,
    ) -> Result<ExportArtifact, IndicadoresError> {
        let outline = Outline::from_fact_sheet(record, generated_on);
        let stem = naming::fact_sheet_stem(record, fallback);
        self.render(&outline, &stem, format)
    }

    /// Render the proposals shown for a variable.
    #[instrument(skip(self, proposals), fields(count = proposals.len()))]
    pub fn proposal_list(
        &self,
        proposals: &[Proposal],
        variable_id: Option<&str>,
        variable_name: Option<&str>,
        format: ExportFormat,
        generated_on: NaiveDate,
    ) -> Result<ExportArtifact, IndicadoresError> {
        if proposals.is_empty() {
            return Err(IndicadoresError::NothingToExport(
                "no proposals have been generated".into(),
            ));
        }
        let outline = Outline::from_proposals(proposals, variable_id, variable_name, generated_on);
        let stem = naming::proposals_stem(variable_id);
        self.render(&outline, &stem, format)
    }

    fn render(
        &self,
        outline: &Outline,
        stem: &str,
        format: ExportFormat,
    ) -> Result<ExportArtifact, IndicadoresError> {
        let (bytes, page_count) = match format {
            ExportFormat::Pdf => {
                let bytes = PdfWriter::new(self.paper_size).create_from_outline(outline)?;
                let pages = PdfReader::from_bytes(&bytes)?.page_count();
                (bytes, Some(pages))
            }
            ExportFormat::Docx => (DocxWriter::new().create_from_outline(outline)?, None),
        };

        let file_name = naming::file_name(stem, format);
        info!(file_name, bytes = bytes.len(), ?page_count, "Export rendered");

        Ok(ExportArtifact {
            file_name,
            format,
            bytes,
            page_count,
        })
    }
}

/// Save an artifact under `dir` using its suggested name.
///
/// The directory is created if needed. Returns the final path.
pub fn write_export(dir: &Path, artifact: &ExportArtifact) -> Result<PathBuf, IndicadoresError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(&artifact.file_name);
    write_export_to(&path, &artifact.bytes)?;
    Ok(path)
}

/// Atomically write `bytes` to `path`, replacing any existing file.
#[instrument(skip_all, fields(path = %path.display(), bytes_len = bytes.len()))]
pub fn write_export_to(path: &Path, bytes: &[u8]) -> Result<(), IndicadoresError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent)?;
    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| IndicadoresError::Io(err.error))?;

    info!("Export written to {}", path.display());
    Ok(())
}
