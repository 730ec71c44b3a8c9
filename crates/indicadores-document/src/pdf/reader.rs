// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF reader — parse generated PDFs back with `lopdf` so an export is known to
// be well-formed before it reaches disk.

use indicadores_core::error::IndicadoresError;
use lopdf::Document;
use tracing::{debug, instrument};

/// Parsed view of a rendered PDF.
pub struct PdfReader {
    document: Document,
}

impl PdfReader {
    /// Parse raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self, IndicadoresError> {
        let document = Document::load_mem(data).map_err(|err| {
            IndicadoresError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self { document })
    }

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_is_rejected() {
        let err = PdfReader::from_bytes(b"not a pdf").err().unwrap();
        assert!(matches!(err, IndicadoresError::PdfError(_)));
    }

    #[test]
    fn truncated_pdf_is_rejected() {
        let err = PdfReader::from_bytes(b"%PDF-1.7\n1 0 obj\n<<").err().unwrap();
        assert!(err.to_string().contains("failed to load PDF"));
    }
}
