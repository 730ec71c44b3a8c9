// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Export file names.

use indicadores_core::fact_sheet::non_blank;
use indicadores_core::{ExportFormat, FactSheetRecord};

/// Stem used when neither the indicator nor the caller provides one.
pub const DEFAULT_FILE_STEM: &str = "ficha-metodologica";

/// Stem used for proposal lists without a variable id.
pub const PROPOSALS_FILE_STEM: &str = "propuestas";

/// Stem for a fact sheet: the indicator's short code, else `fallback`, else
/// [`DEFAULT_FILE_STEM`].
pub fn fact_sheet_stem(record: &FactSheetRecord, fallback: Option<&str>) -> String {
    let candidate = record
        .indicator
        .short_code()
        .map(sanitize)
        .filter(|s| !s.is_empty())
        .or_else(|| non_blank(fallback).map(sanitize).filter(|s| !s.is_empty()));
    candidate.unwrap_or_else(|| DEFAULT_FILE_STEM.to_string())
}

/// Stem for a proposal list, e.g. `propuestas-CPV-005`.
pub fn proposals_stem(variable_id: Option<&str>) -> String {
    match non_blank(variable_id).map(sanitize).filter(|s| !s.is_empty()) {
        Some(id) => format!("{PROPOSALS_FILE_STEM}-{id}"),
        None => PROPOSALS_FILE_STEM.to_string(),
    }
}

pub fn file_name(stem: &str, format: ExportFormat) -> String {
    format!("{stem}.{}", format.extension())
}

/// Replace characters that are invalid in file names on common platforms.
///
/// Path separators, reserved punctuation and control characters become `-`;
/// surrounding whitespace and dots are stripped.
pub fn sanitize(raw: &str) -> String {
    let replaced: String = raw
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '-',
            c if c.is_control() => '-',
            c => c,
        })
        .collect();
    replaced.trim_matches(|c: char| c == '.' || c.is_whitespace()).to_string()
}
