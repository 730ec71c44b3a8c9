// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Indicadores.

use thiserror::Error;

/// Top-level error type for all Indicadores operations.
#[derive(Debug, Error)]
pub enum IndicadoresError {
    // -- Query validation --
    #[error("variable id '{id}' is too short (minimum {min} characters)")]
    InvalidVariableId { id: String, min: usize },

    #[error("proposal {0} is not among the current proposals")]
    UnknownProposal(u32),

    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        action: &'static str,
        phase: &'static str,
    },

    // -- Webhook --
    #[error("connection to the generation service failed: {0}")]
    Connection(String),

    #[error("generation service answered HTTP {status}")]
    HttpStatus { status: u16 },

    #[error("unexpected response from the generation service: {0}")]
    UnexpectedResponse(String),

    // -- Document export --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    #[error("Word document operation failed: {0}")]
    DocxError(String),

    #[error("nothing to export: {0}")]
    NothingToExport(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, IndicadoresError>;
