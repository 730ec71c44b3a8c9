// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Endpoint of the indicator-generation webhook used when no config file exists.
pub const DEFAULT_WEBHOOK_URL: &str = "https://n8n.fmoreno.com.mx/webhook/generar-propuestas";

/// Persistent application settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// URL the query/select requests are POSTed to.
    pub webhook_url: String,
    /// Whole-request timeout for the webhook, in seconds.
    pub request_timeout_secs: u64,
    /// Minimum length of a variable id before a query is sent.
    pub min_variable_id_len: usize,
    /// Page size used by the PDF exporter.
    pub paper_size: crate::PaperSize,
    /// Directory exports are written to when no save dialog is available.
    pub export_dir: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            webhook_url: DEFAULT_WEBHOOK_URL.into(),
            request_timeout_secs: 30,
            min_variable_id_len: 3,
            paper_size: crate::PaperSize::A4,
            export_dir: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_fills_in_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "request_timeout_secs": 5 }"#).unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.min_variable_id_len, 3);
    }
}
