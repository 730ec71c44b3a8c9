// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Indicadores — Core types, wire model, and session state shared across all crates.

pub mod config;
pub mod error;
pub mod fact_sheet;
pub mod human_errors;
pub mod response;
pub mod session;
pub mod types;

pub use config::AppConfig;
pub use error::IndicadoresError;
pub use fact_sheet::FactSheetRecord;
pub use response::WebhookResponse;
pub use session::{Phase, Session};
pub use types::*;
