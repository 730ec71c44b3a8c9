// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — one reactive signal for the Dioxus UI.

use indicadores_core::error::{IndicadoresError, Result};
use indicadores_core::human_errors::{Notification, humanize_error};
use indicadores_core::{AppConfig, Session, WebhookResponse};

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The conversation with the generation service.
    pub session: Session,
    /// Application settings, edited on the settings page.
    pub config: AppConfig,
    /// Banner currently shown to the user.
    pub notification: Option<Notification>,
}

impl AppState {
    /// Create initial state from the backend services.
    pub fn new(svc: &AppServices) -> Self {
        Self::from_config(svc.config())
    }

    pub fn from_config(config: AppConfig) -> Self {
        Self {
            session: Session::new(config.min_variable_id_len),
            config,
            notification: None,
        }
    }

    /// Fold the outcome of a webhook call into the session.
    ///
    /// Transport-level failures restore the phase the request started from
    /// and raise a notification; error answers from the service become the
    /// session's error phase and are rendered inline.
    pub fn finish_request(&mut self, outcome: Result<WebhookResponse>) {
        match outcome {
            Ok(response) => {
                if response.is_error() {
                    tracing::info!(tipo = response.kind(), "service answered with an error");
                }
                if let Err(e) = self.session.apply(response) {
                    tracing::warn!(error = %e, "response arrived outside a request");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, "webhook request failed");
                if let Err(stale) = self.session.fail() {
                    tracing::warn!(error = %stale, "failure arrived outside a request");
                }
                self.notify_error(&e);
            }
        }
    }

    pub fn notify_error(&mut self, err: &IndicadoresError) {
        self.notification = Some(humanize_error(err));
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notification = Some(notification);
    }

    pub fn dismiss_notification(&mut self) {
        self.notification = None;
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::from_config(AppConfig::default())
    }
}
