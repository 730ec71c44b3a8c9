// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Async client for the indicator-generation webhook.
//
// Every interaction is a single JSON POST to one URL; the `accion` field in
// the body selects the operation and the `tipo` field of the answer selects
// the response variant. Requests are never retried: a failure is reported to
// the user, who decides whether to try again.

use std::time::Duration;

use indicadores_core::error::{IndicadoresError, Result};
use indicadores_core::{AppConfig, WebhookRequest, WebhookResponse};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};

/// Client bound to one webhook URL.
#[derive(Debug, Clone)]
pub struct WebhookClient {
    client: Client,
    url: String,
}

impl WebhookClient {
    /// Build a client from the application settings.
    pub fn new(config: &AppConfig) -> Result<Self> {
        Self::with_url(
            config.webhook_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn with_url(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IndicadoresError::Connection(format!("cannot build HTTP client: {e}")))?;
        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// POST one request and decode the tagged answer.
    ///
    /// Transport failures and timeouts map to `Connection`, non-2xx statuses
    /// to `HttpStatus`, and bodies that are not a known `tipo` to
    /// `UnexpectedResponse`. Error answers from the service (`tipo: error*`)
    /// are returned as `Ok` values; the session decides what they mean.
    #[instrument(skip(self, request), fields(accion = request.action.as_str(), id_var = %request.variable_id))]
    pub async fn send(&self, request: &WebhookRequest) -> Result<WebhookResponse> {
        debug!(url = %self.url, "sending webhook request");

        let response = self
            .client
            .post(&self.url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    IndicadoresError::Connection(format!("request timed out: {e}"))
                } else {
                    IndicadoresError::Connection(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "webhook answered with an error status");
            return Err(IndicadoresError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| IndicadoresError::Connection(format!("failed to read body: {e}")))?;

        let decoded = WebhookResponse::from_json(&body)?;
        info!(tipo = decoded.kind(), "webhook response received");
        Ok(decoded)
    }
}
