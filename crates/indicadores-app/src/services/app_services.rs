// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — owns the webhook client, the exporter settings and
// the persisted configuration, and exposes them to the Dioxus UI.
//
// The client is rebuilt whenever the configuration changes, so it lives
// behind a mutex; callers clone it out before awaiting.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

use chrono::{Local, NaiveDate};
use indicadores_client::WebhookClient;
use indicadores_core::error::Result;
use indicadores_core::{AppConfig, WebhookRequest, WebhookResponse};
use indicadores_document::export::{self, ExportArtifact, Exporter};
use tracing::{info, warn};

use super::data_dir;

const CONFIG_FILE: &str = "config.json";
const EXPORT_SUBDIR: &str = "exportaciones";

/// Shared application services accessible from all Dioxus components via
/// `use_context::<AppServices>()`.
#[derive(Clone)]
pub struct AppServices {
    client: Arc<Mutex<WebhookClient>>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Initialise all services. Call once at app startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");
        std::fs::create_dir_all(&dir)?;
        let config = load_config(&dir).unwrap_or_default();
        Self::with_config(dir, config)
    }

    /// Default settings in a temporary directory, used when the data
    /// directory cannot be set up.
    pub fn fallback() -> Result<Self> {
        Self::with_config(std::env::temp_dir().join("indicadores"), AppConfig::default())
    }

    fn with_config(data_dir: PathBuf, config: AppConfig) -> Result<Self> {
        let client = WebhookClient::new(&config)?;
        info!(webhook = client.url(), "app services initialised");
        Ok(Self {
            client: Arc::new(Mutex::new(client)),
            data_dir,
            config: Arc::new(Mutex::new(config)),
        })
    }

    // -- Webhook --------------------------------------------------------------

    /// Send one request to the generation service.
    pub async fn send(&self, request: &WebhookRequest) -> Result<WebhookResponse> {
        let client = self
            .client
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        client.send(request).await
    }

    // -- Config ---------------------------------------------------------------

    pub fn config(&self) -> AppConfig {
        self.config
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Update and persist the config, rebuilding the client for the new URL
    /// and timeout.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        let client = WebhookClient::new(config)?;
        persist_config(&self.data_dir, config)?;
        info!(webhook = client.url(), "configuration saved");
        *self.client.lock().unwrap_or_else(PoisonError::into_inner) = client;
        *self.config.lock().unwrap_or_else(PoisonError::into_inner) = config.clone();
        Ok(())
    }

    // -- Export ---------------------------------------------------------------

    pub fn exporter(&self) -> Exporter {
        Exporter::new(self.config().paper_size)
    }

    /// Date printed in export footers.
    pub fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }

    /// Where exports go when no save dialog is available.
    pub fn export_dir(&self) -> PathBuf {
        match self.config().export_dir {
            Some(dir) => dir,
            None => self.data_dir.join(EXPORT_SUBDIR),
        }
    }

    /// Write an artifact to `path`, or into the export directory when the
    /// user was not asked for a location.
    pub fn save_export(&self, artifact: &ExportArtifact, path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => {
                export::write_export_to(path, &artifact.bytes)?;
                Ok(path.to_path_buf())
            }
            None => export::write_export(&self.export_dir(), artifact),
        }
    }
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "ignoring unreadable config file");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    std::fs::create_dir_all(data_dir)?;
    let json = serde_json::to_string_pretty(config)?;
    export::write_export_to(&data_dir.join(CONFIG_FILE), json.as_bytes())
}
