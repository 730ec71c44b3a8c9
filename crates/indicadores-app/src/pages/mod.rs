// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

pub mod fact_sheet;
pub mod home;
pub mod notification;
pub mod query_form;
pub mod results;
pub mod settings;

use dioxus::prelude::*;

use indicadores_core::WebhookRequest;
use indicadores_core::error::Result;
use indicadores_core::human_errors::Notification;
use indicadores_document::ExportArtifact;

use crate::services::app_services::AppServices;
use crate::state::AppState;

/// Send a request on the task pool and fold the answer into the state.
pub(crate) fn dispatch(mut state: Signal<AppState>, svc: AppServices, request: WebhookRequest) {
    spawn(async move {
        let outcome = svc.send(&request).await;
        state.write().finish_request(outcome);
    });
}

/// Ask the user where to save a rendered export and write it there.
///
/// Without a native dialog the file lands in the configured export directory.
pub(crate) fn save_artifact(
    mut state: Signal<AppState>,
    svc: &AppServices,
    rendered: Result<ExportArtifact>,
) {
    let artifact = match rendered {
        Ok(artifact) => artifact,
        Err(e) => {
            tracing::error!(error = %e, "export rendering failed");
            state.write().notify_error(&e);
            return;
        }
    };

    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    let target = {
        let Some(path) = rfd::FileDialog::new()
            .set_file_name(&artifact.file_name)
            .set_directory(svc.export_dir())
            .add_filter(artifact.format.label(), &[artifact.format.extension()])
            .save_file()
        else {
            tracing::debug!("save dialog cancelled");
            return;
        };
        Some(path)
    };
    #[cfg(any(target_os = "ios", target_os = "android"))]
    let target: Option<std::path::PathBuf> = None;

    match svc.save_export(&artifact, target.as_deref()) {
        Ok(path) => {
            tracing::info!(path = %path.display(), format = ?artifact.format, "export saved");
            state.write().notify(Notification::info(
                "Exportación completa",
                format!("Se guardó {}", path.display()),
            ));
        }
        Err(e) => {
            tracing::error!(error = %e, "export could not be written");
            state.write().notify_error(&e);
        }
    }
}
