// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — persistent app configuration.

use std::path::PathBuf;

use dioxus::prelude::*;

use indicadores_core::human_errors::Notification;
use indicadores_core::types::PaperSize;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const ROW: &str = "display: flex; justify-content: space-between; align-items: center; gap: 16px; padding: 12px 0; border-bottom: 1px solid #f0f0f0;";
const VERSION: &str = env!("CARGO_PKG_VERSION");
const FIELD: &str = "padding: 6px 8px; border: 1px solid #ccc; border-radius: 4px;";

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let export_dir = state
        .read()
        .config
        .export_dir
        .as_ref()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();
    let default_dir = svc.export_dir().display().to_string();

    rsx! {
        div { style: "background: white; border-radius: 12px; padding: 20px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);",
            h2 { style: "margin: 0;", "Ajustes" }

            section { style: "margin: 16px 0;",
                h3 { "Servicio de generación" }
                div { style: ROW,
                    span { "URL del webhook" }
                    input {
                        r#type: "url",
                        style: "{FIELD} flex: 1; max-width: 560px;",
                        value: "{state.read().config.webhook_url}",
                        onchange: move |evt| {
                            let url = evt.value().trim().to_string();
                            if !url.is_empty() {
                                state.write().config.webhook_url = url;
                            }
                        },
                    }
                }
                div { style: ROW,
                    span { "Tiempo de espera (segundos)" }
                    input {
                        r#type: "number",
                        style: "{FIELD} width: 80px; text-align: right;",
                        value: "{state.read().config.request_timeout_secs}",
                        onchange: move |evt| {
                            if let Ok(secs) = evt.value().parse::<u64>()
                                && secs > 0
                            {
                                state.write().config.request_timeout_secs = secs;
                            }
                        },
                    }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "Exportación" }
                div { style: ROW,
                    span { "Tamaño de página (PDF)" }
                    select {
                        style: FIELD,
                        value: paper_size_value(&state.read().config.paper_size),
                        onchange: move |evt| {
                            if let Some(size) = paper_size_from_value(&evt.value()) {
                                state.write().config.paper_size = size;
                            }
                        },
                        for size in [PaperSize::A4, PaperSize::Letter, PaperSize::Legal] {
                            option { value: paper_size_value(&size), {paper_size_label(&size)} }
                        }
                    }
                }
                div { style: ROW,
                    span { "Carpeta de exportación" }
                    div { style: "display: flex; gap: 8px; flex: 1; max-width: 560px;",
                        input {
                            r#type: "text",
                            style: "{FIELD} flex: 1;",
                            placeholder: "{default_dir}",
                            value: "{export_dir}",
                            onchange: move |evt| {
                                state.write().config.export_dir = parse_export_dir(&evt.value());
                            },
                        }
                        FolderPicker {}
                    }
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #2e7d32; color: white; font-size: 16px; margin-top: 8px; cursor: pointer;",
                onclick: move |_| {
                    let config = state.read().config.clone();
                    match svc.save_config(&config) {
                        Ok(()) => {
                            tracing::info!("settings saved");
                            state.write().notify(Notification::info(
                                "Ajustes guardados",
                                "Los cambios se aplicarán en la siguiente consulta.",
                            ));
                        }
                        Err(e) => {
                            tracing::error!(error = %e, "failed to save settings");
                            state.write().notify_error(&e);
                        }
                    }
                },
                "Guardar ajustes"
            }

            section { style: "margin: 24px 0 0;",
                h3 { "Acerca de" }
                p { style: "color: #666; font-size: 14px;",
                    "Indicadores v{VERSION}"
                    br {}
                    "Generador de indicadores ambientales"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

/// Native folder chooser.
#[cfg(not(any(target_os = "ios", target_os = "android")))]
#[component]
fn FolderPicker() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    rsx! {
        button {
            style: "{FIELD} background: white; cursor: pointer;",
            onclick: move |_| {
                if let Some(dir) = rfd::FileDialog::new().pick_folder() {
                    state.write().config.export_dir = Some(dir);
                }
            },
            "Elegir…"
        }
    }
}

/// No native dialog on mobile; the text field is the only way in.
#[cfg(any(target_os = "ios", target_os = "android"))]
#[component]
fn FolderPicker() -> Element {
    rsx! {}
}

fn paper_size_value(size: &PaperSize) -> &'static str {
    match size {
        PaperSize::A4 => "A4",
        PaperSize::Letter => "Letter",
        PaperSize::Legal => "Legal",
    }
}

fn paper_size_label(size: &PaperSize) -> &'static str {
    match size {
        PaperSize::A4 => "A4 (210 × 297 mm)",
        PaperSize::Letter => "Carta (216 × 279 mm)",
        PaperSize::Legal => "Oficio (216 × 356 mm)",
    }
}

fn paper_size_from_value(value: &str) -> Option<PaperSize> {
    match value {
        "A4" => Some(PaperSize::A4),
        "Letter" => Some(PaperSize::Letter),
        "Legal" => Some(PaperSize::Legal),
        _ => None,
    }
}

/// Blank input means "use the default directory".
fn parse_export_dir(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}
