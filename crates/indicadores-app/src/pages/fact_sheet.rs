// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fact-sheet dialog — the selected proposal's methodological sheet, with
// export and download actions.
//
// The body is rendered from the same `Outline` the exporters use, so what is
// on screen is what ends up in the PDF and Word files.

use dioxus::prelude::*;

use indicadores_core::{ExportFormat, IndicadoresError};
use indicadores_document::Outline;
use indicadores_document::outline::Block;

use crate::services::app_services::AppServices;
use crate::state::AppState;

const ACTION_BUTTON: &str = "flex: 1; padding: 12px; border-radius: 8px; border: none; color: white; font-size: 15px; cursor: pointer;";

#[component]
pub fn FactSheetDialog() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let Some(record) = state.read().session.fact_sheet().cloned() else {
        return rsx! {};
    };
    let outline = Outline::from_fact_sheet(&record, svc.today());
    let download = record.download.link().map(str::to_string);
    let short_code = record.indicator.short_code().map(str::to_string);

    let export_svc = svc.clone();
    let export = move |format: ExportFormat| {
        let svc = export_svc.clone();
        move |_: MouseEvent| {
            let rendered = {
                let current = state.read();
                let session = &current.session;
                let artifact = match session.fact_sheet() {
                    Some(sheet) => svc.exporter().fact_sheet(
                        sheet,
                        session.variable_id(),
                        format,
                        svc.today(),
                    ),
                    None => return,
                };
                artifact
            };
            super::save_artifact(state, &svc, rendered);
        }
    };

    rsx! {
        div {
            style: "position: fixed; inset: 0; background: rgba(0,0,0,0.45); display: flex; align-items: center; justify-content: center; z-index: 100;",
            div {
                style: "width: min(900px, 94vw); max-height: 90vh; display: flex; flex-direction: column; background: white; border-radius: 12px; overflow: hidden;",

                div { style: "padding: 20px 24px; border-bottom: 1px solid #eee;",
                    p { style: "margin: 0; font-size: 13px; color: #2e7d32; text-transform: uppercase;", "Ficha metodológica" }
                    h2 { style: "margin: 4px 0 0; color: #2e7d32;", "{outline.title}" }
                    if let Some(code) = short_code {
                        span { style: "display: inline-block; margin-top: 8px; padding: 2px 10px; border-radius: 12px; background: #2e7d32; color: white; font-size: 13px;",
                            "{code}"
                        }
                    }
                }

                div { style: "flex: 1; overflow-y: auto; padding: 8px 24px 24px;",
                    for part in outline.sections.iter() {
                        section { style: "margin-top: 18px;",
                            h3 { style: "margin: 0 0 8px; color: #1f4e79;", "{part.heading}" }
                            for block in part.blocks.iter() {
                                BlockView { block: block.clone() }
                            }
                        }
                    }
                    p { style: "margin-top: 24px; font-size: 12px; color: #888; text-align: center;", "{outline.footer}" }
                }

                div { style: "display: flex; flex-wrap: wrap; gap: 12px; padding: 16px 24px; border-top: 1px solid #eee;",
                    if let Some(url) = download {
                        button { style: "{ACTION_BUTTON} background: #2e7d32;",
                            onclick: move |_| {
                                if let Err(e) = open::that(&url) {
                                    tracing::error!(error = %e, url = %url, "could not open download link");
                                    state.write().notify_error(&IndicadoresError::from(e));
                                }
                            },
                            "Abrir descarga"
                        }
                    }
                    button { style: "{ACTION_BUTTON} background: #c62828;",
                        onclick: export(ExportFormat::Pdf),
                        "Exportar PDF"
                    }
                    button { style: "{ACTION_BUTTON} background: #1f4e79;",
                        onclick: export(ExportFormat::Docx),
                        "Exportar Word"
                    }
                    button { style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white; font-size: 15px; cursor: pointer;",
                        onclick: move |_| {
                            if let Err(e) = state.write().session.close_fact_sheet() {
                                tracing::warn!(error = %e, "close ignored");
                            }
                        },
                        "Cerrar"
                    }
                }
            }
        }
    }
}

#[component]
fn BlockView(block: Block) -> Element {
    match block {
        Block::Paragraph(text) => rsx! {
            p { style: "margin: 0 0 8px; color: #444; white-space: pre-wrap;", "{text}" }
        },
        Block::Field { label, value } => rsx! {
            p { style: "margin: 0 0 6px; color: #444;",
                strong { "{label}: " }
                "{value}"
            }
        },
        Block::Bullet(text) => rsx! {
            p { style: "margin: 0 0 4px 12px; color: #444;", "• {text}" }
        },
        Block::Subheading(text) => rsx! {
            h4 { style: "margin: 12px 0 6px; color: #1f4e79;", "{text}" }
        },
        Block::Preformatted(text) => rsx! {
            pre { style: "margin: 0 0 8px; padding: 12px; background: #f5f5f5; border-radius: 8px; font-family: 'Courier New', monospace; font-size: 13px; white-space: pre-wrap;",
                "{text}"
            }
        },
    }
}
