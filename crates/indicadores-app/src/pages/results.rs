// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result area — exactly one view per session phase.

use dioxus::prelude::*;

use indicadores_core::human_errors::describe_response_error;
use indicadores_core::response::TemporalError;
use indicadores_core::session::ResponseError;
use indicadores_core::types::Proposal;
use indicadores_core::{ExportFormat, Phase};

use crate::services::app_services::AppServices;
use crate::state::AppState;

const CARD: &str = "background: white; border-radius: 12px; padding: 20px; margin-top: 24px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);";
const BADGE: &str = "display: inline-block; padding: 2px 10px; margin: 0 6px 6px 0; border-radius: 12px; border: 1px solid #ccc; font-size: 13px;";
const OUTLINE_BUTTON: &str = "padding: 10px 16px; border-radius: 8px; border: 1px solid #2e7d32; color: #2e7d32; background: white; font-size: 15px; cursor: pointer;";

#[component]
pub fn Results() -> Element {
    let state = use_context::<Signal<AppState>>();
    let phase = state.read().session.phase().clone();
    let has_proposals = !state.read().session.proposals().is_empty();

    match phase {
        Phase::Error(ResponseError::Temporal(error)) => rsx! { TemporalErrorCard { error } },
        Phase::Error(error) => rsx! { ErrorCard { error } },
        Phase::Loading(_) | Phase::ProposalsShown | Phase::FactSheetShown if has_proposals => {
            rsx! { ProposalsView {} }
        }
        Phase::Loading(_) => rsx! {
            p { style: "margin-top: 24px; text-align: center; color: #666;", "Consultando..." }
        },
        _ => rsx! {},
    }
}

// -- Error views --------------------------------------------------------------

#[component]
fn TemporalErrorCard(error: TemporalError) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let years = &error.error.years;

    rsx! {
        section { style: "{CARD} border: 2px solid #c62828;",
            h2 { style: "margin: 0; color: #c62828;", "{error.error.message}" }
            p { style: "color: #8e2424;", "{error.error.reason}" }

            h3 { "Variable consultada:" }
            p { style: "color: #555;",
                strong { "{error.variable.id}" }
                " - {error.variable.name}"
            }

            div { style: "display: grid; grid-template-columns: 1fr 1fr; gap: 16px; padding: 16px; background: #f5f5f5; border-radius: 8px;",
                div {
                    p { style: "margin: 0; font-size: 13px; color: #666;", "Años disponibles" }
                    p { style: "margin: 0; font-size: 24px; font-weight: bold; color: #c62828;", "{years.available}" }
                }
                div {
                    p { style: "margin: 0; font-size: 13px; color: #666;", "Años requeridos" }
                    p { style: "margin: 0; font-size: 24px; font-weight: bold; color: #2e7d32;", "{years.required}" }
                }
            }

            if !years.years.is_empty() {
                h4 { "Años con información:" }
                div {
                    for year in years.years.iter() {
                        span { key: "{year}", style: BADGE, "{year}" }
                    }
                }
            }

            if !error.recommendation.trim().is_empty() || !error.alternatives.is_empty() {
                div { style: "margin-top: 16px; padding: 16px; border-radius: 8px; background: #fff8e1; border: 1px solid #ffe082;",
                    h4 { style: "margin: 0 0 8px;", "Recomendaciones:" }
                    if !error.recommendation.trim().is_empty() {
                        p { style: "margin: 0 0 8px; font-size: 14px;", "{error.recommendation}" }
                    }
                    ul { style: "margin: 0; padding-left: 0; list-style: none;",
                        for alternative in error.alternatives.iter() {
                            li { style: "font-size: 14px; color: #555;", "• {alternative}" }
                        }
                    }
                }
            }

            button { style: "{OUTLINE_BUTTON} width: 100%; margin-top: 16px;",
                onclick: move |_| state.write().session.reset(),
                "Probar otra variable"
            }
        }
    }
}

#[component]
fn ErrorCard(error: ResponseError) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let notice = describe_response_error(&error);
    let details = match &error {
        ResponseError::Validation(v) => v.errors.clone(),
        _ => Vec::new(),
    };

    rsx! {
        section { style: "{CARD} border: 2px solid #c62828;",
            h2 { style: "margin: 0; color: #c62828;", "{notice.title}" }
            p { "{notice.description}" }
            if !details.is_empty() {
                ul {
                    for detail in details.iter() {
                        li { style: "font-size: 14px; color: #555;", "{detail}" }
                    }
                }
            }
            div { style: "display: flex; gap: 12px; margin-top: 12px;",
                button { style: OUTLINE_BUTTON,
                    onclick: move |_| {
                        if let Err(e) = state.write().session.dismiss_error() {
                            tracing::warn!(error = %e, "dismiss ignored");
                        }
                    },
                    "Volver"
                }
                button { style: OUTLINE_BUTTON,
                    onclick: move |_| state.write().session.reset(),
                    "Probar otra variable"
                }
            }
        }
    }
}

// -- Proposals ----------------------------------------------------------------

#[component]
fn ProposalsView() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let loading = state.read().session.is_loading();
    let variable = state.read().session.variable().cloned();
    let notice = state.read().session.notice().map(str::to_string);
    let proposals = state.read().session.proposals().to_vec();

    let export_svc = svc.clone();
    let export = move |format: ExportFormat| {
        let svc = export_svc.clone();
        move |_: MouseEvent| {
            let rendered = {
                let current = state.read();
                let session = &current.session;
                let variable_name = session.variable().map(|v| v.name.clone());
                let artifact = svc.exporter().proposal_list(
                    session.proposals(),
                    session.variable_id(),
                    variable_name.as_deref(),
                    format,
                    svc.today(),
                );
                artifact
            };
            super::save_artifact(state, &svc, rendered);
        }
    };

    rsx! {
        if let Some(variable) = variable {
            section { style: "{CARD}",
                h2 { style: "margin: 0 0 8px; color: #2e7d32;", "{variable.name}" }
                if !variable.definition.trim().is_empty() {
                    p { style: "color: #555;", "{variable.definition}" }
                }
                div {
                    if !variable.topic.trim().is_empty() {
                        span { style: BADGE, "{variable.topic}" }
                    }
                    if !variable.subtopic.trim().is_empty() {
                        span { style: BADGE, "{variable.subtopic}" }
                    }
                    if variable.total_years > 0 {
                        span { style: BADGE, "{variable.total_years} años disponibles" }
                    }
                    if !variable.years.is_empty() {
                        span { style: BADGE, {years_label(&variable.years)} }
                    }
                }
            }
        }

        if let Some(notice) = notice {
            p { style: "margin-top: 16px; padding: 12px; border-radius: 8px; background: #e3f2fd; color: #1f4e79;",
                "{notice}"
            }
        }

        div { style: "display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 16px; margin-top: 24px;",
            for proposal in proposals {
                ProposalCard { key: "{proposal.id}", proposal: proposal.clone(), busy: loading }
            }
        }

        div { style: "display: flex; flex-wrap: wrap; gap: 12px; margin-top: 24px;",
            button { style: "{OUTLINE_BUTTON} flex: 1;",
                disabled: loading,
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let begun = state.write().session.begin_more();
                        match begun {
                            Ok(request) => super::dispatch(state, svc.clone(), request),
                            Err(e) => state.write().notify_error(&e),
                        }
                    }
                },
                if loading { "Consultando..." } else { "Ver más opciones" }
            }
            button { style: OUTLINE_BUTTON,
                disabled: loading,
                onclick: export(ExportFormat::Pdf),
                "Exportar propuestas (PDF)"
            }
            button { style: OUTLINE_BUTTON,
                disabled: loading,
                onclick: export(ExportFormat::Docx),
                "Exportar propuestas (Word)"
            }
            button { style: OUTLINE_BUTTON,
                disabled: loading,
                onclick: move |_| state.write().session.reset(),
                "Nueva variable"
            }
        }
    }
}

#[component]
fn ProposalCard(proposal: Proposal, busy: bool) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let id = proposal.id;

    rsx! {
        div { style: "background: white; border-radius: 12px; padding: 16px; box-shadow: 0 2px 8px rgba(0,0,0,0.08); display: flex; flex-direction: column; gap: 8px;",
            div { style: "display: flex; align-items: center; gap: 8px;",
                span { style: "width: 28px; height: 28px; border-radius: 50%; background: #2e7d32; color: white; display: flex; align-items: center; justify-content: center; font-weight: bold;",
                    "{proposal.id}"
                }
                h3 { style: "margin: 0; font-size: 17px;", "{proposal.name}" }
            }
            p { style: "margin: 0; color: #555; font-size: 14px;", "{proposal.description}" }
            div {
                span { style: "{BADGE} background: #e8f5e9;", "{proposal.approach}" }
                span { style: BADGE, "{proposal.kind}" }
            }
            if proposal.has_detail() {
                div { style: "padding: 8px; border-radius: 8px; background: #f5f9ff;",
                    if let Some(objective) = &proposal.objective {
                        p { style: "margin: 0 0 4px; font-size: 13px;",
                            strong { style: "color: #1f4e79;", "Objetivo: " }
                            "{objective}"
                        }
                    }
                    if let Some(importance) = &proposal.importance {
                        p { style: "margin: 0; font-size: 13px;",
                            strong { style: "color: #1f4e79;", "Importancia: " }
                            "{importance}"
                        }
                    }
                }
            }
            button {
                style: "margin-top: auto; padding: 10px; border: none; border-radius: 8px; background: #f9a825; color: #222; font-size: 15px; cursor: pointer;",
                disabled: busy,
                onclick: move |_| {
                    let begun = state.write().session.begin_select(id);
                    match begun {
                        Ok(request) => super::dispatch(state, svc.clone(), request),
                        Err(e) => state.write().notify_error(&e),
                    }
                },
                if busy { "Consultando..." } else { "Elegir esta propuesta" }
            }
        }
    }
}

fn years_label(years: &[i32]) -> String {
    years
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}
