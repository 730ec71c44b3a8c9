// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Query form — variable id input and submit button.

use dioxus::prelude::*;

use crate::services::app_services::AppServices;
use crate::state::AppState;

#[component]
pub fn QueryForm() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut input = use_signal(String::new);

    let loading = state.read().session.is_loading();
    let can_submit = !loading && state.read().session.accepts_variable_id(&input.read());

    rsx! {
        section {
            style: "background: white; border-radius: 12px; padding: 20px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);",
            h2 { style: "margin: 0 0 4px;", "Consultar variable" }
            p { style: "margin: 0 0 16px; color: #666;",
                "Ingresa el ID de la variable para generar propuestas de indicadores"
            }
            form {
                style: "display: flex; gap: 12px;",
                onsubmit: move |evt| {
                    evt.prevent_default();
                    let raw = input.read().clone();
                    let begun = state.write().session.begin_query(&raw);
                    match begun {
                        Ok(request) => {
                            state.write().dismiss_notification();
                            super::dispatch(state, svc.clone(), request);
                        }
                        Err(e) => state.write().notify_error(&e),
                    }
                },
                input {
                    r#type: "text",
                    style: "flex: 1; padding: 12px; font-size: 18px; border: 1px solid #ccc; border-radius: 8px;",
                    placeholder: "Ej: CPV-005",
                    value: "{input}",
                    disabled: loading,
                    oninput: move |evt| input.set(evt.value().to_uppercase()),
                }
                button {
                    r#type: "submit",
                    style: "padding: 12px 24px; border: none; border-radius: 8px; background: #2e7d32; color: white; font-size: 16px;",
                    disabled: !can_submit,
                    if loading { "Consultando..." } else { "Generar" }
                }
            }
        }
    }
}
