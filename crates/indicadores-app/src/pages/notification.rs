// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Notification banner shown below the header.

use dioxus::prelude::*;

use indicadores_core::human_errors::Severity;

use crate::state::AppState;

#[component]
pub fn NotificationBanner() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let Some(notification) = state.read().notification.clone() else {
        return rsx! {};
    };

    let (background, border) = match notification.severity {
        Severity::Info => ("#e8f5e9", "#2e7d32"),
        Severity::Validation => ("#fff8e1", "#f9a825"),
        Severity::Destructive => ("#ffebee", "#c62828"),
    };

    rsx! {
        div {
            style: "display: flex; justify-content: space-between; align-items: flex-start; gap: 12px; margin: 12px auto 0; width: 100%; max-width: 928px; padding: 12px 16px; border-radius: 8px; border-left: 4px solid {border}; background: {background}; box-sizing: border-box;",
            div {
                strong { "{notification.title}" }
                p { style: "margin: 4px 0 0; font-size: 14px; color: #444;", "{notification.description}" }
            }
            button {
                style: "border: none; background: transparent; font-size: 18px; cursor: pointer; color: #666;",
                onclick: move |_| state.write().dismiss_notification(),
                "×"
            }
        }
    }
}
