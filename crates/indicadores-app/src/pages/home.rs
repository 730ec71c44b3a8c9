// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Home page — query form, results, and the fact-sheet dialog.

use dioxus::prelude::*;

use indicadores_core::Phase;

use super::fact_sheet::FactSheetDialog;
use super::query_form::QueryForm;
use super::results::Results;
use crate::state::AppState;

#[component]
pub fn Home() -> Element {
    let state = use_context::<Signal<AppState>>();
    let sheet_open = *state.read().session.phase() == Phase::FactSheetShown;

    rsx! {
        div {
            QueryForm {}
            Results {}
            if sheet_open {
                FactSheetDialog {}
            }
        }
    }
}
