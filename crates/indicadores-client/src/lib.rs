// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// indicadores-client — talks to the indicator-generation webhook.

pub mod webhook;

pub use webhook::WebhookClient;
