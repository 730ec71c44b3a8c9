// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Word module — `.docx` generation with `docx-rs`.

pub mod writer;

pub use writer::DocxWriter;
