// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF module — page layout, rendering, and read-back verification.

pub mod encoding;
pub mod layout;
pub mod reader;
pub mod writer;

pub use layout::PdfLayout;
pub use reader::PdfReader;
pub use writer::PdfWriter;
