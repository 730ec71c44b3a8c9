// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the indicadores-document crate.
// Measures layout and full rendering of a fact sheet with a long list of
// limitations, which forces several page breaks.

use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use indicadores_core::{FactSheetRecord, PaperSize};
use indicadores_document::pdf::PdfLayout;
use indicadores_document::{DocxWriter, Outline, PdfWriter};

// ---------------------------------------------------------------------------
// Fixture
// ---------------------------------------------------------------------------

fn long_record() -> FactSheetRecord {
    let mut record = FactSheetRecord::default();
    record.indicator.name = "Tasa de reciclaje de residuos sólidos urbanos".into();
    record.indicator.abbreviation = Some("TRR".into());
    record.objective = "Medir la proporción de residuos que se envían a reciclaje. ".repeat(12);
    record.unit = "Porcentaje".into();
    record.formula = "TRR = (RR / RG) * 100".into();
    record.limitations = (1..=120)
        .map(|i| format!("Limitación {i}: cobertura parcial de los registros municipales."))
        .collect();
    record
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_export(c: &mut Criterion) {
    let record = long_record();
    let date = NaiveDate::from_ymd_opt(2026, 10, 18).unwrap_or_default();
    let outline = Outline::from_fact_sheet(&record, date);

    c.bench_function("pdf_layout (120 limitations)", |b| {
        b.iter(|| black_box(PdfLayout::compute(black_box(&outline), PaperSize::A4)));
    });

    c.bench_function("pdf_render (120 limitations)", |b| {
        let writer = PdfWriter::a4();
        b.iter(|| black_box(writer.create_from_outline(black_box(&outline))));
    });

    c.bench_function("docx_render (120 limitations)", |b| {
        let writer = DocxWriter::new();
        b.iter(|| black_box(writer.create_from_outline(black_box(&outline))));
    });
}

criterion_group!(benches, bench_export);
criterion_main!(benches);
