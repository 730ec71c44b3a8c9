// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Methodological fact sheet — the record both document exporters consume.
//
// The webhook's JSON nests most fields under `ficha` and uses Spanish keys.
// It is free text produced by a generator, so decoding is lenient: missing
// text becomes the empty string and numbers are accepted where strings are
// expected. Ordered mappings keep the order they had on the wire.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Identity of the indicator the fact sheet describes.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct IndicatorIdentity {
    #[serde(default)]
    pub id: Option<u32>,
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "siglas", default, deserialize_with = "lenient_opt_string")]
    pub abbreviation: Option<String>,
}

impl IndicatorIdentity {
    /// The short code, if it carries any visible characters.
    pub fn short_code(&self) -> Option<&str> {
        non_blank(self.abbreviation.as_deref())
    }
}

/// Producer of the underlying statistics.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Source {
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "institucion", default, deserialize_with = "lenient_string")]
    pub institution: String,
    #[serde(rename = "programa", default, deserialize_with = "lenient_opt_string")]
    pub program: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub url: Option<String>,
}

/// Sustainable Development Goal the indicator contributes to.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SdgAlignment {
    #[serde(rename = "numero", default, deserialize_with = "lenient_string")]
    pub number: String,
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "meta", default, deserialize_with = "lenient_opt_string")]
    pub target: Option<String>,
}

/// Placement in the environmental statistics framework (MDEA).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EnvironmentalFramework {
    #[serde(rename = "componente", default, deserialize_with = "lenient_string")]
    pub component: String,
    #[serde(rename = "subcomponente", default, deserialize_with = "lenient_opt_string")]
    pub subcomponent: Option<String>,
    #[serde(rename = "tema", default, deserialize_with = "lenient_opt_string")]
    pub topic: Option<String>,
}

/// Alignment with the national development plan (PND).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct DevelopmentPlan {
    #[serde(rename = "eje", default, deserialize_with = "lenient_string")]
    pub axis: String,
    #[serde(rename = "objetivo", default, deserialize_with = "lenient_string")]
    pub objective: String,
    #[serde(rename = "estrategia", default, deserialize_with = "lenient_string")]
    pub strategy: String,
}

impl DevelopmentPlan {
    fn is_blank(&self) -> bool {
        [&self.axis, &self.objective, &self.strategy]
            .iter()
            .all(|s| s.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Alignment {
    #[serde(rename = "ods", default)]
    pub sdg: SdgAlignment,
    #[serde(rename = "mdea", default)]
    pub environmental_framework: EnvironmentalFramework,
    #[serde(rename = "pnd", default)]
    pub development_plan: Option<DevelopmentPlan>,
}

/// Link to a pre-rendered document offered by the service.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Download {
    #[serde(rename = "disponible", default)]
    pub available: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub url: String,
}

impl Download {
    /// The url, only when the service flagged the download as available.
    pub fn link(&self) -> Option<&str> {
        if self.available {
            non_blank(Some(self.url.as_str()))
        } else {
            None
        }
    }
}

/// A complete methodological fact sheet.
///
/// Read-only input to the exporters; nothing in this crate mutates it after
/// decoding.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "FactSheetWire")]
pub struct FactSheetRecord {
    pub indicator: IndicatorIdentity,
    pub objective: String,
    pub importance: String,
    pub numerator: Option<String>,
    pub denominator: Option<String>,
    pub variable_definitions: IndexMap<String, String>,
    pub unit: String,
    pub formula: String,
    pub formula_detail: IndexMap<String, String>,
    pub data_table: Option<Value>,
    pub chart: Option<Value>,
    pub coverage: Option<String>,
    pub disaggregation: Option<String>,
    pub temporal_coverage: Option<String>,
    pub frequency: Option<String>,
    pub periodicity: Option<String>,
    pub source_temporal_coverage: Option<String>,
    pub source: Source,
    pub limitations: Vec<String>,
    pub alignment: Alignment,
    pub download: Download,
}

// -- Wire shape ---------------------------------------------------------------

#[derive(Deserialize)]
struct FactSheetWire {
    #[serde(rename = "indicador", default)]
    indicator: IndicatorIdentity,
    #[serde(default)]
    ficha: SheetBodyWire,
    #[serde(rename = "descarga", default)]
    download: Download,
}

#[derive(Default, Deserialize)]
struct SheetBodyWire {
    #[serde(rename = "objetivo", default, deserialize_with = "lenient_string")]
    objective: String,
    #[serde(rename = "importancia", default, deserialize_with = "lenient_string")]
    importance: String,
    #[serde(rename = "numerador", default, deserialize_with = "lenient_opt_string")]
    numerator: Option<String>,
    #[serde(rename = "denominador", default, deserialize_with = "lenient_opt_string")]
    denominator: Option<String>,
    #[serde(rename = "definicion_variables", default, deserialize_with = "ordered_text_map")]
    variable_definitions: IndexMap<String, String>,
    #[serde(rename = "unidad", default, deserialize_with = "lenient_string")]
    unit: String,
    #[serde(default, deserialize_with = "lenient_string")]
    formula: String,
    #[serde(rename = "detalle_formula", default, deserialize_with = "ordered_text_map")]
    formula_detail: IndexMap<String, String>,
    #[serde(rename = "tabla_datos", default)]
    data_table: Option<Value>,
    #[serde(rename = "grafica", default)]
    chart: Option<Value>,
    #[serde(rename = "cobertura", default, deserialize_with = "lenient_opt_string")]
    coverage: Option<String>,
    #[serde(rename = "desagregacion", default, deserialize_with = "lenient_opt_string")]
    disaggregation: Option<String>,
    #[serde(rename = "temporal", default, deserialize_with = "lenient_opt_string")]
    temporal_coverage: Option<String>,
    #[serde(rename = "frecuencia", default, deserialize_with = "lenient_opt_string")]
    frequency: Option<String>,
    #[serde(rename = "periodicidad", default, deserialize_with = "lenient_opt_string")]
    periodicity: Option<String>,
    #[serde(
        rename = "cobertura_temporal_fuente",
        default,
        deserialize_with = "lenient_opt_string"
    )]
    source_temporal_coverage: Option<String>,
    #[serde(rename = "fuente", default)]
    source: Source,
    #[serde(rename = "limitaciones", default, deserialize_with = "lenient_string_list")]
    limitations: Vec<String>,
    #[serde(rename = "alineacion", default)]
    alignment: Alignment,
    // Older payloads put the development plan next to `alineacion`.
    #[serde(rename = "pnd", default)]
    development_plan: Option<DevelopmentPlan>,
}

impl From<FactSheetWire> for FactSheetRecord {
    fn from(wire: FactSheetWire) -> Self {
        let body = wire.ficha;
        let mut alignment = body.alignment;
        if alignment.development_plan.is_none() {
            alignment.development_plan = body.development_plan;
        }
        if alignment
            .development_plan
            .as_ref()
            .is_some_and(DevelopmentPlan::is_blank)
        {
            alignment.development_plan = None;
        }

        Self {
            indicator: wire.indicator,
            objective: body.objective,
            importance: body.importance,
            numerator: body.numerator,
            denominator: body.denominator,
            variable_definitions: body.variable_definitions,
            unit: body.unit,
            formula: body.formula,
            formula_detail: body.formula_detail,
            data_table: body.data_table.filter(|v| !v.is_null()),
            chart: body.chart.filter(|v| !v.is_null()),
            coverage: body.coverage,
            disaggregation: body.disaggregation,
            temporal_coverage: body.temporal_coverage,
            frequency: body.frequency,
            periodicity: body.periodicity,
            source_temporal_coverage: body.source_temporal_coverage,
            source: body.source,
            limitations: body.limitations,
            alignment,
            download: wire.download,
        }
    }
}

// -- Lenient decoding helpers -------------------------------------------------

/// Render any JSON scalar as text. Structured values become compact JSON.
pub(crate) fn value_to_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_text(Value::deserialize(deserializer)?))
}

pub(crate) fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        other => Some(value_to_text(other)),
    })
}

pub(crate) fn lenient_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => Vec::new(),
        Value::Array(items) => items
            .into_iter()
            .map(value_to_text)
            .filter(|s| !s.trim().is_empty())
            .collect(),
        other => vec![value_to_text(other)],
    })
}

fn ordered_text_map<'de, D>(deserializer: D) -> Result<IndexMap<String, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<IndexMap<String, Value>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|(k, v)| (k, value_to_text(v)))
        .collect())
}

/// `Some(trimmed)` when the string has visible content.
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const FULL: &str = r#"{
        "indicador": { "id": 3, "nombre": "Tasa de reciclaje de residuos", "siglas": "TRR" },
        "ficha": {
            "objetivo": "Medir la proporción de residuos reciclados.",
            "importancia": "Permite evaluar la economía circular.",
            "definicion_variables": { "RR": "Residuos reciclados", "RG": "Residuos generados" },
            "unidad": "Porcentaje",
            "formula": "TRR = (RR / RG) * 100",
            "detalle_formula": { "TRR": "Tasa de reciclaje", "RR": "Toneladas recicladas", "RG": "Toneladas generadas" },
            "tabla_datos": { "2020": 12.5, "2021": 13.1 },
            "cobertura": "Nacional",
            "frecuencia": "Anual",
            "fuente": { "nombre": "Censo", "institucion": "INEGI", "programa": "CNGMD" },
            "limitaciones": ["Cobertura municipal incompleta"],
            "alineacion": {
                "ods": { "numero": 12, "nombre": "Producción y consumo responsables", "meta": "12.5" },
                "mdea": { "componente": "Residuos", "subcomponente": "Gestión", "tema": "Reciclaje" }
            },
            "pnd": { "eje": "Bienestar", "objetivo": "Medio ambiente sano", "estrategia": "Economía circular" }
        },
        "descarga": { "disponible": true, "url": "https://example.org/ficha.pdf" }
    }"#;

    #[test]
    fn decodes_full_record() {
        let record: FactSheetRecord = serde_json::from_str(FULL).unwrap();
        assert_eq!(record.indicator.short_code(), Some("TRR"));
        assert_eq!(record.alignment.sdg.number, "12");
        assert_eq!(record.source.url, None);
        assert_eq!(record.download.link(), Some("https://example.org/ficha.pdf"));
        assert_eq!(record.limitations.len(), 1);
    }

    #[test]
    fn ordered_maps_keep_wire_order() {
        let record: FactSheetRecord = serde_json::from_str(FULL).unwrap();
        let keys: Vec<&str> = record.formula_detail.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["TRR", "RR", "RG"]);
        let keys: Vec<&str> = record.variable_definitions.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["RR", "RG"]);
    }

    #[test]
    fn legacy_development_plan_is_moved_into_alignment() {
        let record: FactSheetRecord = serde_json::from_str(FULL).unwrap();
        let plan = record.alignment.development_plan.unwrap();
        assert_eq!(plan.axis, "Bienestar");
    }

    #[test]
    fn missing_fields_decode_to_empty_text() {
        let record: FactSheetRecord =
            serde_json::from_str(r#"{ "indicador": { "nombre": "X" }, "ficha": {} }"#).unwrap();
        assert_eq!(record.formula, "");
        assert_eq!(record.unit, "");
        assert!(record.limitations.is_empty());
        assert!(record.alignment.development_plan.is_none());
        assert_eq!(record.indicator.short_code(), None);
        assert_eq!(record.download.link(), None);
    }

    #[test]
    fn blank_development_plan_is_dropped() {
        let record: FactSheetRecord = serde_json::from_str(
            r#"{ "ficha": { "alineacion": { "pnd": { "eje": " ", "objetivo": "", "estrategia": "" } } } }"#,
        )
        .unwrap();
        assert!(record.alignment.development_plan.is_none());
    }

    #[test]
    fn null_data_table_counts_as_absent() {
        let record: FactSheetRecord =
            serde_json::from_str(r#"{ "ficha": { "tabla_datos": null, "grafica": "Barras" } }"#)
                .unwrap();
        assert!(record.data_table.is_none());
        assert_eq!(record.chart, Some(Value::String("Barras".into())));
    }

    #[test]
    fn unavailable_download_has_no_link() {
        let download = Download {
            available: false,
            url: "https://example.org".into(),
        };
        assert_eq!(download.link(), None);
    }
}
