// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Webhook response model — one variant per `tipo` discriminator.

use serde::Deserialize;

use crate::error::{IndicadoresError, Result};
use crate::fact_sheet::{FactSheetRecord, lenient_opt_string, lenient_string, lenient_string_list};
use crate::types::Proposal;

/// Every response shape the generation service can send back.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "tipo")]
pub enum WebhookResponse {
    /// Generic failure reported by the service.
    #[serde(rename = "error")]
    Error(ServiceError),
    /// The variable does not have enough years of data.
    #[serde(rename = "error_temporalidad")]
    TemporalError(TemporalError),
    /// The request itself was rejected (bad id, unknown session, ...).
    #[serde(rename = "error_validacion")]
    ValidationError(ValidationError),
    /// First batch of proposals for a variable.
    #[serde(rename = "propuestas_iniciales")]
    InitialProposals(InitialProposals),
    /// Extra proposals requested with "more options".
    #[serde(rename = "propuestas_adicionales")]
    AdditionalProposals(AdditionalProposals),
    /// Fact sheet for the selected proposal.
    #[serde(rename = "ficha_metodologica")]
    FactSheet(Box<FactSheetRecord>),
}

impl WebhookResponse {
    /// Decode a response body, mapping unknown shapes to `UnexpectedResponse`.
    pub fn from_json(body: &str) -> Result<Self> {
        serde_json::from_str(body).map_err(|e| IndicadoresError::UnexpectedResponse(e.to_string()))
    }

    /// Discriminator as it appears on the wire, for logging.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Error(_) => "error",
            Self::TemporalError(_) => "error_temporalidad",
            Self::ValidationError(_) => "error_validacion",
            Self::InitialProposals(_) => "propuestas_iniciales",
            Self::AdditionalProposals(_) => "propuestas_adicionales",
            Self::FactSheet(_) => "ficha_metodologica",
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(
            self,
            Self::Error(_) | Self::TemporalError(_) | Self::ValidationError(_)
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ServiceError {
    #[serde(rename = "mensaje", default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(rename = "codigo", default, deserialize_with = "lenient_opt_string")]
    pub code: Option<String>,
    #[serde(rename = "detalle", default, deserialize_with = "lenient_opt_string")]
    pub detail: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ValidationError {
    #[serde(rename = "mensaje", default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(rename = "campo", default, deserialize_with = "lenient_opt_string")]
    pub field: Option<String>,
    #[serde(rename = "errores", default, deserialize_with = "lenient_string_list")]
    pub errors: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemporalErrorDetail {
    #[serde(rename = "codigo", default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(rename = "mensaje", default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(rename = "razon", default, deserialize_with = "lenient_string")]
    pub reason: String,
    #[serde(rename = "detalles", default)]
    pub years: YearCoverage,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct YearCoverage {
    #[serde(rename = "anios_requeridos", default)]
    pub required: u32,
    #[serde(rename = "anios_disponibles", default)]
    pub available: u32,
    #[serde(rename = "años", alias = "anios", default)]
    pub years: Vec<i32>,
}

/// Short description of the queried variable.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VariableSummary {
    #[serde(rename = "idVar", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "totalAnios", default)]
    pub total_years: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TemporalError {
    #[serde(default)]
    pub error: TemporalErrorDetail,
    #[serde(default)]
    pub variable: VariableSummary,
    #[serde(rename = "recomendacion", default, deserialize_with = "lenient_string")]
    pub recommendation: String,
    #[serde(rename = "alternativas", default, deserialize_with = "lenient_string_list")]
    pub alternatives: Vec<String>,
}

/// Full description of the queried variable, sent with the first batch.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct VariableInfo {
    #[serde(rename = "idVar", default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "definicion", default, deserialize_with = "lenient_string")]
    pub definition: String,
    #[serde(rename = "tema", default, deserialize_with = "lenient_string")]
    pub topic: String,
    #[serde(rename = "subtema", default, deserialize_with = "lenient_string")]
    pub subtopic: String,
    #[serde(rename = "totalAnios", default)]
    pub total_years: u32,
    #[serde(rename = "años", alias = "anios", default)]
    pub years: Vec<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct InitialProposals {
    #[serde(default)]
    pub variable: VariableInfo,
    #[serde(rename = "propuestas", default)]
    pub proposals: Vec<Proposal>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AdditionalProposals {
    #[serde(rename = "mensaje", default, deserialize_with = "lenient_string")]
    pub message: String,
    #[serde(default)]
    pub variable: VariableSummary,
    #[serde(rename = "propuestas", default)]
    pub proposals: Vec<Proposal>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatches_temporal_error() {
        let body = r#"{
            "tipo": "error_temporalidad",
            "error": {
                "codigo": "TEMP_001",
                "mensaje": "Información insuficiente",
                "razon": "Se requieren al menos 3 años",
                "detalles": { "anios_requeridos": 3, "anios_disponibles": 1, "años": [2020] }
            },
            "variable": { "idVar": "CPV-001", "nombre": "Viviendas", "totalAnios": 1 },
            "recomendacion": "Elegir otra variable",
            "alternativas": ["CPV-002", "CPV-003"]
        }"#;
        match WebhookResponse::from_json(body).unwrap() {
            WebhookResponse::TemporalError(err) => {
                assert_eq!(err.error.years.available, 1);
                assert_eq!(err.error.years.years, vec![2020]);
                assert_eq!(err.alternatives.len(), 2);
                assert_eq!(err.variable.id, "CPV-001");
            }
            other => panic!("unexpected variant: {}", other.kind()),
        }
    }

    #[test]
    fn dispatches_initial_proposals() {
        let body = r#"{
            "tipo": "propuestas_iniciales",
            "variable": {
                "idVar": "CPV-005", "nombre": "Agua entubada", "definicion": "Viviendas con agua",
                "tema": "Agua", "subtema": "Acceso", "totalAnios": 3, "años": [2010, 2015, 2020]
            },
            "propuestas": [
                { "id": 1, "nombre": "Cobertura de agua", "enfoque": "Estado", "tipo": "Porcentaje", "descripcion": "..." }
            ]
        }"#;
        let response = WebhookResponse::from_json(body).unwrap();
        assert_eq!(response.kind(), "propuestas_iniciales");
        assert!(!response.is_error());
        let WebhookResponse::InitialProposals(initial) = response else {
            panic!("expected initial proposals");
        };
        assert_eq!(initial.variable.years, vec![2010, 2015, 2020]);
        assert_eq!(initial.proposals[0].name, "Cobertura de agua");
    }

    #[test]
    fn dispatches_additional_proposals() {
        let body = r#"{
            "tipo": "propuestas_adicionales",
            "mensaje": "Nuevas opciones",
            "variable": { "idVar": "CPV-005", "nombre": "Agua entubada" },
            "propuestas": [
                { "id": 4, "nombre": "Brecha de acceso", "enfoque": "Impacto", "tipo": "Índice", "descripcion": "..." }
            ]
        }"#;
        assert!(matches!(
            WebhookResponse::from_json(body).unwrap(),
            WebhookResponse::AdditionalProposals(ref a) if a.proposals[0].id == 4
        ));
    }

    #[test]
    fn dispatches_fact_sheet() {
        let body = r#"{
            "tipo": "ficha_metodologica",
            "indicador": { "id": 1, "nombre": "Cobertura de agua", "siglas": "CA" },
            "ficha": { "formula": "CA = V / T * 100", "limitaciones": [] },
            "descarga": { "disponible": false, "url": "" }
        }"#;
        let WebhookResponse::FactSheet(record) = WebhookResponse::from_json(body).unwrap() else {
            panic!("expected fact sheet");
        };
        assert_eq!(record.formula, "CA = V / T * 100");
        assert_eq!(record.indicator.short_code(), Some("CA"));
    }

    #[test]
    fn dispatches_generic_and_validation_errors() {
        let generic = WebhookResponse::from_json(r#"{ "tipo": "error", "mensaje": "Falla" }"#).unwrap();
        assert!(generic.is_error());
        let validation = WebhookResponse::from_json(
            r#"{ "tipo": "error_validacion", "mensaje": "ID inválido", "campo": "idVar", "errores": ["formato"] }"#,
        )
        .unwrap();
        let WebhookResponse::ValidationError(v) = validation else {
            panic!("expected validation error");
        };
        assert_eq!(v.field.as_deref(), Some("idVar"));
        assert_eq!(v.errors, vec!["formato".to_string()]);
    }

    #[test]
    fn unknown_tipo_is_unexpected() {
        let err = WebhookResponse::from_json(r#"{ "tipo": "otra_cosa" }"#).unwrap_err();
        assert!(matches!(err, IndicadoresError::UnexpectedResponse(_)));
        let err = WebhookResponse::from_json(r#"{ "mensaje": "sin tipo" }"#).unwrap_err();
        assert!(matches!(err, IndicadoresError::UnexpectedResponse(_)));
    }
}
