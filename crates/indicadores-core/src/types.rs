// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Indicadores client.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::fact_sheet::{lenient_opt_string, lenient_string};

/// Identifier the webhook uses to keep per-user conversation state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(format!("session-{}", Uuid::new_v4()))
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Standard paper sizes offered for PDF export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    Letter,
    Legal,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
        }
    }
}

/// Output formats the fact sheet can be exported to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Pdf,
    Docx,
}

impl ExportFormat {
    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Docx => "docx",
        }
    }

    /// Label shown in save dialogs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF",
            Self::Docx => "Word",
        }
    }
}

/// A candidate indicator returned by the generation service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Proposal {
    pub id: u32,
    #[serde(rename = "nombre", default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(rename = "enfoque", default, deserialize_with = "lenient_string")]
    pub approach: String,
    #[serde(rename = "tipo", default, deserialize_with = "lenient_string")]
    pub kind: String,
    #[serde(rename = "descripcion", default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(
        rename = "objetivo",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub objective: Option<String>,
    #[serde(
        rename = "importancia",
        default,
        deserialize_with = "lenient_opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub importance: Option<String>,
}

impl Proposal {
    /// Whether the proposal carries the extra detail shown in its tooltip.
    pub fn has_detail(&self) -> bool {
        self.objective.is_some() || self.importance.is_some()
    }
}

/// What the user asked the generation service to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WebhookAction {
    /// First query for a variable.
    #[serde(rename = "iniciar")]
    Start,
    /// More proposals for the same variable.
    #[serde(rename = "mas_opciones")]
    MoreOptions,
    /// Build the fact sheet for a chosen proposal.
    #[serde(rename = "seleccionar")]
    Select,
}

impl WebhookAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "iniciar",
            Self::MoreOptions => "mas_opciones",
            Self::Select => "seleccionar",
        }
    }
}

/// Body POSTed to the generation webhook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WebhookRequest {
    #[serde(rename = "idVar")]
    pub variable_id: String,
    #[serde(rename = "sessionId")]
    pub session_id: SessionId,
    #[serde(rename = "accion")]
    pub action: WebhookAction,
    #[serde(rename = "propuestaId", skip_serializing_if = "Option::is_none")]
    pub proposal_id: Option<u32>,
    #[serde(rename = "nombrePropuesta", skip_serializing_if = "Option::is_none")]
    pub proposal_name: Option<String>,
}

/// Normalise a user-typed variable id: trimmed and upper-cased.
pub fn normalize_variable_id(raw: &str) -> String {
    raw.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_uses_wire_names() {
        let request = WebhookRequest {
            variable_id: "CPV-005".into(),
            session_id: SessionId("session-1".into()),
            action: WebhookAction::Select,
            proposal_id: Some(2),
            proposal_name: Some("Tasa de reciclaje".into()),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["idVar"], "CPV-005");
        assert_eq!(json["sessionId"], "session-1");
        assert_eq!(json["accion"], "seleccionar");
        assert_eq!(json["propuestaId"], 2);
        assert_eq!(json["nombrePropuesta"], "Tasa de reciclaje");
    }

    #[test]
    fn start_request_omits_proposal_fields() {
        let request = WebhookRequest {
            variable_id: "CPV-005".into(),
            session_id: SessionId("session-1".into()),
            action: WebhookAction::Start,
            proposal_id: None,
            proposal_name: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("propuestaId").is_none());
        assert!(json.get("nombrePropuesta").is_none());
    }

    #[test]
    fn proposal_detail_is_optional() {
        let proposal: Proposal = serde_json::from_str(
            r#"{"id": 1, "nombre": "Consumo de agua per cápita", "enfoque": "Presión",
                "tipo": "Tasa", "descripcion": "Litros por habitante"}"#,
        )
        .unwrap();
        assert!(!proposal.has_detail());
        assert_eq!(proposal.approach, "Presión");
    }

    #[test]
    fn variable_id_is_normalized() {
        assert_eq!(normalize_variable_id("  cpv-005 "), "CPV-005");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
        assert!(SessionId::new().0.starts_with("session-"));
    }
}
