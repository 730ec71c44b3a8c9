// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-facing notifications.
//
// Every technical error is mapped to a short Spanish title and a suggestion.
// Severity drives the colour of the notification banner.

use crate::error::IndicadoresError;
use crate::session::ResponseError;

/// How the notification should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational, e.g. a completed export.
    Info,
    /// The user should fix their input and try again.
    Validation,
    /// Something failed; retrying later may help.
    Destructive,
}

/// A toast-style message shown to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    /// Short heading.
    pub title: String,
    /// Body text with what to do next.
    pub description: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }
}

/// Convert an `IndicadoresError` into a notification the user can act on.
pub fn humanize_error(err: &IndicadoresError) -> Notification {
    let (title, description, severity) = match err {
        IndicadoresError::InvalidVariableId { min, .. } => (
            "Validación",
            format!("El ID de variable debe tener al menos {min} caracteres"),
            Severity::Validation,
        ),
        IndicadoresError::UnknownProposal(_) => (
            "Propuesta no disponible",
            "La propuesta elegida ya no está en la lista. Consulta la variable de nuevo.".into(),
            Severity::Validation,
        ),
        IndicadoresError::InvalidTransition { .. } => (
            "Espera un momento",
            "Hay una operación en curso. Intenta de nuevo cuando termine.".into(),
            Severity::Validation,
        ),
        IndicadoresError::Connection(_) | IndicadoresError::HttpStatus { .. } => (
            "Error",
            "No se pudo conectar con el servidor. Intenta nuevamente.".into(),
            Severity::Destructive,
        ),
        IndicadoresError::UnexpectedResponse(_) => (
            "Respuesta inesperada",
            "El servidor respondió con un formato desconocido. Intenta nuevamente.".into(),
            Severity::Destructive,
        ),
        IndicadoresError::PdfError(_) => (
            "No se pudo exportar",
            "Ocurrió un error al generar el PDF.".into(),
            Severity::Destructive,
        ),
        IndicadoresError::DocxError(_) => (
            "No se pudo exportar",
            "Ocurrió un error al generar el documento de Word.".into(),
            Severity::Destructive,
        ),
        IndicadoresError::NothingToExport(_) => (
            "Nada que exportar",
            "Primero elige una propuesta o consulta una variable.".into(),
            Severity::Validation,
        ),
        IndicadoresError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::PermissionDenied => (
                "No se pudo guardar el archivo",
                "No hay permiso para escribir en esa carpeta. Elige otra ubicación.".into(),
                Severity::Destructive,
            ),
            _ => (
                "No se pudo guardar el archivo",
                "Revisa que haya espacio disponible e intenta de nuevo.".into(),
                Severity::Destructive,
            ),
        },
        IndicadoresError::Serialization(_) => (
            "Error interno",
            "Los datos no se pudieron procesar. Intenta nuevamente.".into(),
            Severity::Destructive,
        ),
    };

    Notification {
        title: title.into(),
        description,
        severity,
    }
}

/// Headline and body for an error answer from the service.
pub fn describe_response_error(err: &ResponseError) -> Notification {
    match err {
        ResponseError::Service(e) => Notification {
            title: "Error".into(),
            description: fallback(&e.message, "El servidor no pudo procesar la consulta."),
            severity: Severity::Destructive,
        },
        ResponseError::Validation(e) => Notification {
            title: "Validación".into(),
            description: fallback(&e.message, "La consulta no es válida."),
            severity: Severity::Validation,
        },
        ResponseError::Temporal(e) => Notification {
            title: fallback(&e.error.message, "Información temporal insuficiente"),
            description: fallback(&e.error.reason, &e.recommendation),
            severity: Severity::Destructive,
        },
    }
}

fn fallback(primary: &str, secondary: &str) -> String {
    if primary.trim().is_empty() {
        secondary.to_string()
    } else {
        primary.to_string()
    }
}
