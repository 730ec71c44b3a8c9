// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Shared fixtures for the document tests.

use chrono::NaiveDate;
use indicadores_core::types::Proposal;
use indicadores_core::FactSheetRecord;

const FULL_SHEET: &str = r#"{
    "indicador": { "id": 7, "nombre": "Tasa de reciclaje de residuos sólidos urbanos", "siglas": "TRR" },
    "ficha": {
        "objetivo": "Medir la proporción de residuos sólidos urbanos que se envían a reciclaje.",
        "importancia": "Permite evaluar el avance hacia una economía circular en los municipios.",
        "numerador": "Toneladas de residuos enviadas a reciclaje",
        "denominador": "Toneladas de residuos generadas",
        "definicion_variables": {
            "RR": "Residuos reciclados en el año",
            "RG": "Residuos generados en el año"
        },
        "unidad": "Porcentaje",
        "formula": "TRR = (RR / RG) * 100",
        "detalle_formula": {
            "TRR": "Tasa de reciclaje",
            "RR": "Residuos reciclados",
            "RG": "Residuos generados"
        },
        "tabla_datos": { "2020": 12.5, "2021": 13.1 },
        "grafica": "Serie de tiempo anual",
        "cobertura": "Nacional",
        "desagregacion": "Entidad federativa",
        "temporal": "2010-2022",
        "frecuencia": "Anual",
        "periodicidad": "Bienal",
        "cobertura_temporal_fuente": "2010 a la fecha",
        "fuente": {
            "nombre": "Censo Nacional de Gobiernos Municipales",
            "institucion": "INEGI",
            "programa": "CNGMD",
            "url": "https://www.inegi.org.mx/programas/cngmd/"
        },
        "limitaciones": [
            "La información depende de registros administrativos municipales.",
            "No todos los municipios reportan cada levantamiento."
        ],
        "alineacion": {
            "ods": { "numero": "12", "nombre": "Producción y consumo responsables", "meta": "12.5" },
            "mdea": { "componente": "Residuos", "subcomponente": "Gestión de residuos", "tema": "Reciclaje" },
            "pnd": { "eje": "Bienestar", "objetivo": "Medio ambiente sano", "estrategia": "Economía circular" }
        }
    },
    "descarga": { "disponible": true, "url": "https://example.org/fichas/TRR.pdf" }
}"#;

/// A record with every optional field populated.
pub(crate) fn full_record() -> FactSheetRecord {
    serde_json::from_str(FULL_SHEET).expect("fixture must decode")
}

/// A record with nothing but a blank formula and unit.
pub(crate) fn minimal_record() -> FactSheetRecord {
    FactSheetRecord::default()
}

pub(crate) fn generated_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date")
}

pub(crate) fn proposals() -> Vec<Proposal> {
    vec![
        Proposal {
            id: 1,
            name: "Cobertura de agua entubada".into(),
            approach: "Estado".into(),
            kind: "Porcentaje".into(),
            description: "Proporción de viviendas con agua entubada.".into(),
            objective: Some("Medir el acceso al agua".into()),
            importance: Some("Es un derecho humano".into()),
        },
        Proposal {
            id: 2,
            name: "Brecha de acceso al agua".into(),
            approach: "Impacto".into(),
            kind: "Índice".into(),
            description: "Diferencia entre zonas urbanas y rurales.".into(),
            objective: None,
            importance: None,
        },
    ]
}
