//! Value types produced by the curated query router.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;

/// A hand-vetted, parameterized query answering a known business question.
///
/// Constructed fresh per matched question, never mutated. Bound values
/// travel in `params` and reach the database through the driver's
/// parameter-binding mechanism, never through string formatting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CuratedQuery {
    /// Stable identifier of the rule that fired, for logs and telemetry
    pub key: String,
    /// Parameterized SQL template with named bind markers
    pub sql: String,
    /// Bind-marker name to bound value
    pub params: HashMap<String, Value>,
    /// Human-readable description, shown verbatim to the user
    pub explanation: String,
    /// Advisory visualization category for the rendering layer
    pub viz_hint: VizHint,
}

/// Suggested visualization category.
///
/// Wire names follow the rendering contract of the analyst frontend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VizHint {
    #[serde(rename = "GRAFICO_LINEA")]
    Linea,
    #[serde(rename = "GRAFICO_BARRAS")]
    Barras,
    #[serde(rename = "GRAFICO_TORTA")]
    Torta,
    #[serde(rename = "GRAFICO_SCATTER")]
    Scatter,
    #[serde(rename = "GRAFICO_HISTOGRAMA")]
    Histograma,
    #[serde(rename = "TABLA")]
    Tabla,
}

impl VizHint {
    /// The wire name consumed by the rendering layer
    pub fn as_str(&self) -> &'static str {
        match self {
            VizHint::Linea => "GRAFICO_LINEA",
            VizHint::Barras => "GRAFICO_BARRAS",
            VizHint::Torta => "GRAFICO_TORTA",
            VizHint::Scatter => "GRAFICO_SCATTER",
            VizHint::Histograma => "GRAFICO_HISTOGRAMA",
            VizHint::Tabla => "TABLA",
        }
    }
}

impl fmt::Display for VizHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viz_hint_wire_names() {
        assert_eq!(VizHint::Barras.as_str(), "GRAFICO_BARRAS");
        assert_eq!(VizHint::Tabla.to_string(), "TABLA");
        assert_eq!(
            serde_json::to_string(&VizHint::Linea).unwrap(),
            "\"GRAFICO_LINEA\""
        );
    }

    #[test]
    fn test_viz_hint_deserializes_from_wire_name() {
        let hint: VizHint = serde_json::from_str("\"GRAFICO_HISTOGRAMA\"").unwrap();
        assert_eq!(hint, VizHint::Histograma);
    }
}
