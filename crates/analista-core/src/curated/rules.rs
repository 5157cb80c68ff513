//! The ordered rule cascade.
//!
//! Each rule is an independent predicate over the question; the cascade is
//! evaluated top-to-bottom and the first rule whose trigger holds wins.
//! Order is semantically significant where triggers overlap, so the rules
//! live in a slice rather than a map.

use super::types::{CuratedQuery, VizHint};
use regex::Regex;
use serde_json::json;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Free-text supplier name following the word "proveedor" at the end of
/// the question, optional trailing question mark
static PROVIDER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)proveedor\s+([\w\s\-.]+)\??$").unwrap());

/// Question as seen by the rules: the raw text for entity extraction and
/// the lower-cased, trimmed form for phrase triggers.
pub(super) struct Question<'a> {
    pub raw: &'a str,
    pub normalized: String,
}

impl<'a> Question<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            normalized: raw.to_lowercase().trim().to_string(),
        }
    }
}

pub(super) type Rule = fn(&Question<'_>) -> Option<CuratedQuery>;

/// First match wins; do not reorder.
pub(super) const RULES: &[Rule] = &[
    ventas_ayer,
    compras_proveedor,
    sugerencia_proveedor_producto,
    agotados_ultimos_7_dias,
];

/// "¿qué se vendió ayer?" — yesterday's sales by product, revenue first.
fn ventas_ayer(q: &Question<'_>) -> Option<CuratedQuery> {
    if !(q.normalized.contains("que se vendio ayer") || q.normalized.contains("qué se vendió ayer"))
    {
        return None;
    }
    Some(CuratedQuery {
        key: "ventas_ayer".to_string(),
        sql: "\
SELECT
    nombre,
    SUM(cantidad) AS cantidad_vendida,
    SUM(total) AS total_vendido
FROM facturas
WHERE DATE(fecha) = CURRENT_DATE - INTERVAL '1 day'
GROUP BY nombre
ORDER BY total_vendido DESC"
            .to_string(),
        params: HashMap::new(),
        explanation: "Ventas de ayer por producto, ordenadas por mayor facturación.".to_string(),
        viz_hint: VizHint::Barras,
    })
}

/// "¿qué le debo comprar a proveedor tecno sas?" — purchase history for
/// one supplier, name bound as a case-insensitive substring parameter.
fn compras_proveedor(q: &Question<'_>) -> Option<CuratedQuery> {
    let name = extract_provider_name(q.raw)?;
    if !(q.normalized.contains("debo comprar") || q.normalized.contains("comprar")) {
        return None;
    }
    Some(CuratedQuery {
        key: "compras_proveedor".to_string(),
        sql: "\
SELECT
    nombre,
    SUM(cantidad) AS cantidad_comprada_hist,
    ROUND(AVG(precio)::numeric, 2) AS precio_promedio,
    SUM(total) AS total_historico
FROM facturas_proveedor
WHERE proveedor ILIKE :provider
GROUP BY nombre
ORDER BY cantidad_comprada_hist DESC"
            .to_string(),
        params: HashMap::from([("provider".to_string(), json!(format!("%{name}%")))]),
        explanation: format!("Histórico de compras al proveedor '{name}'."),
        viz_hint: VizHint::Barras,
    })
}

/// "¿a qué proveedor le debo comprar?" — latest price per product joined
/// against low-stock items; items without purchase history still appear.
fn sugerencia_proveedor_producto(q: &Question<'_>) -> Option<CuratedQuery> {
    if !(q.normalized.contains("a que proveedor le debo comprar")
        || q.normalized.contains("a qué proveedor le debo comprar"))
    {
        return None;
    }
    Some(CuratedQuery {
        key: "sugerencia_proveedor_producto".to_string(),
        sql: "\
WITH ultimos_precios AS (
    SELECT
        fp.nombre,
        fp.proveedor,
        fp.precio,
        ROW_NUMBER() OVER (PARTITION BY fp.nombre ORDER BY fp.fecha DESC) AS rn
    FROM facturas_proveedor fp
),
stock_bajo AS (
    SELECT i.nombre, i.cantidad_disponible
    FROM items i
    WHERE COALESCE(i.cantidad_disponible, 0) <= 2
)
SELECT
    s.nombre,
    s.cantidad_disponible,
    u.proveedor,
    u.precio AS ultimo_precio_compra
FROM stock_bajo s
LEFT JOIN ultimos_precios u ON u.nombre = s.nombre AND u.rn = 1
ORDER BY s.cantidad_disponible ASC, s.nombre"
            .to_string(),
        params: HashMap::new(),
        explanation:
            "Sugerencia de proveedor por producto con stock bajo usando el último precio registrado."
                .to_string(),
        viz_hint: VizHint::Barras,
    })
}

/// "¿qué productos se agotaron en los últimos 7 días?" — zero-stock items
/// with their trailing 7-day sales volume for restock urgency.
fn agotados_ultimos_7_dias(q: &Question<'_>) -> Option<CuratedQuery> {
    if !(q.normalized.contains("agotaron")
        && (q.normalized.contains("7 dias") || q.normalized.contains("7 días")))
    {
        return None;
    }
    Some(CuratedQuery {
        key: "agotados_ultimos_7_dias".to_string(),
        sql: "\
SELECT
    i.nombre,
    COALESCE(i.cantidad_disponible, 0) AS stock_actual,
    COALESCE(v.ventas_7d, 0) AS ventas_ultimos_7_dias
FROM items i
LEFT JOIN (
    SELECT nombre, SUM(cantidad) AS ventas_7d
    FROM facturas
    WHERE DATE(fecha) >= CURRENT_DATE - INTERVAL '7 day'
    GROUP BY nombre
) v ON v.nombre = i.nombre
WHERE COALESCE(i.cantidad_disponible, 0) <= 0
ORDER BY ventas_ultimos_7_dias DESC, i.nombre"
            .to_string(),
        params: HashMap::new(),
        explanation: "Productos agotados hoy con contexto de ventas de los últimos 7 días."
            .to_string(),
        viz_hint: VizHint::Barras,
    })
}

/// Capture the supplier name. An empty capture fails the trigger rather
/// than emitting a template with an unbound parameter.
fn extract_provider_name(question: &str) -> Option<String> {
    let caps = PROVIDER_NAME.captures(question)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}
