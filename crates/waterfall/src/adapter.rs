//! Data Adapter: host rows to typed `(zone, delta)` pairs.
//!
//! Every row produces exactly one pair, in host order. Cells that are
//! absent or unreadable take their default and leave a
//! [`Diagnostic::MalformedValue`] behind. A delta that would carry the
//! running total past [`VALUE_LIMIT`] is zeroed with a
//! [`Diagnostic::OutOfRange`]. Nothing here fails.

use serde::Serialize;
use serde_json::Value;

use super::error::{Diagnostic, Field};
use super::table::HostRow;

/// Zone label used when a row has no dimension value.
pub const EMPTY_ZONE: &str = "(vide)";

/// Largest magnitude the running total may reach. Keeps the niced value
/// domain and every mapped coordinate finite.
pub const VALUE_LIMIT: f64 = 1e300;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDelta {
    pub zone: String,
    pub delta: f64,
}

impl ZoneDelta {
    pub fn new(zone: impl Into<String>, delta: f64) -> Self {
        Self { zone: zone.into(), delta }
    }
}

/// Adapted rows, or the signal that there is nothing to draw.
#[derive(Debug, Clone, PartialEq)]
pub enum Adapted {
    NoData,
    Rows {
        pairs: Vec<ZoneDelta>,
        diagnostics: Vec<Diagnostic>,
    },
}

impl Adapted {
    pub fn pairs(&self) -> &[ZoneDelta] {
        match self {
            Adapted::NoData => &[],
            Adapted::Rows { pairs, .. } => pairs,
        }
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        match self {
            Adapted::NoData => vec![Diagnostic::MissingData],
            Adapted::Rows { diagnostics, .. } => diagnostics.clone(),
        }
    }
}

/// Normalizes a host table. `None` and an empty table both mean no data.
pub fn adapt(table: Option<&[HostRow]>) -> Adapted {
    let rows = match table {
        Some(rows) if !rows.is_empty() => rows,
        _ => return Adapted::NoData,
    };
    let mut diagnostics = Vec::new();
    let mut pairs = Vec::with_capacity(rows.len());
    let mut running = 0.0_f64;
    for (index, row) in rows.iter().enumerate() {
        let mut pair = normalize_row(index, row, &mut diagnostics);
        let next = running + pair.delta;
        if next.abs() > VALUE_LIMIT {
            diagnostics.push(Diagnostic::OutOfRange { row: index, delta: pair.delta });
            pair.delta = 0.0;
        } else {
            running = next;
        }
        pairs.push(pair);
    }
    for diagnostic in &diagnostics {
        log::warn!("{diagnostic}");
    }
    Adapted::Rows { pairs, diagnostics }
}

fn normalize_row(index: usize, row: &HostRow, diagnostics: &mut Vec<Diagnostic>) -> ZoneDelta {
    let zone = match read_zone(row.zone_cell()) {
        Some(zone) => zone,
        None => {
            diagnostics.push(Diagnostic::MalformedValue {
                row: index,
                field: Field::Dimension,
                raw: None,
            });
            EMPTY_ZONE.to_string()
        }
    };
    let delta = match read_delta(row.delta_cell()) {
        Ok(delta) => delta,
        Err(raw) => {
            diagnostics.push(Diagnostic::MalformedValue {
                row: index,
                field: Field::Metric,
                raw,
            });
            0.0
        }
    };
    ZoneDelta { zone, delta }
}

/// Zone text, `None` when the dimension is absent or null.
fn read_zone(cell: Option<&Value>) -> Option<String> {
    match cell? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

/// Delta value. `Err` carries the raw text of an unusable cell
/// (`None` when the cell is absent).
fn read_delta(cell: Option<&Value>) -> Result<f64, Option<String>> {
    let cell = cell.ok_or(None)?;
    let number = match cell {
        Value::Null => Some(0.0),
        Value::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
        Value::Number(number) => number.as_f64(),
        Value::String(text) => coerce_number(text),
        Value::Array(_) | Value::Object(_) => None,
    };
    match number {
        Some(number) if number.is_finite() => Ok(number),
        _ => Err(Some(raw_text(cell))),
    }
}

fn raw_text(cell: &Value) -> String {
    match cell {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Reads numeric text the way a loosely typed host would: surrounding
/// whitespace is ignored, blank text is zero, decimal literals take an
/// optional sign and exponent, and `0x`/`0o`/`0b` integers are unsigned.
pub fn coerce_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    for (prefix, radix) in [("0x", 16), ("0o", 8), ("0b", 2)] {
        let lower = text.get(..2).map(str::to_ascii_lowercase);
        if lower.as_deref() == Some(prefix) {
            return parse_radix(&text[2..], radix);
        }
    }
    if text.strip_prefix(['+', '-']).unwrap_or(text) == "Infinity" {
        return Some(if text.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY });
    }
    let is_decimal_literal = text.chars().any(|ch| ch.is_ascii_digit())
        && text
            .chars()
            .all(|ch| ch.is_ascii_digit() || matches!(ch, '.' | 'e' | 'E' | '+' | '-'));
    if !is_decimal_literal {
        return None;
    }
    text.parse::<f64>().ok()
}

fn parse_radix(digits: &str, radix: u32) -> Option<f64> {
    if digits.is_empty() {
        return None;
    }
    digits.chars().try_fold(0.0_f64, |acc, ch| {
        ch.to_digit(radix).map(|digit| acc * f64::from(radix) + f64::from(digit))
    })
}
