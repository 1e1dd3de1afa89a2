//! Diagnostics and boundary errors.
//!
//! Nothing the chart encounters while rendering is fatal: missing tables,
//! malformed cells and zero-size containers are recovered on the spot and
//! reported as [`Diagnostic`]s. [`ChartError`] only exists at the edges
//! where a raw host payload has to be decoded.

use std::fmt;

use serde::Serialize;

/// Which cell of a host row a diagnostic refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Dimension,
    Metric,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Dimension => write!(f, "dimension"),
            Field::Metric => write!(f, "metric"),
        }
    }
}

/// A recovered problem, reported alongside a render.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// The table is absent or has no rows. A placeholder is shown instead.
    MissingData,
    /// A cell was absent or could not be read and was replaced by its
    /// default (`(vide)` for a zone, `0` for a delta).
    MalformedValue {
        row: usize,
        field: Field,
        /// Raw cell text, `None` when the cell was absent.
        raw: Option<String>,
    },
    /// A delta would have pushed the running total past
    /// [`VALUE_LIMIT`](crate::adapter::VALUE_LIMIT) and was replaced by `0`.
    OutOfRange { row: usize, delta: f64 },
    /// The container reported a zero size on at least one axis and the
    /// default size was used for it.
    LayoutDegenerate { width: f64, height: f64 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::MissingData => write!(f, "no data to draw"),
            Diagnostic::MalformedValue { row, field, raw: Some(raw) } => {
                write!(f, "row {row}: unreadable {field} value '{raw}', using default")
            }
            Diagnostic::MalformedValue { row, field, raw: None } => {
                write!(f, "row {row}: missing {field} value, using default")
            }
            Diagnostic::OutOfRange { row, delta } => {
                write!(f, "row {row}: delta {delta:e} takes the running total out of range, using 0")
            }
            Diagnostic::LayoutDegenerate { width, height } => {
                write!(f, "container reports {width}x{height}, using default size")
            }
        }
    }
}

/// Failure to decode a host payload.
#[derive(Debug)]
pub enum ChartError {
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for ChartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChartError::InvalidPayload(error) => write!(f, "invalid host payload: {error}"),
        }
    }
}

impl std::error::Error for ChartError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChartError::InvalidPayload(error) => Some(error),
        }
    }
}

impl From<serde_json::Error> for ChartError {
    fn from(error: serde_json::Error) -> Self {
        ChartError::InvalidPayload(error)
    }
}
