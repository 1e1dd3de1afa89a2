//! Host table model.
//!
//! The dashboard host delivers a full payload on every data change. Only
//! the table named [`DEFAULT_TABLE`] is drawn; inside it each row carries
//! ordered dimension and metric lists of loosely typed cells.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::error::ChartError;

pub const DEFAULT_TABLE: &str = "DEFAULT";

/// One raw row. Only the first dimension and the first metric are read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostRow {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub dimension: Vec<Value>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub metric: Vec<Value>,
}

impl HostRow {
    pub fn new(dimension: Vec<Value>, metric: Vec<Value>) -> Self {
        Self { dimension, metric }
    }

    pub fn zone_cell(&self) -> Option<&Value> {
        self.dimension.first()
    }

    pub fn delta_cell(&self) -> Option<&Value> {
        self.metric.first()
    }
}

/// A full host payload. Fields other than `tables` are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HostData {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tables: BTreeMap<String, Vec<HostRow>>,
}

impl HostData {
    pub fn from_rows(rows: Vec<HostRow>) -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(DEFAULT_TABLE.to_string(), rows);
        Self { tables }
    }

    /// The drawn table, `None` when the host did not send one.
    pub fn default_table(&self) -> Option<&[HostRow]> {
        self.tables.get(DEFAULT_TABLE).map(Vec::as_slice)
    }

    pub fn from_json(json: &str) -> Result<Self, ChartError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decodes a payload that was already converted to a JSON value.
    pub fn from_value(value: Value) -> Result<Self, ChartError> {
        Ok(serde_json::from_value(value)?)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Document {
    Rows(Vec<HostRow>),
    Payload(HostData),
}

/// Reads either a full host payload or a bare array of rows.
pub fn parse_document(json: &str) -> Result<HostData, ChartError> {
    let document: Document = serde_json::from_str(json)?;
    Ok(match document {
        Document::Rows(rows) => HostData::from_rows(rows),
        Document::Payload(data) => data,
    })
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_default_table_and_ignores_other_fields() {
        let data = HostData::from_json(
            r#"{
                "fields": {"dimID": []},
                "style": {},
                "tables": {"DEFAULT": [{"dimension": ["North"], "metric": [100]}]}
            }"#,
        )
        .unwrap();
        let table = data.default_table().unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].zone_cell(), Some(&json!("North")));
        assert_eq!(table[0].delta_cell(), Some(&json!(100)));
    }

    #[test]
    fn missing_pieces_become_empty() {
        let data = HostData::from_json(r#"{"tables": null}"#).unwrap();
        assert!(data.default_table().is_none());

        let data = HostData::from_json(r#"{"tables": {"DEFAULT": [{"metric": null}]}}"#).unwrap();
        let row = &data.default_table().unwrap()[0];
        assert!(row.zone_cell().is_none());
        assert!(row.delta_cell().is_none());
    }

    #[test]
    fn document_accepts_bare_rows() {
        let data = parse_document(r#"[{"dimension": ["A"], "metric": ["3"]}]"#).unwrap();
        assert_eq!(data.default_table().unwrap().len(), 1);

        let data = parse_document(r#"{"tables": {"DEFAULT": []}}"#).unwrap();
        assert_eq!(data.default_table(), Some(&[][..]));
    }

    #[test]
    fn decodes_converted_values() {
        let value = json!({"tables": {"DEFAULT": [{"dimension": ["A"], "metric": [1.5]}]}});
        let data = HostData::from_value(value).unwrap();
        assert_eq!(data.default_table().unwrap()[0].delta_cell(), Some(&json!(1.5)));

        assert!(HostData::from_value(json!({"tables": {"DEFAULT": 7}})).is_err());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(parse_document("[{").is_err());
        assert!(HostData::from_json("42").is_err());
    }
}
