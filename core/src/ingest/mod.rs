//! Converts raw JSON documents into [`Record`]s

use std::io::BufRead;

use serde_json::Value as JsonValue;
use tracing::trace;
use ulid::Ulid;

use crate::{
    record::{FieldNames, Record, Value},
    Error, Result,
};

mod geo_json;

/// The document member that may carry the record identifier
pub const ID_FIELD: &str = "_id";

/// Creates records from JSON documents. Members named after the configured
/// [`FieldNames`] become the record's location and region. All other
/// scalar members become attributes.
#[derive(Debug, Clone, Default)]
pub struct Ingester {
    fields: FieldNames,
}

impl Ingester {
    pub fn new(fields: FieldNames) -> Self {
        Self { fields }
    }

    /// Parses a JSON document and converts it to a record
    pub fn ingest_str(&self, payload: &str) -> Result<Record> {
        let document = serde_json::from_str::<JsonValue>(payload)?;
        self.ingest(&document)
    }

    /// Converts a document to a record. The identifier is taken from the
    /// document's `_id` member. A new ULID is assigned if there is none.
    pub fn ingest(&self, document: &JsonValue) -> Result<Record> {
        let id = match document.get(ID_FIELD) {
            Some(JsonValue::String(s)) => s.clone(),
            Some(JsonValue::Number(n)) => n.to_string(),
            Some(other) => {
                return Err(Error::InvalidDocument(format!(
                    "identifier must be a string or a number, got `{other}'"
                )))
            }
            None => Ulid::new().to_string(),
        };
        self.ingest_with_id(id, document)
    }

    /// Converts a document to a record with the given identifier. An `_id`
    /// member in the document is ignored.
    pub fn ingest_with_id(&self, id: impl Into<String>, document: &JsonValue) -> Result<Record> {
        let members = document
            .as_object()
            .ok_or_else(|| Error::InvalidDocument("document must be a JSON object".to_string()))?;

        let mut record = Record::new(id);
        for (key, value) in members {
            if key == ID_FIELD {
                continue;
            }

            if *key == self.fields.location {
                record = record.with_location(geo_json::parse_point(value)?);
                continue;
            }

            if *key == self.fields.region {
                record = record.with_region(geo_json::parse_shape(value)?);
                continue;
            }

            let value = match value {
                JsonValue::String(s) => Value::String(s.clone()),
                JsonValue::Number(n) => match n.as_i64() {
                    Some(i) => Value::Integer(i),
                    None => match n.as_f64() {
                        Some(f) => Value::Float(f),
                        None => {
                            trace!(key = key.as_str(), %n, "skipping number out of range");
                            continue;
                        }
                    },
                },
                _ => {
                    trace!(key = key.as_str(), "skipping non-scalar member");
                    continue;
                }
            };
            record = record.with_attribute(key.clone(), value);
        }

        Ok(record)
    }

    /// Reads one JSON document per line and converts each of them to a
    /// record. Blank lines are skipped.
    pub fn load_json_lines<'a, R: BufRead + 'a>(
        &'a self,
        reader: R,
    ) -> impl Iterator<Item = Result<Record>> + 'a {
        reader
            .lines()
            .enumerate()
            .filter_map(move |(i, line)| {
                let line = match line {
                    Ok(line) => line,
                    Err(err) => return Some(Err(err.into())),
                };
                if line.trim().is_empty() {
                    return None;
                }
                Some(
                    self.ingest_str(&line)
                        .map_err(|e| Error::InvalidDocument(format!("line {}: {e}", i + 1))),
                )
            })
    }
}
