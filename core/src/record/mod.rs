//! Records are the indexed documents a query is evaluated against

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::geometry::{Point, Shape};

pub use self::value::Value;

pub mod value;

/// Names of the document members holding a record's geo attributes. Used
/// both when ingesting documents and when translating queries for a remote
/// search engine.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FieldNames {
    /// The member holding a point
    pub location: String,

    /// The member holding a shape
    pub region: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            location: "location".to_string(),
            region: "region".to_string(),
        }
    }
}

/// An indexed document with an identifier, optional geo attributes, and
/// arbitrary named attribute values
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    id: String,
    location: Option<Point>,
    region: Option<Shape>,
    attributes: BTreeMap<String, Value>,
}

impl Record {
    /// Creates a record without any attributes. It has to get a location or
    /// a region before it can be put into a store.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            location: None,
            region: None,
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_location(mut self, location: Point) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_region(mut self, region: impl Into<Shape>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn into_id(self) -> String {
        self.id
    }

    pub fn location(&self) -> Option<&Point> {
        self.location.as_ref()
    }

    pub fn region(&self) -> Option<&Shape> {
        self.region.as_ref()
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    pub fn attributes(&self) -> &BTreeMap<String, Value> {
        &self.attributes
    }

    /// A record can only be indexed if it has at least one geo attribute
    pub fn is_indexable(&self) -> bool {
        self.location.is_some() || self.region.is_some()
    }
}
