//! Translates queries into the JSON query DSL of a remote search engine and
//! extracts matching identifiers from its responses

use itertools::Itertools;
use serde_json::{json, Map, Value as JsonValue};

use crate::{
    geometry::{Distance, Envelope, Point, Polygon, Shape, ShapeRelation},
    query::{Logical, Operator, Query},
    record::{FieldNames, Value},
    Error, Result,
};

/// Converts [`Query`] objects into remote search requests
pub struct QueryTranslator<'a> {
    fields: &'a FieldNames,
}

impl<'a> QueryTranslator<'a> {
    pub fn new(fields: &'a FieldNames) -> Self {
        Self { fields }
    }

    /// Wraps the translated query into a search request returning at most
    /// `size` hits
    pub fn search_request(&self, query: &Query, size: usize) -> JsonValue {
        json!({
            "size": size,
            "_source": false,
            "query": self.translate(query),
        })
    }

    /// Translates a query into a query clause
    pub fn translate(&self, query: &Query) -> JsonValue {
        match query {
            Query::All => Self::match_all(),
            Query::BoundingBox { corners } => self.translate_bbox(corners),
            Query::Distance { center, radius } => self.translate_distance(center, radius),
            Query::Polygon { ring } => self.translate_polygon(ring),
            Query::ShapeRelation { shape, relation } => self.translate_shape(shape, *relation),
            Query::Comparison {
                operator,
                key,
                value,
            } => Self::translate_comparison(*operator, key, value),
            Query::Match { text } => json!({
                "multi_match": {
                    "query": text,
                    "type": "phrase",
                    "fields": ["*"],
                }
            }),
            Query::Logical(l) => self.translate_logical(l),
        }
    }

    fn match_all() -> JsonValue {
        json!({ "match_all": {} })
    }

    fn lat_lon(p: &Point) -> JsonValue {
        json!({ "lat": p.latitude(), "lon": p.longitude() })
    }

    /// Wraps `body` into an object keyed by the given field name
    fn field(name: &str, body: JsonValue) -> JsonValue {
        let mut m = Map::new();
        m.insert(name.to_string(), body);
        JsonValue::Object(m)
    }

    fn translate_bbox(&self, corners: &Envelope) -> JsonValue {
        json!({
            "geo_bounding_box": Self::field(&self.fields.location, json!({
                "top_left": Self::lat_lon(&corners.top_left()),
                "bottom_right": Self::lat_lon(&corners.bottom_right()),
            }))
        })
    }

    fn translate_distance(&self, center: &Point, radius: &Distance) -> JsonValue {
        let mut body = Map::new();
        body.insert("distance".to_string(), json!(radius.to_string()));
        body.insert(self.fields.location.clone(), Self::lat_lon(center));
        json!({ "geo_distance": body })
    }

    fn translate_polygon(&self, ring: &Polygon) -> JsonValue {
        let points = ring.points().iter().map(Self::lat_lon).collect::<Vec<_>>();
        json!({
            "geo_polygon": Self::field(&self.fields.location, json!({ "points": points }))
        })
    }

    /// Converts a shape to its GeoJSON-style representation with
    /// `[longitude, latitude]` coordinates
    fn shape_to_json(shape: &Shape) -> JsonValue {
        match shape {
            Shape::Envelope(e) => json!({
                "type": "envelope",
                "coordinates": [[e.left(), e.top()], [e.right(), e.bottom()]],
            }),
            Shape::Polygon(p) => {
                // close the ring explicitly
                let ring = p
                    .points()
                    .iter()
                    .chain(p.points().first())
                    .map(|p| json!([p.longitude(), p.latitude()]))
                    .collect::<Vec<_>>();
                json!({
                    "type": "polygon",
                    "coordinates": [ring],
                })
            }
        }
    }

    fn translate_shape(&self, shape: &Shape, relation: ShapeRelation) -> JsonValue {
        json!({
            "geo_shape": Self::field(&self.fields.region, json!({
                "shape": Self::shape_to_json(shape),
                "relation": relation.to_string(),
            }))
        })
    }

    fn translate_comparison(operator: Operator, key: &str, value: &Value) -> JsonValue {
        let range_op = match operator {
            Operator::Eq => return json!({ "term": Self::field(key, json!(value)) }),
            Operator::Gt => "gt",
            Operator::Gte => "gte",
            Operator::Lt => "lt",
            Operator::Lte => "lte",
        };
        json!({ "range": Self::field(key, Self::field(range_op, json!(value))) })
    }

    /// Combines operands with the given boolean occurrence. Empty lists
    /// match everything and single operands are returned as they are.
    fn translate_operands(&self, operands: &[Query], occur: &str) -> JsonValue {
        let mut clauses = operands.iter().map(|q| self.translate(q)).collect_vec();
        match clauses.len() {
            0 => Self::match_all(),
            1 => clauses.remove(0),
            _ => json!({ "bool": Self::field(occur, JsonValue::Array(clauses)) }),
        }
    }

    fn translate_logical(&self, logical: &Logical) -> JsonValue {
        match logical {
            Logical::And(operands) => self.translate_operands(operands, "must"),
            Logical::Or(operands) => self.translate_operands(operands, "should"),
            Logical::Not(operand) => json!({
                "bool": {
                    // return all other documents that don't match the query
                    "must": [Self::match_all()],
                    "must_not": [self.translate(operand)],
                }
            }),
        }
    }
}

/// Extracts the identifiers of all hits from a search response, in the order
/// of the response
pub fn parse_hits(response: &JsonValue) -> Result<Vec<String>> {
    let hits = response
        .pointer("/hits/hits")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| Error::InvalidResponse("response does not contain `hits.hits'".into()))?;

    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            hit.get("_id")
                .and_then(JsonValue::as_str)
                .map(str::to_string)
                .ok_or_else(|| Error::InvalidResponse(format!("hit {i} does not have an `_id'")))
        })
        .collect()
}
