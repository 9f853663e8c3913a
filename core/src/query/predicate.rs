//! Predicate evaluators. Each one decides whether a single record matches a
//! query. A record lacking the attribute a predicate looks at never matches.

use std::cmp::Ordering;

use crate::{
    geometry::{
        envelope_relation, haversine_distance, point_in_envelope, point_in_polygon, Distance,
        Envelope, Point, Polygon, Shape, ShapeRelation,
    },
    record::{Record, Value},
};

use super::{Logical, Operator, Query};

/// Evaluates the predicate matching the query's kind
pub fn matches(query: &Query, record: &Record) -> bool {
    match query {
        Query::All => true,
        Query::BoundingBox { corners } => bounding_box(corners, record),
        Query::Distance { center, radius } => distance(center, radius, record),
        Query::Polygon { ring } => polygon(ring, record),
        Query::ShapeRelation { shape, relation } => shape_relation(shape, *relation, record),
        Query::Comparison {
            operator,
            key,
            value,
        } => comparison(*operator, key, value, record),
        Query::Match { text } => phrase(text, record),
        Query::Logical(l) => logical(l, record),
    }
}

/// Checks if the record's location lies within the given corners
pub fn bounding_box(corners: &Envelope, record: &Record) -> bool {
    record
        .location()
        .is_some_and(|p| point_in_envelope(p, corners))
}

/// Checks if the record's location is at most `radius` away from `center`
pub fn distance(center: &Point, radius: &Distance, record: &Record) -> bool {
    let max = radius.to_kilometers();
    record
        .location()
        .is_some_and(|p| haversine_distance(p, center) <= max)
}

/// Checks if the record's location lies within the given ring
pub fn polygon(ring: &Polygon, record: &Record) -> bool {
    record.location().is_some_and(|p| point_in_polygon(p, ring))
}

/// Checks if the record's region relates to the query shape as given. Only
/// envelope regions and envelope query shapes are supported, everything
/// else never matches.
pub fn shape_relation(shape: &Shape, relation: ShapeRelation, record: &Record) -> bool {
    match (record.region(), shape) {
        (Some(Shape::Envelope(region)), Shape::Envelope(query)) => {
            envelope_relation(region, query) == relation
        }
        _ => false,
    }
}

/// Compares the record's attribute `key` with `value` (see
/// [`Value::compare`]). String query values only match with
/// [`Operator::Eq`].
pub fn comparison(operator: Operator, key: &str, value: &Value, record: &Record) -> bool {
    if matches!(value, Value::String(_)) && operator != Operator::Eq {
        return false;
    }

    let Some(ordering) = record.attribute(key).and_then(|a| a.compare(value)) else {
        return false;
    };

    match operator {
        Operator::Eq => ordering == Ordering::Equal,
        Operator::Gt => ordering == Ordering::Greater,
        Operator::Gte => ordering != Ordering::Less,
        Operator::Lt => ordering == Ordering::Less,
        Operator::Lte => ordering != Ordering::Greater,
    }
}

/// Splits text into lowercase alphanumeric tokens
fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Checks if one of the record's attribute values contains the tokens of
/// `text` as a contiguous phrase. Text without tokens matches everything.
pub fn phrase(text: &str, record: &Record) -> bool {
    let needle = tokenize(text);
    if needle.is_empty() {
        return true;
    }

    record.attributes().values().any(|v| {
        tokenize(&v.to_string())
            .windows(needle.len())
            .any(|w| w == needle.as_slice())
    })
}

fn logical(logical: &Logical, record: &Record) -> bool {
    match logical {
        Logical::And(operands) => operands.iter().all(|q| matches(q, record)),
        Logical::Or(operands) => {
            operands.is_empty() || operands.iter().any(|q| matches(q, record))
        }
        Logical::Not(operand) => !matches(operand, record),
    }
}
