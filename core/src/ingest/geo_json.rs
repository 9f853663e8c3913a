use serde_json::Value as JsonValue;

use crate::{
    geometry::{Envelope, Point, Polygon, Shape},
    Error, Result,
};

fn invalid(msg: impl Into<String>) -> Error {
    Error::InvalidDocument(msg.into())
}

/// Parses a `[longitude, latitude]` coordinate pair
fn lon_lat(value: &JsonValue) -> Result<Point> {
    match value.as_array().map(Vec::as_slice) {
        Some([lon, lat]) => {
            let lon = lon
                .as_f64()
                .ok_or_else(|| invalid(format!("longitude `{lon}' is not a number")))?;
            let lat = lat
                .as_f64()
                .ok_or_else(|| invalid(format!("latitude `{lat}' is not a number")))?;
            Point::new(lat, lon)
        }
        _ => Err(invalid(format!(
            "expected a [longitude, latitude] pair, got `{value}'"
        ))),
    }
}

/// Parses a point given as `[lon, lat]`, `{"lat": .., "lon": ..}`, or
/// `"lat,lon"`
pub(super) fn parse_point(value: &JsonValue) -> Result<Point> {
    match value {
        JsonValue::Array(_) => lon_lat(value),

        JsonValue::Object(o) => {
            let lat = o.get("lat").and_then(JsonValue::as_f64);
            let lon = o.get("lon").and_then(JsonValue::as_f64);
            match (lat, lon) {
                (Some(lat), Some(lon)) => Point::new(lat, lon),
                _ => Err(invalid(format!(
                    "point object requires numeric `lat' and `lon', got `{value}'"
                ))),
            }
        }

        JsonValue::String(s) => s.parse(),

        _ => Err(invalid(format!("unsupported point `{value}'"))),
    }
}

/// Parses an envelope or a polygon given in GeoJSON style:
/// `{"type": "envelope", "coordinates": [[minLon, maxLat], [maxLon, minLat]]}`
/// or `{"type": "polygon", "coordinates": [[[lon, lat], ...]]}`
pub(super) fn parse_shape(value: &JsonValue) -> Result<Shape> {
    let shape_type = value
        .get("type")
        .and_then(JsonValue::as_str)
        .ok_or_else(|| invalid(format!("shape without type: `{value}'")))?;
    let coordinates = value
        .get("coordinates")
        .and_then(JsonValue::as_array)
        .ok_or_else(|| invalid(format!("shape without coordinates: `{value}'")))?;

    match shape_type.to_ascii_lowercase().as_str() {
        "envelope" => match coordinates.as_slice() {
            [top_left, bottom_right] => {
                let envelope = Envelope::new(lon_lat(top_left)?, lon_lat(bottom_right)?)
                    .map_err(|e| invalid(e.to_string()))?;
                Ok(Shape::Envelope(envelope))
            }
            _ => Err(invalid("an envelope requires exactly two corners")),
        },

        "polygon" => match coordinates.as_slice() {
            [ring] => {
                let points = ring
                    .as_array()
                    .ok_or_else(|| invalid("polygon ring must be an array"))?
                    .iter()
                    .map(lon_lat)
                    .collect::<Result<Vec<_>>>()?;
                let polygon = Polygon::new(points).map_err(|e| invalid(e.to_string()))?;
                Ok(Shape::Polygon(polygon))
            }
            [] => Err(invalid("polygon without a ring")),
            _ => Err(invalid("polygons with holes are not supported")),
        },

        _ => Err(invalid(format!("unsupported shape type `{shape_type}'"))),
    }
}
