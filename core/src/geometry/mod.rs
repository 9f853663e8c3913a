//! Geometric primitives in WGS84 latitude/longitude space and the spatial
//! predicates evaluated on them

mod distance;
mod envelope;
mod point;
mod polygon;
mod relation;

pub use self::distance::{haversine_distance, Distance, DistanceUnit, EARTH_RADIUS_KM};
pub use self::envelope::{point_in_envelope, Envelope};
pub use self::point::Point;
pub use self::polygon::{point_in_polygon, Polygon};
pub use self::relation::{envelope_relation, ShapeRelation};

/// A region attached to a record or used as the operand of a shape query
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Envelope(Envelope),
    Polygon(Polygon),
}

impl From<Envelope> for Shape {
    fn from(envelope: Envelope) -> Self {
        Shape::Envelope(envelope)
    }
}

impl From<Polygon> for Shape {
    fn from(polygon: Polygon) -> Self {
        Shape::Polygon(polygon)
    }
}
