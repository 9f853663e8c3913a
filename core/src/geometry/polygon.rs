use itertools::Itertools;

use super::{point_in_envelope, Envelope, Point};
use crate::{util::extend_rect::bounding_rect, Error, Result};

/// Tolerance (in squared degrees) within which a point counts as lying on a
/// polygon edge
const EDGE_EPSILON: f64 = 1e-12;

/// A closed ring of at least three points. The last point is implicitly
/// connected to the first one.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    points: Vec<Point>,
    envelope: Envelope,
}

impl Polygon {
    /// Creates a new polygon. An explicitly closed ring (whose last point
    /// equals the first one) is accepted. Fails if the ring has fewer than
    /// three points or if two consecutive points are identical.
    pub fn new(points: impl IntoIterator<Item = Point>) -> Result<Self> {
        let mut points = points.into_iter().collect::<Vec<_>>();
        if points.len() > 3 && points.first() == points.last() {
            points.pop();
        }

        if points.len() < 3 {
            return Err(Error::MalformedQuery(format!(
                "a polygon needs at least 3 points, got {}",
                points.len()
            )));
        }

        if let Some((i, _)) = points
            .iter()
            .circular_tuple_windows::<(_, _)>()
            .find_position(|(a, b)| a == b)
        {
            return Err(Error::MalformedQuery(format!(
                "polygon contains duplicate consecutive point {} at position {}",
                points[i], i
            )));
        }

        let rect = bounding_rect(points.iter().map(Point::coord)).ok_or_else(|| {
            Error::MalformedQuery("unable to compute polygon envelope".to_string())
        })?;

        Ok(Self {
            points,
            envelope: Envelope::from_rect(rect),
        })
    }

    /// The points of the ring without a closing point
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// The smallest envelope covering the polygon
    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Iterates over the edges of the ring, including the closing one
    fn edges(&self) -> impl Iterator<Item = (&Point, &Point)> {
        self.points.iter().circular_tuple_windows::<(_, _)>()
    }
}

/// Checks if `p` lies on the segment from `a` to `b`
fn on_segment(p: &Point, a: &Point, b: &Point) -> bool {
    let (px, py) = (p.longitude(), p.latitude());
    let (ax, ay) = (a.longitude(), a.latitude());
    let (bx, by) = (b.longitude(), b.latitude());

    let cross = (bx - ax) * (py - ay) - (by - ay) * (px - ax);
    if cross.abs() > EDGE_EPSILON {
        return false;
    }

    px >= ax.min(bx) && px <= ax.max(bx) && py >= ay.min(by) && py <= ay.max(by)
}

/// Checks if the point lies inside the polygon using ray casting (even-odd
/// rule). Points exactly on an edge or a vertex are considered inside.
pub fn point_in_polygon(p: &Point, ring: &Polygon) -> bool {
    if !point_in_envelope(p, ring.envelope()) {
        return false;
    }

    if ring.edges().any(|(a, b)| on_segment(p, a, b)) {
        return true;
    }

    let (x, y) = (p.longitude(), p.latitude());
    let mut inside = false;
    for (a, b) in ring.edges() {
        let (xa, ya) = (a.longitude(), a.latitude());
        let (xb, yb) = (b.longitude(), b.latitude());
        if (ya > y) != (yb > y) && x < (xb - xa) * (y - ya) / (yb - ya) + xa {
            inside = !inside;
        }
    }
    inside
}
