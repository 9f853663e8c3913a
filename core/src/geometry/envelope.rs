use geo::{coord, Rect};

use super::Point;
use crate::{Error, Result};

/// An axis-aligned rectangle in latitude/longitude space. Envelopes crossing
/// the antimeridian are not supported.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    rect: Rect,
}

impl Envelope {
    /// Creates an envelope from its top left and bottom right corners
    pub fn new(top_left: Point, bottom_right: Point) -> Result<Self> {
        if top_left.latitude() < bottom_right.latitude() {
            return Err(Error::MalformedQuery(format!(
                "top latitude {} is below bottom latitude {}",
                top_left.latitude(),
                bottom_right.latitude()
            )));
        }
        if top_left.longitude() > bottom_right.longitude() {
            return Err(Error::MalformedQuery(format!(
                "left longitude {} is east of right longitude {} (envelopes \
                crossing the antimeridian are not supported)",
                top_left.longitude(),
                bottom_right.longitude()
            )));
        }
        Ok(Self {
            rect: Rect::new(top_left.coord(), bottom_right.coord()),
        })
    }

    /// Creates an envelope from its four bounds, in the order used by
    /// bounding box queries: top, left, bottom, right
    pub fn from_bounds(top: f64, left: f64, bottom: f64, right: f64) -> Result<Self> {
        Self::new(Point::new(top, left)?, Point::new(bottom, right)?)
    }

    /// Wraps a rectangle whose corners are valid coordinates
    pub(crate) fn from_rect(rect: Rect) -> Self {
        Self { rect }
    }

    pub fn top(&self) -> f64 {
        self.rect.max().y
    }

    pub fn bottom(&self) -> f64 {
        self.rect.min().y
    }

    pub fn left(&self) -> f64 {
        self.rect.min().x
    }

    pub fn right(&self) -> f64 {
        self.rect.max().x
    }

    pub fn top_left(&self) -> Point {
        Point::new_unchecked(self.top(), self.left())
    }

    pub fn bottom_right(&self) -> Point {
        Point::new_unchecked(self.bottom(), self.right())
    }

    /// Creates a degenerate envelope covering exactly one point
    pub fn from_point(p: Point) -> Self {
        let c = coord! { x: p.longitude(), y: p.latitude() };
        Self {
            rect: Rect::new(c, c),
        }
    }
}

/// Checks if the point lies within the envelope. All four bounds are
/// inclusive.
pub fn point_in_envelope(p: &Point, e: &Envelope) -> bool {
    p.latitude() >= e.bottom()
        && p.latitude() <= e.top()
        && p.longitude() >= e.left()
        && p.longitude() <= e.right()
}
