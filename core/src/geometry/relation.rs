use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use super::Envelope;
use crate::{Error, Result};

/// Topological relation between two regions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeRelation {
    /// The first region lies completely inside the second one
    Within,

    /// The regions share at least one point but the first one is not
    /// completely inside the second one
    Intersects,

    /// The regions do not share any point
    Disjoint,
}

impl FromStr for ShapeRelation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "within" => Ok(ShapeRelation::Within),
            "intersects" => Ok(ShapeRelation::Intersects),
            "disjoint" => Ok(ShapeRelation::Disjoint),
            _ => Err(Error::MalformedQuery(format!("unknown shape relation `{s}'"))),
        }
    }
}

impl Display for ShapeRelation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeRelation::Within => write!(f, "within"),
            ShapeRelation::Intersects => write!(f, "intersects"),
            ShapeRelation::Disjoint => write!(f, "disjoint"),
        }
    }
}

/// Determines how envelope `a` relates to envelope `b`. Bounds are
/// inclusive, so every envelope is within itself and envelopes touching
/// along an edge intersect.
pub fn envelope_relation(a: &Envelope, b: &Envelope) -> ShapeRelation {
    if a.left() >= b.left()
        && a.right() <= b.right()
        && a.bottom() >= b.bottom()
        && a.top() <= b.top()
    {
        ShapeRelation::Within
    } else if a.right() < b.left()
        || a.left() > b.right()
        || a.top() < b.bottom()
        || a.bottom() > b.top()
    {
        ShapeRelation::Disjoint
    } else {
        ShapeRelation::Intersects
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{envelope_relation, ShapeRelation};
    use crate::geometry::Envelope;

    fn env(top: f64, left: f64, bottom: f64, right: f64) -> Envelope {
        Envelope::from_bounds(top, left, bottom, right).unwrap()
    }

    #[test]
    fn agra() {
        let region = env(30.2, 75.0, 25.0, 80.1);
        let query = env(31.2, 74.0, 24.0, 81.1);
        assert_that!(envelope_relation(&region, &query)).is_equal_to(ShapeRelation::Within);
        assert_that!(envelope_relation(&query, &region)).is_equal_to(ShapeRelation::Intersects);
    }

    #[test]
    fn self_containment() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let bottom = rng.gen_range(-90.0..90.0);
            let top = rng.gen_range(bottom..=90.0);
            let left = rng.gen_range(-180.0..180.0);
            let right = rng.gen_range(left..=180.0);
            let e = env(top, left, bottom, right);
            assert_that!(envelope_relation(&e, &e)).is_equal_to(ShapeRelation::Within);
        }
    }

    #[test]
    fn overlap() {
        let a = env(10.0, 0.0, 0.0, 10.0);
        let b = env(15.0, 5.0, 5.0, 15.0);
        assert_that!(envelope_relation(&a, &b)).is_equal_to(ShapeRelation::Intersects);
        assert_that!(envelope_relation(&b, &a)).is_equal_to(ShapeRelation::Intersects);

        // touching edges
        let c = env(10.0, 10.0, 0.0, 20.0);
        assert_that!(envelope_relation(&a, &c)).is_equal_to(ShapeRelation::Intersects);
    }

    #[test]
    fn disjoint() {
        let a = env(10.0, 0.0, 0.0, 10.0);
        assert_that!(envelope_relation(&a, &env(10.0, 10.5, 0.0, 20.0)))
            .is_equal_to(ShapeRelation::Disjoint);
        assert_that!(envelope_relation(&a, &env(-1.0, 0.0, -5.0, 10.0)))
            .is_equal_to(ShapeRelation::Disjoint);
        assert_that!(envelope_relation(&a, &env(30.0, -20.0, 20.0, -10.0)))
            .is_equal_to(ShapeRelation::Disjoint);
    }

    #[test]
    fn parse() {
        assert_that!("WITHIN".parse::<ShapeRelation>().unwrap())
            .is_equal_to(ShapeRelation::Within);
        assert_that!(" intersects".parse::<ShapeRelation>().unwrap())
            .is_equal_to(ShapeRelation::Intersects);
        assert_that!(ShapeRelation::Disjoint.to_string()).is_equal_to("disjoint".to_string());
        assert!("contains".parse::<ShapeRelation>().is_err());
    }
}
