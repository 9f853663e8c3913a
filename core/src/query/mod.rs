use std::fmt::{Display, Formatter};

use crate::{
    geometry::{Distance, Envelope, Point, Polygon, Shape, ShapeRelation},
    record::Value,
    Error, Result,
};

pub use self::executor::{execute, search};

mod executor;
pub mod predicate;

/// Specifies how an attribute value should be compared to the value of a
/// [`Query::Comparison`]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    /// The values must equal
    Eq,

    /// The attribute value must be greater than the query value
    Gt,

    /// The attribute value must be greater than or equal to the query value
    Gte,

    /// The attribute value must be less than the query value
    Lt,

    /// The attribute value must be less than or equal to the query value
    Lte,
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Operator::Eq => write!(f, "="),
            Operator::Lt => write!(f, "<"),
            Operator::Gt => write!(f, ">"),
            Operator::Lte => write!(f, "<="),
            Operator::Gte => write!(f, ">="),
        }
    }
}

/// Combines other queries
#[derive(Debug, Clone, PartialEq)]
pub enum Logical {
    /// All operands must match. Matches everything if there are none.
    And(Vec<Query>),

    /// At least one operand must match. Matches everything if there are
    /// none.
    Or(Vec<Query>),

    /// The operand must not match
    Not(Box<Query>),
}

/// A query selecting records from a store. Use the constructor functions to
/// get validated parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    /// Matches every record
    All,

    /// Records whose location lies within the given corners
    BoundingBox { corners: Envelope },

    /// Records whose location is at most `radius` away from `center`
    Distance { center: Point, radius: Distance },

    /// Records whose location lies within the given ring
    Polygon { ring: Polygon },

    /// Records whose region relates to `shape` as specified
    ShapeRelation {
        shape: Shape,
        relation: ShapeRelation,
    },

    /// Records with an attribute `key` whose value compares to `value` as
    /// specified by `operator`
    Comparison {
        operator: Operator,
        key: String,
        value: Value,
    },

    /// Records with an attribute value containing the given phrase
    Match { text: String },

    Logical(Logical),
}

impl Query {
    /// Creates a bounding box query from its four bounds
    pub fn bounding_box(top: f64, left: f64, bottom: f64, right: f64) -> Result<Self> {
        Ok(Query::BoundingBox {
            corners: Envelope::from_bounds(top, left, bottom, right)?,
        })
    }

    pub fn distance(center: Point, radius: Distance) -> Self {
        Query::Distance { center, radius }
    }

    /// Creates a polygon query from the points of a ring
    pub fn polygon(points: impl IntoIterator<Item = Point>) -> Result<Self> {
        Ok(Query::Polygon {
            ring: Polygon::new(points)?,
        })
    }

    pub fn shape(shape: impl Into<Shape>, relation: ShapeRelation) -> Self {
        Query::ShapeRelation {
            shape: shape.into(),
            relation,
        }
    }

    /// Creates a comparison. String values can only be compared for
    /// equality.
    pub fn comparison(
        operator: Operator,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<Self> {
        let value = value.into();
        if matches!(value, Value::String(_)) && operator != Operator::Eq {
            return Err(Error::MalformedQuery(format!(
                "operator `{operator}' cannot be applied to string value `{value}'"
            )));
        }
        Ok(Query::Comparison {
            operator,
            key: key.into(),
            value,
        })
    }

    pub fn text(text: impl Into<String>) -> Self {
        Query::Match { text: text.into() }
    }

    pub fn and(operands: impl IntoIterator<Item = Query>) -> Self {
        Query::Logical(Logical::And(operands.into_iter().collect()))
    }

    pub fn or(operands: impl IntoIterator<Item = Query>) -> Self {
        Query::Logical(Logical::Or(operands.into_iter().collect()))
    }

    pub fn not(operand: Query) -> Self {
        Query::Logical(Logical::Not(Box::new(operand)))
    }
}

#[cfg(test)]
macro_rules! and {
    ($($x:expr),* $(,)?) => {
        $crate::query::Query::and(vec![$($x,)*])
    };
}

#[cfg(test)]
macro_rules! or {
    ($($x:expr),* $(,)?) => {
        $crate::query::Query::or(vec![$($x,)*])
    };
}

#[cfg(test)]
macro_rules! not {
    ($x:expr) => {
        $crate::query::Query::not($x)
    };
}

#[cfg(test)]
macro_rules! comparison {
    ($operator:ident, $key:expr, $value:expr) => {
        $crate::query::Query::comparison($crate::query::Operator::$operator, $key, $value)
            .unwrap()
    };
}

#[cfg(test)]
macro_rules! eq {
    ($key:expr, $value:expr) => {
        $crate::query::comparison!(Eq, $key, $value)
    };
}

#[cfg(test)]
macro_rules! gt {
    ($key:expr, $value:expr) => {
        $crate::query::comparison!(Gt, $key, $value)
    };
}

#[cfg(test)]
macro_rules! gte {
    ($key:expr, $value:expr) => {
        $crate::query::comparison!(Gte, $key, $value)
    };
}

#[cfg(test)]
macro_rules! lt {
    ($key:expr, $value:expr) => {
        $crate::query::comparison!(Lt, $key, $value)
    };
}

#[cfg(test)]
macro_rules! lte {
    ($key:expr, $value:expr) => {
        $crate::query::comparison!(Lte, $key, $value)
    };
}

#[cfg(test)]
pub(crate) use and;
#[cfg(test)]
pub(crate) use comparison;
#[cfg(test)]
pub(crate) use eq;
#[cfg(test)]
pub(crate) use gt;
#[cfg(test)]
pub(crate) use gte;
#[cfg(test)]
pub(crate) use lt;
#[cfg(test)]
pub(crate) use lte;
#[cfg(test)]
pub(crate) use not;
#[cfg(test)]
pub(crate) use or;

#[cfg(test)]
mod tests {
    use super::{Operator, Query};
    use crate::{geometry::Point, Error};

    #[test]
    fn malformed() {
        assert!(matches!(
            Query::bounding_box(28.0, 30.0, 31.0, 32.0),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            Query::polygon([
                Point::new(22.733, 68.859).unwrap(),
                Point::new(24.733, 68.859).unwrap()
            ]),
            Err(Error::MalformedQuery(_))
        ));
        assert!(matches!(
            Query::comparison(Operator::Gt, "fullName", "John"),
            Err(Error::MalformedQuery(_))
        ));
        assert!(Query::comparison(Operator::Eq, "fullName", "John").is_ok());
        assert!(Query::comparison(Operator::Gte, "age", 5).is_ok());
    }
}
