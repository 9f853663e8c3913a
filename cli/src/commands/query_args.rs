use anyhow::Result;
use clap::Subcommand;
use geoscan_core::{
    geometry::{Distance, DistanceUnit, Envelope, Point, ShapeRelation},
    query::{Operator, Query},
    record::Value,
};

/// The query to run
#[derive(Subcommand, Debug)]
pub enum QueryArgs {
    /// Records whose location lies within a bounding box
    Bbox {
        #[arg(long, allow_negative_numbers = true)]
        top: f64,
        #[arg(long, allow_negative_numbers = true)]
        left: f64,
        #[arg(long, allow_negative_numbers = true)]
        bottom: f64,
        #[arg(long, allow_negative_numbers = true)]
        right: f64,
    },

    /// Records whose location is within a given distance of a point
    Distance {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,

        /// The maximum distance, e.g. `10mi` or `2.5km`. Without a unit,
        /// the configured default unit applies.
        #[arg(long)]
        radius: String,
    },

    /// Records whose location lies within a polygon
    Polygon {
        /// A point of the polygon's ring. Repeat for at least three points.
        #[arg(
            long = "point",
            value_name = "LAT,LON",
            required = true,
            allow_hyphen_values = true
        )]
        points: Vec<Point>,
    },

    /// Records whose region relates to an envelope as given
    Shape {
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        top_left: Point,
        #[arg(long, value_name = "LAT,LON", allow_hyphen_values = true)]
        bottom_right: Point,

        /// One of `within`, `intersects`, or `disjoint`
        #[arg(long, default_value = "within")]
        relation: ShapeRelation,
    },

    /// Records with an attribute equal to the given value
    Eq { key: String, value: String },

    /// Records with an attribute greater than the given value
    Gt { key: String, value: String },

    /// Records with an attribute greater than or equal to the given value
    Gte { key: String, value: String },

    /// Records with an attribute less than the given value
    Lt { key: String, value: String },

    /// Records with an attribute less than or equal to the given value
    Lte { key: String, value: String },

    /// Records with an attribute value containing the given phrase
    Match { text: String },

    /// All records
    All,
}

/// Interprets a command line value as an integer, a float, or a string (in
/// this order)
fn parse_value(s: &str) -> Value {
    if let Ok(i) = s.parse::<i64>() {
        Value::Integer(i)
    } else if let Ok(f) = s.parse::<f64>() {
        Value::Float(f)
    } else {
        Value::String(s.to_string())
    }
}

impl QueryArgs {
    /// Converts the arguments to a validated query
    pub fn into_query(self, default_unit: DistanceUnit) -> Result<Query> {
        let comparison = |operator: Operator, key: String, value: String| {
            Query::comparison(operator, key, parse_value(&value))
        };

        Ok(match self {
            QueryArgs::Bbox {
                top,
                left,
                bottom,
                right,
            } => Query::bounding_box(top, left, bottom, right)?,
            QueryArgs::Distance { lat, lon, radius } => Query::distance(
                Point::new(lat, lon)?,
                Distance::parse_with_default(&radius, default_unit)?,
            ),
            QueryArgs::Polygon { points } => Query::polygon(points)?,
            QueryArgs::Shape {
                top_left,
                bottom_right,
                relation,
            } => Query::shape(Envelope::new(top_left, bottom_right)?, relation),
            QueryArgs::Eq { key, value } => comparison(Operator::Eq, key, value)?,
            QueryArgs::Gt { key, value } => comparison(Operator::Gt, key, value)?,
            QueryArgs::Gte { key, value } => comparison(Operator::Gte, key, value)?,
            QueryArgs::Lt { key, value } => comparison(Operator::Lt, key, value)?,
            QueryArgs::Lte { key, value } => comparison(Operator::Lte, key, value)?,
            QueryArgs::Match { text } => Query::text(text),
            QueryArgs::All => Query::All,
        })
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};
    use geoscan_core::{
        geometry::{Distance, DistanceUnit, Point},
        query::{Operator, Query},
        record::Value,
    };

    use super::{parse_value, QueryArgs};

    #[test]
    fn values() {
        assert_that!(parse_value("15")).is_equal_to(Value::Integer(15));
        assert_that!(parse_value("-2.5")).is_equal_to(Value::Float(-2.5));
        assert_that!(parse_value("John Doe")).is_equal_to(Value::from("John Doe"));
    }

    #[test]
    fn distance_with_default_unit() {
        let args = QueryArgs::Distance {
            lat: 29.976,
            lon: 31.131,
            radius: "10".to_string(),
        };
        let query = args.into_query(DistanceUnit::Miles).unwrap();
        assert_that!(query).is_equal_to(Query::distance(
            Point::new(29.976, 31.131).unwrap(),
            Distance::new(10.0, DistanceUnit::Miles).unwrap(),
        ));
    }

    #[test]
    fn comparisons() {
        let query = QueryArgs::Gte {
            key: "age".to_string(),
            value: "5".to_string(),
        }
        .into_query(DistanceUnit::default())
        .unwrap();
        assert_that!(query)
            .is_equal_to(Query::comparison(Operator::Gte, "age", 5).unwrap());

        // strings can only be compared for equality
        let r = QueryArgs::Gt {
            key: "fullName".to_string(),
            value: "John".to_string(),
        }
        .into_query(DistanceUnit::default());
        assert!(r.is_err());
    }

    #[test]
    fn malformed() {
        let r = QueryArgs::Bbox {
            top: 28.0,
            left: 30.0,
            bottom: 31.0,
            right: 32.0,
        }
        .into_query(DistanceUnit::default());
        assert!(r.is_err());

        let r = QueryArgs::Polygon {
            points: vec![Point::new(0.0, 0.0).unwrap()],
        }
        .into_query(DistanceUnit::default());
        assert!(r.is_err());
    }
}
