use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use geo::{coord, Coord};

use crate::{Error, Result};

/// A position on the earth given in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    latitude: f64,
    longitude: f64,
}

impl Point {
    /// Creates a new point. Fails if the latitude is not within `[-90, 90]`
    /// or the longitude is not within `[-180, 180]`.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(Error::InvalidCoordinate {
                latitude,
                longitude,
            });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Creates a point from coordinates that are known to be in range
    pub(crate) fn new_unchecked(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Converts the point to a `geo` coordinate (x is the longitude, y the
    /// latitude)
    pub(crate) fn coord(&self) -> Coord {
        coord! { x: self.longitude, y: self.latitude }
    }
}

/// Parses `"latitude,longitude"`
impl FromStr for Point {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| Error::InvalidPoint(s.to_string()))?;
        let lat = lat
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidPoint(s.to_string()))?;
        let lon = lon
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidPoint(s.to_string()))?;
        Point::new(lat, lon)
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use assertor::{assert_that, EqualityAssertion};

    use super::Point;
    use crate::Error;

    #[test]
    fn range() {
        assert!(Point::new(90.0, 180.0).is_ok());
        assert!(Point::new(-90.0, -180.0).is_ok());
        assert!(Point::new(90.1, 0.0).is_err());
        assert!(Point::new(0.0, -180.5).is_err());
        assert!(Point::new(f64::NAN, 0.0).is_err());
        assert!(Point::new(0.0, f64::INFINITY).is_err());
    }

    #[test]
    fn parse() {
        let p: Point = "29.976480, 31.131302".parse().unwrap();
        assert_that!(p.latitude()).is_equal_to(29.976480);
        assert_that!(p.longitude()).is_equal_to(31.131302);
        assert_that!(p.to_string()).is_equal_to("29.97648,31.131302".to_string());

        assert!(matches!(
            "29.9".parse::<Point>(),
            Err(Error::InvalidPoint(_))
        ));
        assert!(matches!(
            "north,east".parse::<Point>(),
            Err(Error::InvalidPoint(_))
        ));
        assert!(matches!(
            "100,0".parse::<Point>(),
            Err(Error::InvalidCoordinate { .. })
        ));
    }
}
