use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::Deserialize;

use super::Point;
use crate::{Error, Result};

/// Mean earth radius used for great-circle distances
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Computes the great-circle distance between two points in kilometers
/// using the haversine formula
pub fn haversine_distance(a: &Point, b: &Point) -> f64 {
    let lat1 = a.latitude().to_radians();
    let lat2 = b.latitude().to_radians();
    let dlat = (b.latitude() - a.latitude()).to_radians();
    let dlon = (b.longitude() - a.longitude()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);

    // rounding errors may push `h` slightly above 1 for antipodal points
    EARTH_RADIUS_KM * 2.0 * h.sqrt().min(1.0).asin()
}

/// Units in which a distance can be given
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum DistanceUnit {
    #[default]
    Kilometers,
    Meters,
    Centimeters,
    Millimeters,
    Miles,
    Yards,
    Feet,
    Inches,
    NauticalMiles,
}

impl DistanceUnit {
    /// The length of one unit in meters
    pub fn meters(self) -> f64 {
        match self {
            DistanceUnit::Kilometers => 1000.0,
            DistanceUnit::Meters => 1.0,
            DistanceUnit::Centimeters => 0.01,
            DistanceUnit::Millimeters => 0.001,
            DistanceUnit::Miles => 1609.344,
            DistanceUnit::Yards => 0.9144,
            DistanceUnit::Feet => 0.3048,
            DistanceUnit::Inches => 0.0254,
            DistanceUnit::NauticalMiles => 1852.0,
        }
    }

    /// The short suffix of the unit as used in distance strings such as
    /// `10mi`
    pub fn suffix(self) -> &'static str {
        match self {
            DistanceUnit::Kilometers => "km",
            DistanceUnit::Meters => "m",
            DistanceUnit::Centimeters => "cm",
            DistanceUnit::Millimeters => "mm",
            DistanceUnit::Miles => "mi",
            DistanceUnit::Yards => "yd",
            DistanceUnit::Feet => "ft",
            DistanceUnit::Inches => "in",
            DistanceUnit::NauticalMiles => "nmi",
        }
    }
}

impl FromStr for DistanceUnit {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "km" | "kilometer" | "kilometers" => DistanceUnit::Kilometers,
            "m" | "meter" | "meters" => DistanceUnit::Meters,
            "cm" | "centimeter" | "centimeters" => DistanceUnit::Centimeters,
            "mm" | "millimeter" | "millimeters" => DistanceUnit::Millimeters,
            "mi" | "mile" | "miles" => DistanceUnit::Miles,
            "yd" | "yard" | "yards" => DistanceUnit::Yards,
            "ft" | "foot" | "feet" => DistanceUnit::Feet,
            "in" | "inch" | "inches" => DistanceUnit::Inches,
            "nmi" | "nm" | "nauticalmiles" | "nautical_miles" => DistanceUnit::NauticalMiles,
            _ => return Err(Error::UnknownUnit(s.to_string())),
        })
    }
}

impl TryFrom<String> for DistanceUnit {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl Display for DistanceUnit {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A non-negative distance in a given unit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Distance {
    value: f64,
    unit: DistanceUnit,
}

impl Distance {
    pub fn new(value: f64, unit: DistanceUnit) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(Error::MalformedQuery(format!(
                "distance must be a non-negative number, got {value}"
            )));
        }
        Ok(Self { value, unit })
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> DistanceUnit {
        self.unit
    }

    /// Normalizes the distance to kilometers
    pub fn to_kilometers(&self) -> f64 {
        self.value * self.unit.meters() / 1000.0
    }

    /// Parses a distance such as `10mi` or `2.5 km`. If the string does not
    /// contain a unit, `default_unit` applies.
    pub fn parse_with_default(s: &str, default_unit: DistanceUnit) -> Result<Self> {
        let s = s.trim();
        let (number, unit) = match s.find(|c: char| c.is_ascii_alphabetic()) {
            Some(i) => (&s[..i], s[i..].parse::<DistanceUnit>()?),
            None => (s, default_unit),
        };
        let value = number.trim().parse::<f64>().map_err(|_| {
            Error::MalformedQuery(format!("unable to parse distance `{s}'"))
        })?;
        Self::new(value, unit)
    }
}

impl FromStr for Distance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_with_default(s, DistanceUnit::default())
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}
