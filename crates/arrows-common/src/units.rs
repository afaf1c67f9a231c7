//! Wind speed units as declared in a wind row label.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ArrowsError;

/// km/h per knot.
pub const KMH_PER_KNOT: f64 = 1.852;

/// km/h per m/s.
pub const KMH_PER_MS: f64 = 3.6;

/// Unit of the raw speed numbers in a wind row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "km/h")]
    KilometersPerHour,
    #[serde(rename = "kt")]
    Knots,
    #[serde(rename = "m/s")]
    MetersPerSecond,
}

impl Unit {
    /// Convert a raw speed in this unit to canonical km/h.
    pub fn to_kmh(self, speed: f64) -> f64 {
        match self {
            Unit::KilometersPerHour => speed,
            Unit::Knots => speed * KMH_PER_KNOT,
            Unit::MetersPerSecond => speed * KMH_PER_MS,
        }
    }

    /// The token used in row labels, e.g. `km/h`.
    pub fn token(self) -> &'static str {
        match self {
            Unit::KilometersPerHour => "km/h",
            Unit::Knots => "kt",
            Unit::MetersPerSecond => "m/s",
        }
    }
}

impl FromStr for Unit {
    type Err = ArrowsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "km/h" => Ok(Unit::KilometersPerHour),
            "kt" => Ok(Unit::Knots),
            "m/s" => Ok(Unit::MetersPerSecond),
            other => Err(ArrowsError::UnknownUnit(other.to_string())),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tokens() {
        assert_eq!("km/h".parse::<Unit>().unwrap(), Unit::KilometersPerHour);
        assert_eq!(" kt ".parse::<Unit>().unwrap(), Unit::Knots);
        assert_eq!("m/s".parse::<Unit>().unwrap(), Unit::MetersPerSecond);
        assert!(matches!(
            "mph".parse::<Unit>(),
            Err(ArrowsError::UnknownUnit(u)) if u == "mph"
        ));
    }

    #[test]
    fn test_canonical_conversion() {
        assert_eq!(Unit::KilometersPerHour.to_kmh(20.0), 20.0);
        assert!((Unit::Knots.to_kmh(10.0) - 18.52).abs() < 1e-9);
        assert!((Unit::MetersPerSecond.to_kmh(5.0) - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_display_matches_token() {
        for unit in [Unit::KilometersPerHour, Unit::Knots, Unit::MetersPerSecond] {
            assert_eq!(unit.to_string().parse::<Unit>().unwrap(), unit);
        }
    }
}
