//! Validated WGS84 coordinate pair.
//!
//! A `CoordinatePair` can only be built through a range-checking constructor,
//! so holders never see NaN, infinities, or out-of-range axes.

use serde::Serialize;
use thiserror::Error;

pub const LAT_RANGE: std::ops::RangeInclusive<f64> = -90.0..=90.0;
pub const LNG_RANGE: std::ops::RangeInclusive<f64> = -180.0..=180.0;

/// Latitude/longitude pair within standard WGS84 ranges.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CoordinatePair {
    lat: f64,
    lng: f64,
}

/// Why a submitted latitude/longitude pair was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("{axis} is not a number: {value:?}")]
    NotANumber { axis: &'static str, value: String },
    #[error("{axis} {value} is out of range")]
    OutOfRange { axis: &'static str, value: f64 },
}

impl CoordinatePair {
    /// Returns `None` unless both values are finite and within range.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        Self::checked(lat, lng).ok()
    }

    /// Like `new` but says which axis failed.
    pub fn checked(lat: f64, lng: f64) -> Result<Self, CoordinateError> {
        if !lat.is_finite() || !LAT_RANGE.contains(&lat) {
            return Err(CoordinateError::OutOfRange {
                axis: "latitude",
                value: lat,
            });
        }
        if !lng.is_finite() || !LNG_RANGE.contains(&lng) {
            return Err(CoordinateError::OutOfRange {
                axis: "longitude",
                value: lng,
            });
        }
        Ok(Self { lat, lng })
    }

    /// Parses raw form-field strings (e.g. a registration submission).
    pub fn parse_pair(lat: &str, lng: &str) -> Result<Self, CoordinateError> {
        let lat = parse_axis("latitude", lat)?;
        let lng = parse_axis("longitude", lng)?;
        Self::checked(lat, lng)
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }
}

impl std::fmt::Display for CoordinatePair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

fn parse_axis(axis: &'static str, raw: &str) -> Result<f64, CoordinateError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| CoordinateError::NotANumber {
            axis,
            value: trimmed.to_string(),
        })
}
