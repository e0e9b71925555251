//! Ordered coordinate pattern table.

use regex::Regex;
use std::sync::LazyLock;

/// Which capture group holds which axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisOrder {
    LatLng,
    /// `!2dLNG!3dLAT`: longitude is captured first.
    LngLat,
}

/// One entry of the pattern table.
pub struct CoordinatePattern {
    pub name: &'static str,
    pub regex: Regex,
    pub order: AxisOrder,
}

fn pattern(name: &'static str, re: &str, order: AxisOrder) -> CoordinatePattern {
    CoordinatePattern {
        name,
        regex: Regex::new(re).expect("coordinate pattern should compile"),
        order,
    }
}

/// Patterns in priority order. The first valid match wins.
pub static PATTERNS: LazyLock<[CoordinatePattern; 5]> = LazyLock::new(|| {
    [
        // map centered at
        pattern("at", r"@(-?\d+\.\d+),(-?\d+\.\d+)", AxisOrder::LatLng),
        pattern("q", r"[?&]q=(-?\d+\.\d+),(-?\d+\.\d+)", AxisOrder::LatLng),
        pattern("ll", r"[?&]ll=(-?\d+\.\d+),(-?\d+\.\d+)", AxisOrder::LatLng),
        // data parameter encoding
        pattern("3d4d", r"!3d(-?\d+\.\d+)!4d(-?\d+\.\d+)", AxisOrder::LatLng),
        pattern("2d3d", r"!2d(-?\d+\.\d+)!3d(-?\d+\.\d+)", AxisOrder::LngLat),
    ]
});

impl CoordinatePattern {
    /// Returns the raw `(lat, lng)` of the first match, with axis order corrected.
    pub fn capture(&self, haystack: &str) -> Option<(f64, f64)> {
        let caps = self.regex.captures(haystack)?;
        let first: f64 = caps.get(1)?.as_str().parse().ok()?;
        let second: f64 = caps.get(2)?.as_str().parse().ok()?;
        Some(match self.order {
            AxisOrder::LatLng => (first, second),
            AxisOrder::LngLat => (second, first),
        })
    }
}
