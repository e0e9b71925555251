//! Coordinate extraction from resolved map URLs.
//!
//! Runs an ordered table of patterns over the URL string and returns the first
//! candidate that passes range validation. A candidate that fails validation
//! does not stop the scan; matching continues with the next pattern.

mod patterns;

pub use patterns::{AxisOrder, CoordinatePattern, PATTERNS};

use crate::coords::CoordinatePair;

/// Extracts a validated coordinate pair from `url`, or `None` if nothing matches.
///
/// Each pattern is tried against the raw string and then against the
/// percent-decoded query string (`?q=-12.3%2C-77.0`) before the next, lower
/// priority pattern is consulted.
///
/// # Examples
///
/// - `"https://maps.google.com/maps?q=-12.345,-76.789"` → `(-12.345, -76.789)`
/// - `"https://maps.google.com/maps/place/X/@-12.1,-77.2,15z"` → `(-12.1, -77.2)`
pub fn extract_coordinates(url: &str) -> Option<CoordinatePair> {
    let decoded = decoded_query(url);
    let haystacks: Vec<&str> = std::iter::once(url).chain(decoded.as_deref()).collect();

    for pattern in PATTERNS.iter() {
        for haystack in &haystacks {
            let Some((lat, lng)) = pattern.capture(haystack) else {
                continue;
            };
            match CoordinatePair::new(lat, lng) {
                Some(pair) => {
                    tracing::trace!(pattern = pattern.name, %pair, "coordinate pattern matched");
                    return Some(pair);
                }
                None => {
                    tracing::debug!(
                        pattern = pattern.name,
                        lat,
                        lng,
                        "matched values out of range, trying next candidate"
                    );
                }
            }
        }
    }
    None
}

/// Rebuilds the query string with every key and value percent-decoded.
fn decoded_query(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    parsed.query()?;
    let decoded: Vec<String> = parsed
        .query_pairs()
        .map(|(k, v)| format!("{k}={v}"))
        .collect();
    if decoded.is_empty() {
        return None;
    }
    Some(format!("?{}", decoded.join("&")))
}
