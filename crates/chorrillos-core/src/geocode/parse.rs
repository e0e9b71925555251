//! Nominatim JSON shapes.

use serde::Deserialize;
use serde_json::Value;

use crate::coords::CoordinatePair;

/// First hit of a forward search.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeHit {
    pub coordinates: CoordinatePair,
    pub address: String,
}

#[derive(Debug, Deserialize)]
struct SearchPlace {
    lat: String,
    lon: String,
    #[serde(default)]
    display_name: String,
}

/// `display_name` of a `/reverse` response; `None` for `{"error": ...}` or a missing name.
pub(crate) fn reverse_to_address(json: &Value) -> Option<String> {
    if json.get("error").is_some() {
        return None;
    }
    json.get("display_name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// First place of a `/search` response with parseable, in-range coordinates.
pub(crate) fn search_to_hit(json: Value) -> Option<GeocodeHit> {
    let places: Vec<SearchPlace> = serde_json::from_value(json).ok()?;
    let first = places.into_iter().next()?;
    let coordinates = CoordinatePair::parse_pair(&first.lat, &first.lon).ok()?;
    Some(GeocodeHit {
        coordinates,
        address: first.display_name,
    })
}
