//! Thin client for a Nominatim-compatible geocoding service.
//!
//! Reverse lookups turn a resolved coordinate pair into a display address for
//! the registration form; forward search is the fallback when a citizen types
//! an address instead of pasting a link.

mod parse;

pub use parse::GeocodeHit;

use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::GeocodeConfig;
use crate::coords::CoordinatePair;
use crate::error::{classify_curl_error, FailureKind};

#[derive(Debug, Error)]
pub enum GeocodeError {
    #[error("bad geocoder URL: {0}")]
    Url(#[from] url::ParseError),
    #[error("geocoder request failed ({kind}): {source}")]
    Transport {
        kind: FailureKind,
        #[source]
        source: curl::Error,
    },
    #[error("geocoder returned HTTP {0}")]
    Http(u32),
    #[error("geocoder response exceeded {0} bytes")]
    TooLarge(usize),
    #[error("geocoder returned invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<curl::Error> for GeocodeError {
    fn from(e: curl::Error) -> Self {
        GeocodeError::Transport {
            kind: classify_curl_error(&e),
            source: e,
        }
    }
}

/// Address for `pair`, or `None` when the service knows nothing there.
pub fn reverse(pair: CoordinatePair, cfg: &GeocodeConfig) -> Result<Option<String>, GeocodeError> {
    let lat = pair.lat().to_string();
    let lon = pair.lng().to_string();
    let url = endpoint(
        cfg,
        "reverse",
        &[
            ("format", "json"),
            ("lat", lat.as_str()),
            ("lon", lon.as_str()),
            ("zoom", "18"),
            ("addressdetails", "1"),
        ],
    )?;
    let json = fetch_json(&url, cfg)?;
    Ok(parse::reverse_to_address(&json))
}

/// First match for a free-text address.
pub fn search(address: &str, cfg: &GeocodeConfig) -> Result<Option<GeocodeHit>, GeocodeError> {
    let url = endpoint(
        cfg,
        "search",
        &[("format", "json"), ("q", address), ("limit", "1")],
    )?;
    let json = fetch_json(&url, cfg)?;
    Ok(parse::search_to_hit(json))
}

fn endpoint(cfg: &GeocodeConfig, path: &str, params: &[(&str, &str)]) -> Result<Url, GeocodeError> {
    let base = format!("{}/{}", cfg.base_url.trim_end_matches('/'), path);
    Ok(Url::parse_with_params(&base, params)?)
}

fn fetch_json(url: &Url, cfg: &GeocodeConfig) -> Result<Value, GeocodeError> {
    let mut body: Vec<u8> = Vec::new();
    let mut overflowed = false;

    let mut easy = curl::easy::Easy::new();
    easy.url(url.as_str())?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.useragent(&cfg.user_agent)?;
    easy.connect_timeout(Duration::from_secs(cfg.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(cfg.timeout_secs))?;

    let mut list = curl::easy::List::new();
    list.append("Accept: application/json")?;
    easy.http_headers(list)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| {
            if body.len() + data.len() > cfg.max_body_bytes {
                overflowed = true;
                // Short count makes libcurl abort with a write error.
                return Ok(0);
            }
            body.extend_from_slice(data);
            Ok(data.len())
        })?;
        transfer.perform()
    };
    if overflowed {
        tracing::warn!(url = %url, limit = cfg.max_body_bytes, "geocoder response too large");
        return Err(GeocodeError::TooLarge(cfg.max_body_bytes));
    }
    performed?;

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        tracing::warn!(url = %url, code, "geocoder returned non-success status");
        return Err(GeocodeError::Http(code));
    }

    Ok(serde_json::from_slice(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_params() {
        let cfg = GeocodeConfig {
            base_url: "https://geo.example.org/".to_string(),
            ..GeocodeConfig::default()
        };
        let url = endpoint(&cfg, "search", &[("q", "Av. Huaylas 123, Chorrillos")]).unwrap();
        assert_eq!(
            url.as_str(),
            "https://geo.example.org/search?q=Av.+Huaylas+123%2C+Chorrillos"
        );
    }
}
