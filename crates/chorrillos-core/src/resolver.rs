//! Map-link coordinate resolver.
//!
//! Validates the input, expands it through a `UrlExpander` (one outbound
//! request following redirects), then runs the coordinate pattern table over
//! the final URL. Stateless: a resolver can be shared across threads and
//! called concurrently.

use serde::Serialize;
use std::sync::Arc;

use crate::config::ExpandMode;
use crate::coords::CoordinatePair;
use crate::error::{ExpandError, ResolveError};
use crate::extract::extract_coordinates;
use crate::fetch_head::Expanded;
use crate::url_model::{is_shortened_map_url, validate_input};

/// Turns a link into its final form. Implemented over libcurl by
/// `fetch_head::CurlExpander`; tests substitute fakes.
pub trait UrlExpander: Send + Sync {
    fn expand(&self, url: &str) -> Result<Expanded, ExpandError>;
}

/// Result of a successful resolution. Coordinates are absent when the final
/// URL carries no recognizable (or no valid) location.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub resolved_url: String,
    pub coordinates: Option<CoordinatePair>,
    /// Redirect hops followed to reach `resolved_url`.
    pub redirects: u32,
}

/// JSON shape returned to forms: `{ resolvedUrl, lat, lng, redirects }`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionBody {
    pub resolved_url: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub redirects: u32,
}

impl From<&Resolution> for ResolutionBody {
    fn from(r: &Resolution) -> Self {
        Self {
            resolved_url: r.resolved_url.clone(),
            lat: r.coordinates.map(|c| c.lat()),
            lng: r.coordinates.map(|c| c.lng()),
            redirects: r.redirects,
        }
    }
}

/// The three user-visible outcomes a registration form distinguishes, plus success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Found,
    NoCoordinates,
    InvalidLink,
    Unreachable,
}

impl Outcome {
    pub fn of(result: &Result<Resolution, ResolveError>) -> Self {
        match result {
            Ok(r) if r.coordinates.is_some() => Outcome::Found,
            Ok(_) => Outcome::NoCoordinates,
            Err(ResolveError::InvalidInput { .. }) => Outcome::InvalidLink,
            Err(ResolveError::ResolutionFailed { .. }) => Outcome::Unreachable,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            Outcome::Found => "location found",
            Outcome::NoCoordinates => "that link didn't contain a recognizable location",
            Outcome::InvalidLink => "please enter a valid map link",
            Outcome::Unreachable => "could not reach that link",
        }
    }
}

#[derive(Clone)]
pub struct CoordinateResolver {
    expander: Arc<dyn UrlExpander>,
    mode: ExpandMode,
}

impl CoordinateResolver {
    pub fn new(expander: Arc<dyn UrlExpander>, mode: ExpandMode) -> Self {
        Self { expander, mode }
    }

    /// Resolves `url` to its final form and extracts coordinates.
    ///
    /// Empty or malformed input fails with `InvalidInput` before any network
    /// call. Transport failures surface as `ResolutionFailed`. A link with no
    /// recognizable location is `Ok` with `coordinates == None`.
    pub fn resolve(&self, url: &str) -> Result<Resolution, ResolveError> {
        let parsed = validate_input(url)?;
        // Returned verbatim unless a redirect replaced it; curl gets the parsed form.
        let input = url.trim();

        let (resolved_url, redirects) = if self.should_expand(parsed.as_str()) {
            let expanded = self.expander.expand(parsed.as_str()).map_err(|source| {
                tracing::warn!(url = input, kind = %source.kind, "link expansion failed: {}", source);
                ResolveError::ResolutionFailed {
                    url: input.to_string(),
                    source,
                }
            })?;
            tracing::debug!(
                url = input,
                final_url = %expanded.url,
                redirects = expanded.redirects,
                status = expanded.status,
                "link expanded"
            );
            if expanded.redirects == 0 {
                (input.to_string(), 0)
            } else {
                (expanded.url, expanded.redirects)
            }
        } else {
            (input.to_string(), 0)
        };

        let coordinates = extract_coordinates(&resolved_url);
        if coordinates.is_none() {
            tracing::debug!(final_url = %resolved_url, "no coordinates in resolved link");
        }

        Ok(Resolution {
            resolved_url,
            coordinates,
            redirects,
        })
    }

    fn should_expand(&self, url: &str) -> bool {
        match self.mode {
            ExpandMode::Always => true,
            ExpandMode::ShortenedOnly => is_shortened_map_url(url),
        }
    }
}
