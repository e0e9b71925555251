//! Redirect expansion over HTTP.
//!
//! Uses the curl crate (libcurl) to issue one request that follows redirects
//! and reports the effective final URL. Header lines from every hop are
//! collected so the redirect chain can be logged and counted.

mod parse;

pub use parse::Hop;

use std::str;
use std::time::Duration;

use crate::config::{HttpConfig, RequestMethod};
use crate::error::ExpandError;
use crate::resolver::UrlExpander;

/// Outcome of following a link to its final form.
#[derive(Debug, Clone)]
pub struct Expanded {
    /// Effective URL after all redirects.
    pub url: String,
    /// Status code of the last response.
    pub status: u32,
    /// Number of redirects followed.
    pub redirects: u32,
    pub hops: Vec<Hop>,
}

impl From<curl::Error> for ExpandError {
    fn from(e: curl::Error) -> Self {
        ExpandError::from_curl(e)
    }
}

/// Performs a HEAD (or GET) request following redirects and returns the final URL.
///
/// The final status code does not fail the call; only transport errors do.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn expand(url: &str, http: &HttpConfig) -> Result<Expanded, ExpandError> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    match http.method {
        RequestMethod::Head => easy.nobody(true)?,
        RequestMethod::Get => easy.get(true)?,
    }
    easy.follow_location(true)?;
    easy.max_redirections(http.max_redirects)?;
    easy.connect_timeout(Duration::from_secs(http.connect_timeout_secs))?;
    easy.timeout(Duration::from_secs(http.timeout_secs))?;
    easy.useragent(&http.user_agent)?;

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        // Body (GET mode) is irrelevant; only the final URL matters.
        transfer.write_function(|data| Ok(data.len()))?;
        transfer.perform()?;
    }

    let status = easy.response_code()?;
    let effective = easy
        .effective_url()?
        .map(str::to_string)
        .unwrap_or_else(|| url.to_string());

    let hops = parse::parse_hops(&headers);
    let redirects = parse::redirect_count(&hops);

    if status >= 400 {
        tracing::warn!(url, final_url = %effective, status, "final hop returned an error status");
    }

    Ok(Expanded {
        url: effective,
        status,
        redirects,
        hops,
    })
}

/// Production expander backed by libcurl.
#[derive(Debug, Clone)]
pub struct CurlExpander {
    http: HttpConfig,
}

impl CurlExpander {
    pub fn new(http: HttpConfig) -> Self {
        Self { http }
    }
}

impl UrlExpander for CurlExpander {
    fn expand(&self, url: &str) -> Result<Expanded, ExpandError> {
        expand(url, &self.http)
    }
}
