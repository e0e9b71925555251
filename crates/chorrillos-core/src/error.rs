//! Resolver error taxonomy.
//!
//! "No coordinates found" is deliberately absent: it is a normal, empty
//! `Resolution`, not an error.

use std::fmt;
use thiserror::Error;

/// Coarse classification of a transport failure, for messages and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Timeout,
    Connection,
    TooManyRedirects,
    Tls,
    Other,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureKind::Timeout => "timed out",
            FailureKind::Connection => "connection failed",
            FailureKind::TooManyRedirects => "too many redirects",
            FailureKind::Tls => "TLS error",
            FailureKind::Other => "transfer failed",
        };
        f.write_str(s)
    }
}

/// A failed redirect expansion.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct ExpandError {
    pub kind: FailureKind,
    message: String,
    #[source]
    source: Option<curl::Error>,
}

impl ExpandError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub(crate) fn from_curl(e: curl::Error) -> Self {
        Self {
            kind: classify_curl_error(&e),
            message: e.description().to_string(),
            source: Some(e),
        }
    }
}

/// Error returned by `CoordinateResolver::resolve`.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Empty or malformed input, rejected before any network activity.
    #[error("invalid map link: {reason}")]
    InvalidInput { reason: String },

    /// The outbound request could not complete.
    #[error("could not resolve {url}: {source}")]
    ResolutionFailed {
        url: String,
        #[source]
        source: ExpandError,
    },
}

impl ResolveError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        ResolveError::InvalidInput {
            reason: reason.into(),
        }
    }

    /// Transport failure classification, if this is a `ResolutionFailed`.
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            ResolveError::ResolutionFailed { source, .. } => Some(source.kind),
            ResolveError::InvalidInput { .. } => None,
        }
    }
}

/// Classify a curl error.
pub fn classify_curl_error(e: &curl::Error) -> FailureKind {
    if e.is_operation_timedout() {
        return FailureKind::Timeout;
    }
    if e.is_too_many_redirects() {
        return FailureKind::TooManyRedirects;
    }
    if e.is_ssl_connect_error()
        || e.is_peer_failed_verification()
        || e.is_ssl_certproblem()
        || e.is_ssl_cacert()
    {
        return FailureKind::Tls;
    }
    if e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_read_error()
        || e.is_recv_error()
        || e.is_send_error()
        || e.is_got_nothing()
    {
        return FailureKind::Connection;
    }
    FailureKind::Other
}
