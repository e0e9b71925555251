//! Syntactic validation of user-supplied links.

use url::Url;

use crate::error::ResolveError;

/// Checks that `raw` is a non-empty, absolute http(s) URL with a host.
///
/// Leading/trailing whitespace (common when pasting from a share sheet) is
/// ignored. Returns the parsed URL on success.
pub fn validate_input(raw: &str) -> Result<Url, ResolveError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ResolveError::invalid("URL is empty"));
    }

    let parsed = Url::parse(trimmed)
        .map_err(|e| ResolveError::invalid(format!("not a valid URL: {e}")))?;

    match parsed.scheme() {
        "http" | "https" => {}
        other => {
            return Err(ResolveError::invalid(format!(
                "unsupported scheme {other:?}, expected http or https"
            )))
        }
    }

    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(ResolveError::invalid("URL has no host"));
    }

    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(raw: &str) -> String {
        match validate_input(raw) {
            Err(ResolveError::InvalidInput { reason }) => reason,
            other => panic!("expected InvalidInput for {raw:?}, got {other:?}"),
        }
    }

    #[test]
    fn accepts_map_links() {
        let u = validate_input("https://maps.app.goo.gl/AbCdEf123").unwrap();
        assert_eq!(u.host_str(), Some("maps.app.goo.gl"));
        assert!(validate_input("http://maps.google.com/maps?q=1.0,2.0").is_ok());
    }

    #[test]
    fn trims_whitespace() {
        let u = validate_input("  https://goo.gl/maps/xyz \n").unwrap();
        assert_eq!(u.as_str(), "https://goo.gl/maps/xyz");
    }

    #[test]
    fn empty_and_blank() {
        assert_eq!(reason(""), "URL is empty");
        assert_eq!(reason("   "), "URL is empty");
    }

    #[test]
    fn relative_or_garbage() {
        assert!(reason("maps.google.com/maps").starts_with("not a valid URL"));
        assert!(reason("not a url").starts_with("not a valid URL"));
    }

    #[test]
    fn other_schemes() {
        assert!(reason("ftp://example.com/file").contains("unsupported scheme"));
        assert!(reason("javascript:alert(1)").contains("unsupported scheme"));
    }
}
