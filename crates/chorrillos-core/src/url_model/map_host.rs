//! Known map-provider link prefixes.

/// Host/path prefixes (after the scheme) accepted as map links.
pub const MAP_URL_PREFIXES: &[&str] = &[
    "google.com/maps",
    "www.google.com/maps",
    "maps.google.com",
    "maps.app.goo.gl",
    "goo.gl/maps",
];

/// Prefixes of short links that only carry coordinates after redirecting.
pub const SHORT_LINK_PREFIXES: &[&str] = &["maps.app.goo.gl", "goo.gl/maps"];

/// True when `url` starts with `http://` or `https://` followed by a known map prefix.
pub fn is_valid_map_url(url: &str) -> bool {
    matches_prefix(url, MAP_URL_PREFIXES)
}

/// True for shortened share links (`maps.app.goo.gl/...`, `goo.gl/maps/...`).
pub fn is_shortened_map_url(url: &str) -> bool {
    matches_prefix(url, SHORT_LINK_PREFIXES)
}

fn matches_prefix(url: &str, prefixes: &[&str]) -> bool {
    let url = url.trim();
    let rest = match url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
    {
        Some(r) => r,
        None => return false,
    };
    prefixes.iter().any(|p| rest.starts_with(p))
}
