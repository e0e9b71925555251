//! Parse collected response header lines into a redirect trace.
//!
//! With `follow_location` libcurl hands every hop's headers to the header
//! callback, one block per response, each starting with a status line.

/// One response seen while following redirects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hop {
    pub status: u32,
    /// `Location` header value, if the response carried one.
    pub location: Option<String>,
}

/// Splits header lines into per-response hops.
pub(crate) fn parse_hops(lines: &[String]) -> Vec<Hop> {
    let mut hops: Vec<Hop> = Vec::new();

    for line in lines {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some(status) = parse_status_line(line) {
            hops.push(Hop {
                status,
                location: None,
            });
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("location") {
                if let Some(hop) = hops.last_mut() {
                    hop.location = Some(value.trim().to_string());
                }
            }
        }
    }

    hops
}

/// Number of redirect responses (3xx with a `Location`) in the trace.
pub(crate) fn redirect_count(hops: &[Hop]) -> u32 {
    hops.iter()
        .filter(|h| (300..400).contains(&h.status) && h.location.is_some())
        .count() as u32
}

/// `HTTP/1.1 302 Found` / `HTTP/2 200` → status code.
fn parse_status_line(line: &str) -> Option<u32> {
    if !line.starts_with("HTTP/") {
        return None;
    }
    line.split_whitespace().nth(1)?.parse().ok()
}
