//! Integration test: resolve links against a local redirecting HTTP server
//! through the libcurl expander.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chorrillos_core::config::{ExpandMode, HttpConfig, RequestMethod};
use chorrillos_core::fetch_head::{self, CurlExpander};
use chorrillos_core::{CoordinateResolver, FailureKind, ResolveError};
use common::redirect_server::{self, Route};

const PLACE_3D4D: &str = "/maps/place/Parque/data=!3d-12.05!4d-77.03";
const PLACE_AT: &str = "/maps/place/X/@-12.1,-77.2,15z";

fn http(method: RequestMethod) -> HttpConfig {
    HttpConfig {
        method,
        connect_timeout_secs: 2,
        timeout_secs: 5,
        max_redirects: 5,
        ..HttpConfig::default()
    }
}

fn resolver(cfg: HttpConfig) -> CoordinateResolver {
    CoordinateResolver::new(Arc::new(CurlExpander::new(cfg)), ExpandMode::Always)
}

#[test]
fn short_link_redirect_yields_data_param_coordinates() {
    let base = redirect_server::start(vec![
        ("/short", Route::redirect(PLACE_3D4D)),
        (PLACE_3D4D, Route::ok()),
    ]);

    let r = resolver(http(RequestMethod::Head))
        .resolve(&format!("{base}/short"))
        .expect("resolve");

    assert_eq!(r.resolved_url, format!("{base}{PLACE_3D4D}"));
    assert_eq!(r.redirects, 1);
    let c = r.coordinates.expect("coordinates");
    assert_eq!((c.lat(), c.lng()), (-12.05, -77.03));
}

#[test]
fn two_hop_chain_is_followed() {
    let base = redirect_server::start(vec![
        ("/a", Route::redirect("/b")),
        ("/b", Route::redirect(PLACE_AT)),
        (PLACE_AT, Route::ok()),
    ]);

    let expanded = fetch_head::expand(&format!("{base}/a"), &http(RequestMethod::Head)).unwrap();
    assert_eq!(expanded.redirects, 2);
    assert_eq!(expanded.status, 200);
    assert_eq!(expanded.hops.len(), 3);
    assert_eq!(expanded.hops[0].location.as_deref(), Some("/b"));
}

#[test]
fn non_redirecting_link_keeps_input_url() {
    let base = redirect_server::start(vec![(PLACE_AT, Route::ok())]);
    let url = format!("{base}{PLACE_AT}");

    let r = resolver(http(RequestMethod::Head)).resolve(&url).unwrap();
    assert_eq!(r.resolved_url, url);
    assert_eq!(r.redirects, 0);
    let c = r.coordinates.unwrap();
    assert_eq!((c.lat(), c.lng()), (-12.1, -77.2));
}

#[test]
fn no_coordinates_in_final_url() {
    let base = redirect_server::start(vec![
        ("/short", Route::redirect("/no-coords-here")),
        ("/no-coords-here", Route::ok()),
    ]);

    let r = resolver(http(RequestMethod::Head))
        .resolve(&format!("{base}/short"))
        .unwrap();
    assert!(r.coordinates.is_none());
    assert!(r.resolved_url.ends_with("/no-coords-here"));
}

#[test]
fn error_status_at_final_hop_still_resolves() {
    let base = redirect_server::start(vec![
        ("/short", Route::redirect(PLACE_3D4D)),
        (
            PLACE_3D4D,
            Route::Body {
                status: 200,
                content_type: "text/html",
                body: String::new(),
                head_allowed: false,
            },
        ),
    ]);

    let r = resolver(http(RequestMethod::Head))
        .resolve(&format!("{base}/short"))
        .unwrap();
    assert!(r.coordinates.is_some());
}

#[test]
fn get_mode_discards_body() {
    let base = redirect_server::start(vec![
        ("/short", Route::redirect(PLACE_AT)),
        (PLACE_AT, Route::ok()),
    ]);

    let r = resolver(http(RequestMethod::Get))
        .resolve(&format!("{base}/short"))
        .unwrap();
    assert_eq!(r.redirects, 1);
    assert!(r.coordinates.is_some());
}

#[test]
fn connection_refused_is_resolution_failed() {
    let err = resolver(http(RequestMethod::Head))
        .resolve(&redirect_server::closed_port_url())
        .unwrap_err();
    assert!(matches!(err, ResolveError::ResolutionFailed { .. }));
    assert_eq!(err.failure_kind(), Some(FailureKind::Connection));
}

#[test]
fn stalled_server_times_out() {
    let base = redirect_server::start(vec![("/slow", Route::Stall(Duration::from_secs(3)))]);
    let cfg = HttpConfig {
        timeout_secs: 1,
        ..http(RequestMethod::Head)
    };

    let err = resolver(cfg).resolve(&format!("{base}/slow")).unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::Timeout));
}

#[test]
fn redirect_loop_hits_cap() {
    let base = redirect_server::start(vec![("/loop", Route::redirect("/loop"))]);
    let cfg = HttpConfig {
        max_redirects: 3,
        ..http(RequestMethod::Head)
    };

    let err = resolver(cfg).resolve(&format!("{base}/loop")).unwrap_err();
    assert_eq!(err.failure_kind(), Some(FailureKind::TooManyRedirects));
}
