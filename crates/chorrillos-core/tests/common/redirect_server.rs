//! Minimal HTTP/1.1 server that answers HEAD and GET with configured routes.
//!
//! Each route is a redirect, a fixed body, or a stall (sleeps before answering,
//! for timeout tests). Every response carries `Connection: close`, so each
//! request arrives on its own connection.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

#[derive(Debug, Clone)]
pub enum Route {
    /// 3xx with the given `Location` (absolute or relative to the server).
    Redirect { status: u16, location: String },
    /// Fixed response. `head_allowed = false` answers HEAD with 405.
    Body {
        status: u16,
        content_type: &'static str,
        body: String,
        head_allowed: bool,
    },
    /// Sleep before answering 200.
    Stall(Duration),
}

impl Route {
    pub fn redirect(location: &str) -> Self {
        Route::Redirect {
            status: 302,
            location: location.to_string(),
        }
    }

    pub fn ok() -> Self {
        Route::Body {
            status: 200,
            content_type: "text/html",
            body: "<html></html>".to_string(),
            head_allowed: true,
        }
    }

    pub fn json(status: u16, body: &str) -> Self {
        Route::Body {
            status,
            content_type: "application/json",
            body: body.to_string(),
            head_allowed: true,
        }
    }
}

/// Starts a server in a background thread. Returns the base URL without a
/// trailing slash (e.g. "http://127.0.0.1:12345"). Runs until the process exits.
/// Paths are matched without their query string; unknown paths get 404.
pub fn start(routes: Vec<(&str, Route)>) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let routes: Arc<HashMap<String, Route>> = Arc::new(
        routes
            .into_iter()
            .map(|(p, r)| (p.to_string(), r))
            .collect(),
    );
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let routes = Arc::clone(&routes);
            thread::spawn(move || handle(stream, &routes));
        }
    });
    format!("http://127.0.0.1:{}", port)
}

/// A URL on which nothing is listening.
pub fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}/short", port)
}

fn handle(mut stream: std::net::TcpStream, routes: &HashMap<String, Route>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) => return,
        Ok(n) => n,
        Err(_) => return,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let (method, path) = parse_request_line(request);
    let is_head = method.eq_ignore_ascii_case("HEAD");
    let path = path.split('?').next().unwrap_or("");

    let response = match routes.get(path) {
        Some(Route::Redirect { status, location }) => format!(
            "HTTP/1.1 {} Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            status, location
        ),
        Some(Route::Body {
            head_allowed: false,
            ..
        }) if is_head => {
            "HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
                .to_string()
        }
        Some(Route::Body {
            status,
            content_type,
            body,
            ..
        }) => {
            let payload = if is_head { "" } else { body.as_str() };
            format!(
                "HTTP/1.1 {} X\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                content_type,
                body.len(),
                payload
            )
        }
        Some(Route::Stall(d)) => {
            thread::sleep(*d);
            "HTTP/1.1 200 OK\r\nContent-Length: 0\r\nConnection: close\r\n\r\n".to_string()
        }
        None => "HTTP/1.1 404 Not Found\r\nContent-Length: 0\r\nConnection: close\r\n\r\n"
            .to_string(),
    };
    let _ = stream.write_all(response.as_bytes());
}

/// Returns (method, request-target) from the first request line.
fn parse_request_line(request: &str) -> (&str, &str) {
    let first = request.lines().next().unwrap_or("");
    let mut parts = first.split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("");
    (method, target)
}
