//! Request/response dumps for debug mode.
//!
//! Dumps are written in HTTP/1.1 wire layout so they can be read like a
//! packet capture. Tracing never fails the request it describes: if the
//! response body could not be read, the response dump is skipped.

use std::fmt::{self, Write as _};

use bytes::Bytes;

use crate::clients::http_request::HttpRequest;
use crate::clients::http_response::HttpResponse;
use crate::logger::Logger;

/// Logs the outgoing request.
pub fn trace_request(logger: &dyn Logger, request: &HttpRequest) {
    logger.log(&format!("HTTP request dump:\n{}\n", dump_request(request)));
}

/// Logs the received response, given the outcome of reading its body.
pub fn trace_response<E: fmt::Display>(
    logger: &dyn Logger,
    response: &HttpResponse,
    body: &Result<Bytes, E>,
) {
    match body {
        Ok(body) => logger.log(&format!(
            "HTTP response dump:\n{}\n",
            dump_response(response, body)
        )),
        Err(e) => tracing::debug!("skipping response dump, body unreadable: {}", e),
    }
}

/// Renders a request as it would appear on the wire.
#[must_use]
pub fn dump_request(request: &HttpRequest) -> String {
    let mut target = request.url.path().to_string();
    if let Some(query) = request.url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = format!("{} {} HTTP/1.1\r\n", request.method, target);
    if let Some(host) = request.url.host_str() {
        match request.url.port() {
            Some(port) => {
                let _ = write!(out, "Host: {host}:{port}\r\n");
            }
            None => {
                let _ = write!(out, "Host: {host}\r\n");
            }
        }
    }
    for (key, value) in &request.headers {
        let _ = write!(out, "{key}: {value}\r\n");
    }
    if let Some(body) = &request.body {
        let _ = write!(out, "Content-Length: {}\r\n", body.len());
    }
    out.push_str("\r\n");
    if let Some(body) = &request.body {
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

/// Renders a response status line, headers and `body`.
#[must_use]
pub fn dump_response(response: &HttpResponse, body: &[u8]) -> String {
    let reason = reqwest::StatusCode::from_u16(response.status)
        .ok()
        .and_then(|s| s.canonical_reason())
        .unwrap_or("");
    let mut out = format!("HTTP/1.1 {} {}\r\n", response.status, reason);

    let mut names: Vec<&String> = response.headers.keys().collect();
    names.sort();
    for name in names {
        for value in &response.headers[name] {
            let _ = write!(out, "{name}: {value}\r\n");
        }
    }
    out.push_str("\r\n");
    out.push_str(&String::from_utf8_lossy(body));
    out
}
