//! Caller IP resolution
//!
//! Precedence: `Client-Ip` header, then `X-Forwarded-For`, then the
//! transport peer address, else the literal `UNKNOWN`. The headers are
//! client-supplied and spoofable; the site has always attributed visits
//! this way and the log is informational only.

use std::net::SocketAddr;

use axum::http::HeaderMap;

pub const CLIENT_IP_HEADER: &str = "client-ip";
pub const FORWARDED_FOR_HEADER: &str = "x-forwarded-for";

const UNKNOWN: &str = "UNKNOWN";

/// Resolve the caller IP for the visit log.
pub fn resolve(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(ip) = header_value(headers, CLIENT_IP_HEADER) {
        return ip;
    }
    if let Some(ip) = header_value(headers, FORWARDED_FOR_HEADER) {
        return ip;
    }
    match peer {
        Some(addr) => addr.ip().to_string(),
        None => UNKNOWN.to_string(),
    }
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
