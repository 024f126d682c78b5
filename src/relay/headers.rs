//! Header forwarding and relay policy.
//!
//! # Responsibilities
//! - Build the outbound header map: strip the caller's `Host`, the
//!   credential-carrying headers, and connection-scoped headers
//! - Build the relayed response header map: drop framing headers the relay
//!   invalidates, apply the CORS/policy overlay
//!
//! # Design Decisions
//! - The credential travels upstream only as the `key` query parameter;
//!   forwarding it redundantly in a header would create conflicting
//!   precedence at the upstream
//! - `Content-Encoding` survives the relay: body bytes pass through without
//!   being decoded, so the header stays accurate on both paths

use axum::http::{header, HeaderMap, HeaderValue};

/// Headers that carried the credential inbound; never forwarded upstream.
const CREDENTIAL_HEADERS: [&str; 3] = ["authorization", "x-api-key", "x-goog-api-key"];

/// Connection-scoped headers that must not cross the relay hop.
const HOP_BY_HOP: [&str; 8] = [
    "connection",
    "keep-alive",
    "proxy-authenticate",
    "proxy-authorization",
    "te",
    "trailer",
    "transfer-encoding",
    "upgrade",
];

/// Build the outbound header map from the inbound one.
///
/// `Host` is dropped so the client library sets the upstream authority;
/// `Content-Length` is dropped because the body is re-framed as a stream.
pub fn outbound_headers(inbound: &HeaderMap, force_identity_encoding: bool) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(inbound.len());
    for (name, value) in inbound {
        let name_str = name.as_str();
        if name_str == "host" || name_str == "content-length" {
            continue;
        }
        if CREDENTIAL_HEADERS.contains(&name_str) || HOP_BY_HOP.contains(&name_str) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    if force_identity_encoding {
        out.insert(header::ACCEPT_ENCODING, HeaderValue::from_static("identity"));
    }
    out
}

/// Copy upstream response headers, dropping the framing headers the relay
/// re-establishes, then apply the CORS/policy overlay.
pub fn relayed_headers(upstream: &HeaderMap) -> HeaderMap {
    let mut out = HeaderMap::with_capacity(upstream.len() + 3);
    for (name, value) in upstream {
        let name_str = name.as_str();
        // Body framing is re-established on the caller side; stale values
        // would corrupt the caller's decoding.
        if name_str == "content-length" || HOP_BY_HOP.contains(&name_str) {
            continue;
        }
        out.append(name.clone(), value.clone());
    }
    out.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    out.insert(
        header::ACCESS_CONTROL_EXPOSE_HEADERS,
        HeaderValue::from_static("*"),
    );
    out.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));
    out
}
