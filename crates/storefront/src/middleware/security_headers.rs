//! Response hardening headers.
//!
//! Everything this server produces is JSON for a browser-based client on
//! another origin, so the policy here is the API flavor of locked down: no
//! framing, no sniffing, no caching of per-visitor data, and an explicit
//! opt-in for cross-origin reads to match the CORS layer. Document-only
//! headers (COOP, Permissions-Policy) are deliberately not sent.

use axum::{
    extract::Request,
    http::{
        HeaderName, HeaderValue,
        header::{
            CACHE_CONTROL, CONTENT_SECURITY_POLICY, REFERRER_POLICY, X_CONTENT_TYPE_OPTIONS,
            X_FRAME_OPTIONS,
        },
    },
    middleware::Next,
    response::Response,
};

const CROSS_ORIGIN_RESOURCE_POLICY: HeaderName =
    HeaderName::from_static("cross-origin-resource-policy");

/// Fixed header set applied to every response.
const SECURITY_HEADERS: [(HeaderName, HeaderValue); 6] = [
    (X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff")),
    (X_FRAME_OPTIONS, HeaderValue::from_static("DENY")),
    (
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    ),
    (REFERRER_POLICY, HeaderValue::from_static("no-referrer")),
    // Cart and account responses are keyed to a visitor; nothing in between
    // may hold onto them.
    (CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0")),
    // The web client lives on a different origin and reads us through CORS.
    (
        CROSS_ORIGIN_RESOURCE_POLICY,
        HeaderValue::from_static("cross-origin"),
    ),
];

/// Stamp the hardening header set onto the response.
pub async fn security_headers_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;

    let headers = response.headers_mut();
    for (name, value) in SECURITY_HEADERS {
        headers.insert(name, value);
    }

    response
}
