//! HTTP middleware for the storefront API.
//!
//! Ordered in `main` (outermost first) as: Sentry capture, CORS, HTTP
//! tracing, request id, hardening headers. The two local layers live here;
//! the rest come from `tower-http` and `sentry-tower`.

pub mod request_id;
pub mod security_headers;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
