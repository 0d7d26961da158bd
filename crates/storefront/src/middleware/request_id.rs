//! Request id assignment and propagation.

use axum::{extract::Request, http::HeaderValue, middleware::Next, response::Response};
use tracing::Span;
use uuid::Uuid;

/// Header carrying the request id, inbound and outbound.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Longest inbound id we will adopt instead of minting our own.
const MAX_INBOUND_ID_LEN: usize = 64;

/// Give every request an id and echo it on the response.
///
/// A reasonable-looking id supplied by an upstream proxy is adopted so one
/// id follows the request across hops; anything absent, oversized, or
/// non-ASCII is replaced with a fresh UUID v4. The id is recorded on the
/// current tracing span and tagged onto the Sentry scope so log lines and
/// error reports for the same request correlate.
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = inbound_request_id(&request)
        .map_or_else(|| Uuid::new_v4().to_string(), str::to_owned);

    Span::current().record("request_id", &request_id);
    sentry::configure_scope(|scope| {
        scope.set_tag("request_id", &request_id);
    });

    let mut response = next.run(request).await;

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

/// The usable id from the inbound headers, if one was sent.
fn inbound_request_id(request: &Request) -> Option<&str> {
    request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|id| {
            !id.is_empty()
                && id.len() <= MAX_INBOUND_ID_LEN
                && id.bytes().all(|b| b.is_ascii_graphic())
        })
}
