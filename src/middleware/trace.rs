//! Per-request tracing span.

use std::future::Future;
use std::time::Instant;

use http::Method;
use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `inner` inside a `request` span carrying method and path, then logs
/// the status and elapsed time.
pub async fn traced<F>(method: &Method, path: &str, inner: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("request", method = %method, path = %path);
    let started = Instant::now();

    let response = inner.instrument(span.clone()).await;

    span.in_scope(|| {
        info!(
            status = response.status_code().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
    });
    response
}
