//! Request tracing.

use std::future::Future;
use std::time::Instant;

use tracing::{Instrument, info, info_span};

use crate::response::Response;

/// Runs `fut` inside an `http.request` span and logs its outcome.
///
/// One `info` event is emitted per request, after the handler finishes,
/// carrying the response status and the elapsed time in milliseconds.
pub async fn instrument<F>(method: &http::Method, path: &str, fut: F) -> Response
where
    F: Future<Output = Response>,
{
    let span = info_span!("http.request", method = %method, path = %path);
    async move {
        let started = Instant::now();
        let response = fut.await;
        let latency_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        info!(status = response.status_code().as_u16(), latency_ms, "request completed");
        response
    }
    .instrument(span)
    .await
}
