//! Request logging tied to the auth gate's resolved caller.

use crate::auth::middleware::AuthUser;
use axum::{body::Body, http::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, warn};

/// Logs method, path, status, latency, and the caller the auth gate
/// resolved (or `anonymous` on public routes and rejected calls).
pub async fn request_logging(request: Request<Body>, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    // Health probes would drown out the publishing traffic
    if path == "/health" {
        return next.run(request).await;
    }

    let start = Instant::now();

    let response = next.run(request).await;

    let latency_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    // The gate mirrors the verified identity into response extensions
    let caller = response
        .extensions()
        .get::<AuthUser>()
        .map(|u| format!("{} ({})", u.id, u.role.as_str()))
        .unwrap_or_else(|| "anonymous".to_string());

    if status >= 500 {
        warn!(
            method = %method,
            path = %path,
            status,
            latency_ms,
            caller = %caller,
            "Request hit a server fault"
        );
    } else {
        info!(
            method = %method,
            path = %path,
            status,
            latency_ms,
            caller = %caller,
            "Handled request"
        );
    }

    response
}
