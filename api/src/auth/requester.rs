//! Requester middleware

use axum::{body::Body, http::Request, middleware::Next, response::Response};

use crate::error::AppError;

/// Header carrying the identity forwarded by the upstream auth layer
pub const REQUESTER_HEADER: &str = "X-User-Id";

/// Authenticated identity that triggered a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester(pub String);

impl std::fmt::Display for Requester {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn extract_requester(request: &Request<Body>) -> Option<Requester> {
    request
        .headers()
        .get(REQUESTER_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| Requester(id.to_string()))
}

/// Rejects requests without a forwarded identity and injects the
/// [`Requester`] into request extensions otherwise.
pub async fn requester_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let requester = extract_requester(&request).ok_or(AppError::Unauthorized)?;

    tracing::debug!(requester = %requester, "Request identity resolved");
    request.extensions_mut().insert(requester);

    Ok(next.run(request).await)
}
