//! Security headers middleware.

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request},
    middleware::Next,
    response::Response,
};

use crate::app::AppState;

pub const X_CONTENT_TYPE_OPTIONS: &str = "x-content-type-options";
pub const X_FRAME_OPTIONS: &str = "x-frame-options";
pub const X_XSS_PROTECTION: &str = "x-xss-protection";

const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains";

/// Adds nosniff, frame-deny and XSS headers to every response, plus HSTS
/// when `security.hsts_enabled` is set.
pub async fn security_headers_middleware(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();

    headers.insert(
        header::HeaderName::from_static(X_CONTENT_TYPE_OPTIONS),
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(
        header::HeaderName::from_static(X_FRAME_OPTIONS),
        HeaderValue::from_static("DENY"),
    );
    headers.insert(
        header::HeaderName::from_static(X_XSS_PROTECTION),
        HeaderValue::from_static("1; mode=block"),
    );

    if state.config.security.hsts_enabled {
        headers.insert(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static(HSTS_VALUE),
        );
    }

    response
}
