//! Cross-origin policy for browser clients.

use axum::http::{header::CONTENT_TYPE, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::config::CorsConfig;

/// Methods the member API answers cross-origin.
pub const ALLOWED_METHODS: [Method; 4] = [Method::GET, Method::POST, Method::PUT, Method::DELETE];

/// Build the CORS layer from configuration.
///
/// `"*"` anywhere in the origin list allows any origin. An empty list blocks
/// cross-origin requests. Only `Content-Type` is accepted as a request header
/// and credentials are never allowed.
#[must_use]
pub fn build_cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins = &config.allowed_origins;
    let allow_origin: AllowOrigin = if origins.iter().any(|o| o == "*") {
        AllowOrigin::any()
    } else if origins.is_empty() {
        AllowOrigin::list(Vec::<HeaderValue>::new())
    } else {
        let header_values: Vec<HeaderValue> = origins
            .iter()
            .filter_map(|origin| origin.parse().ok())
            .collect();
        AllowOrigin::list(header_values)
    };

    CorsLayer::new()
        .allow_methods(ALLOWED_METHODS)
        .allow_headers([CONTENT_TYPE])
        .allow_origin(allow_origin)
}
