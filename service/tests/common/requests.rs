//! Request helpers shared by the HTTP test suites.

use axum::{
    body::{to_bytes, Body},
    http::{header::CONTENT_TYPE, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

/// Maximum body size read back from a response.
const BODY_LIMIT: usize = 1024 * 1024;

/// Status plus raw body of a completed request.
pub struct TestResponse {
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse the body as JSON.
    ///
    /// # Panics
    ///
    /// Panics if the body is not JSON.
    #[allow(clippy::expect_used)]
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body should be JSON")
    }

    /// Body as UTF-8 text.
    ///
    /// # Panics
    ///
    /// Panics if the body is not UTF-8.
    #[allow(clippy::expect_used)]
    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).expect("utf8")
    }
}

#[allow(clippy::expect_used)]
async fn collect(response: Response) -> TestResponse {
    let status = response.status();
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    let body = to_bytes(response.into_body(), BODY_LIMIT)
        .await
        .expect("body")
        .to_vec();
    TestResponse {
        status,
        content_type,
        body,
    }
}

/// Send a request with an optional JSON body through a clone of `app`.
///
/// # Panics
///
/// Panics if the request cannot be built or the router errors.
#[allow(clippy::expect_used)]
pub async fn send(app: &Router, method: Method, uri: &str, body: Option<&str>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).expect("request"))
        .await
        .expect("response");

    collect(response).await
}
