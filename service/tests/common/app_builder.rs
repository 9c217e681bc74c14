//! Test app builder that mirrors main.rs wiring with injectable deps/mocks.
//!
//! This module provides a [`TestAppBuilder`] that constructs an Axum router matching
//! the production configuration in `main.rs`, but with the ability to inject
//! a member store and test-specific configurations.
//!
//! # Usage
//!
//! ```ignore
//! use crate::common::app_builder::TestAppBuilder;
//!
//! #[tokio::test]
//! async fn test_with_full_app() {
//!     let app = TestAppBuilder::with_memory_store()
//!         .with_cors(&["http://localhost:3000"])
//!         .build();
//!
//!     // Use app.oneshot(...) to send requests
//! }
//! ```
//!
//! # Preset Builders
//!
//! - [`TestAppBuilder::minimal()`] - Health check only
//! - [`TestAppBuilder::with_memory_store()`] - Full app over a fresh in-memory store

use std::sync::Arc;

use axum::{http::StatusCode, response::IntoResponse, routing::get, Extension, Router};
use members_api::{
    config::CorsConfig,
    http::build_cors_layer,
    member::{self, InMemoryMemberRepo, MemberRepo, PgMemberRepo},
    rest::ApiDoc,
};
use sqlx::PgPool;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Health check handler (mirrors main.rs)
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

/// Builder for test applications.
///
/// Allows selective inclusion of routes and middleware, using the same
/// layer ordering and configuration as production.
pub struct TestAppBuilder {
    /// Whether to include health check route
    include_health: bool,
    /// Whether to include Swagger UI
    include_swagger: bool,
    /// Member store for the CRUD routes (None leaves them out)
    member_repo: Option<Arc<dyn MemberRepo>>,
    /// CORS allowed origins (None means no CORS layer)
    cors_origins: Option<Vec<String>>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestAppBuilder {
    /// Create a new empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            include_health: false,
            include_swagger: false,
            member_repo: None,
            cors_origins: None,
        }
    }

    // =========================================================================
    // Preset Builders
    // =========================================================================

    /// Create a minimal app with only the health check endpoint.
    #[must_use]
    pub fn minimal() -> Self {
        Self::new().with_health()
    }

    /// Create a full app backed by a fresh in-memory store.
    ///
    /// Mirrors production main.rs wiring with the default CORS policy.
    #[must_use]
    pub fn with_memory_store() -> Self {
        Self::new()
            .with_members(Arc::new(InMemoryMemberRepo::new()))
            .with_health()
            .with_default_cors()
    }

    // =========================================================================
    // Component Configuration
    // =========================================================================

    /// Include member routes (/api/v1/members) over the given store.
    #[must_use]
    pub fn with_members(mut self, repo: Arc<dyn MemberRepo>) -> Self {
        self.member_repo = Some(repo);
        self
    }

    /// Include member routes over a `PostgreSQL` pool.
    #[must_use]
    pub fn with_member_pool(self, pool: PgPool) -> Self {
        self.with_members(Arc::new(PgMemberRepo::new(pool)))
    }

    /// Include health check route (/health).
    #[must_use]
    pub fn with_health(mut self) -> Self {
        self.include_health = true;
        self
    }

    /// Include Swagger UI (/swagger-ui).
    #[must_use]
    pub fn with_swagger(mut self) -> Self {
        self.include_swagger = true;
        self
    }

    /// Configure CORS with specific allowed origins.
    ///
    /// Pass an empty slice to block all cross-origin requests.
    /// Pass `&["*"]` to allow any origin.
    #[must_use]
    pub fn with_cors(mut self, origins: &[&str]) -> Self {
        self.cors_origins = Some(origins.iter().map(|s| (*s).to_string()).collect());
        self
    }

    /// Configure CORS exactly as production defaults do.
    #[must_use]
    pub fn with_default_cors(mut self) -> Self {
        self.cors_origins = Some(CorsConfig::default().allowed_origins);
        self
    }

    // =========================================================================
    // Build
    // =========================================================================

    /// Build the Axum router.
    ///
    /// The layer ordering matches main.rs exactly:
    /// 1. Routes (members, health, Swagger)
    /// 2. Member store extension
    /// 3. CORS layer
    /// 4. Request tracing (outermost)
    #[must_use]
    pub fn build(self) -> Router {
        let mut app = Router::new();

        if self.member_repo.is_some() {
            app = app.merge(member::http::router());
        }

        if self.include_health {
            app = app.route("/health", get(health_check));
        }

        if self.include_swagger {
            app = app.merge(
                SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
        }

        if let Some(repo) = self.member_repo {
            app = app.layer(Extension(repo));
        }

        if let Some(allowed_origins) = self.cors_origins {
            app = app.layer(build_cors_layer(&CorsConfig { allowed_origins }));
        }

        app.layer(TraceLayer::new_for_http())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_minimal_builder_creates_health_route() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_minimal_builder_omits_member_routes() {
        let app = TestAppBuilder::minimal().build();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/members")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
