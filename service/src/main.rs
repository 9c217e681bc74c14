#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::print_stdout,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]

use axum::{http::StatusCode, response::IntoResponse, routing::get, Extension, Router};
use clap::Parser;
use members_api::{
    config::{Config, DEFAULT_CONFIG_FILE},
    db::build_member_repo,
    http::build_cors_layer,
    member,
    rest::ApiDoc,
};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// HTTP service exposing CRUD over member records.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// YAML configuration file (optional; environment variables override it)
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: String,
}

// Health check handler
async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let cli = Cli::parse();

    // Load and validate configuration first (fail-fast)
    let config = Config::load_from(&cli.config).map_err(|e| anyhow::anyhow!("{e}"))?;

    // Set up logging from config
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .init();

    // Init banner so container logs clearly show startup
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        backend = %config.storage_backend(),
        "members-api starting up"
    );

    let repo = build_member_repo(&config).await?;

    if config.cors.allowed_origins.iter().any(|o| o == "*") {
        tracing::info!("CORS allows any origin");
    } else {
        tracing::info!(origins = ?config.cors.allowed_origins, "CORS allowed origins configured");
    }

    // Build the API
    let mut app = Router::new()
        .merge(member::http::router())
        .route("/health", get(health_check));

    if config.swagger.enabled {
        tracing::info!("Swagger UI enabled at /swagger-ui");
        app = app.merge(
            SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()),
        );
    }

    let app = app
        .layer(Extension(repo))
        .layer(build_cors_layer(&config.cors))
        .layer(TraceLayer::new_for_http());

    // Start the server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
