//! catalog-gateway server entry point.
//!
//! Starts the Axum HTTP server with the versioned REST endpoints.

use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::StatusCode;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use catalog_gateway::api;
use catalog_gateway::app_state::AppState;
use catalog_gateway::config::{GatewayConfig, LogFormat};
use catalog_gateway::notify::Notifiers;
use catalog_gateway::persistence::{InMemoryCatalogStore, PostgresCatalogStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = GatewayConfig::from_env().context("invalid LISTEN_ADDR")?;

    // Initialize tracing
    init_tracing(config.log_format);
    tracing::info!(addr = %config.listen_addr, "starting catalog-gateway");

    // Build notification channels
    let notifiers = Notifiers::from_config(&config);
    tracing::info!(channels = ?notifiers, "stock alert channels");

    // Build storage and application state
    let app_state = if config.persistence_enabled {
        let store = PostgresCatalogStore::connect(&config)
            .await
            .context("failed to connect to PostgreSQL")?;
        store.migrate().await.context("failed to run migrations")?;
        tracing::info!("PostgreSQL catalog ready");
        AppState::from_store(store, notifiers)
    } else {
        tracing::warn!("persistence disabled, serving the in-memory demo catalog");
        AppState::from_store(InMemoryCatalogStore::demo(), notifiers)
    };

    // Build router
    let app = with_docs(api::build_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    Duration::from_secs(config.request_timeout_secs),
                )),
        )
        .with_state(app_state);

    // Start server
    let listener = tokio::net::TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!(addr = %config.listen_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

#[cfg(feature = "swagger-ui")]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    use utoipa::OpenApi;
    use utoipa_swagger_ui::SwaggerUi;

    router.merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api::ApiDoc::openapi()))
}

#[cfg(not(feature = "swagger-ui"))]
fn with_docs(router: Router<AppState>) -> Router<AppState> {
    router
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
