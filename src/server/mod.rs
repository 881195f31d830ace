mod handlers;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use log::info;
use tower_http::cors::{Any, CorsLayer};

use crate::config::ServerConfig;
use crate::pipeline::RecipePipeline;

/// Read-only state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<RecipePipeline>,
}

/// Assemble the application router around a pipeline
pub fn build_router(pipeline: Arc<RecipePipeline>) -> Router {
    let state = AppState { pipeline };

    Router::new()
        // Interactive form
        .route("/", get(handlers::index))
        // Ingredient detection from an uploaded photo
        .route("/detect", post(handlers::detect))
        // Recipe generation from an ingredient string
        .route("/recipe", post(handlers::recipe))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

/// Bind and run the web frontend until the process exits
pub async fn serve(
    config: &ServerConfig,
    pipeline: Arc<RecipePipeline>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = build_router(pipeline);

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
