pub mod handlers;
pub mod types;

use crate::{Result, config::Config, llm::OpenAiClient, ocr::OcrClient};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

/// Room for multipart boundaries, part headers and small text fields on top
/// of the file size limit.
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub async fn run(config: Config) -> Result<()> {
    let llm = OpenAiClient::new(config.llm.clone());
    info!("Using model {} at {}", llm.model(), config.llm.base_url);

    let ocr = OcrClient::new(Arc::new(llm))
        .with_system_prompt(config.llm.system_prompt.clone())
        .with_max_tokens(config.llm.max_tokens);

    let app = router(AppState::new(ocr, config.upload.clone()));

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Server is running on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(state: AppState) -> Router {
    let body_limit = state.upload.max_file_size.saturating_add(MULTIPART_OVERHEAD);

    Router::new()
        .route("/", get(handlers::health))
        .route(
            "/api/ocr",
            post(handlers::ocr).layer(DefaultBodyLimit::max(body_limit)),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
