// HTTP routes configuration

use super::handlers::{
    analyze_gemini_handler, analyze_openai_handler, health_handler, metrics_handler,
    preflight_handler,
};
use super::middleware::{append_cors_headers, request_id_layers};
use crate::config::AppConfig;
use crate::error::Result;
use crate::gemini::GeminiClient;
use crate::openai::OpenAiClient;
use crate::vision::ImageFetcher;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub openai: Arc<OpenAiClient>,
    pub gemini: Arc<GeminiClient>,
    pub fetcher: Arc<ImageFetcher>,
}

pub fn create_router(
    config: AppConfig,
    openai: OpenAiClient,
    gemini: GeminiClient,
) -> Result<Router> {
    let fetcher = Arc::new(ImageFetcher::new(&config.fetch)?);
    let max_body_bytes = config.server.max_body_bytes;

    let state = AppState {
        config,
        openai: Arc::new(openai),
        gemini: Arc::new(gemini),
        fetcher,
    };

    let (set_request_id, propagate_request_id) = request_id_layers();

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route(
            "/v1/analyze/openai",
            post(analyze_openai_handler).options(preflight_handler),
        )
        .route(
            "/v1/analyze/gemini",
            post(analyze_gemini_handler).options(preflight_handler),
        )
        // Fixed CORS header set on every response, whatever the path
        .layer(axum::middleware::map_response(append_cors_headers))
        // Allow large request bodies for base64-encoded inline images
        .layer(tower_http::limit::RequestBodyLimitLayer::new(max_body_bytes))
        .layer(TraceLayer::new_for_http())
        .layer(propagate_request_id)
        .layer(set_request_id)
        .with_state(state);

    Ok(app)
}
