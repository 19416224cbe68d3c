// HTTP request handlers

use super::routes::AppState;
use crate::error::Result;
use crate::metrics;
use crate::models::{parse_body, AnalysisResult};
use crate::prompt::PromptSet;
use crate::provider::ImageAnalysisProvider;
use axum::http::{header, StatusCode};
use axum::{
    extract::State,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, Instrument};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub checks: HashMap<String, HealthCheck>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheck {
    pub status: String,
    pub message: String,
}

pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let mut checks = HashMap::new();
    let mut overall_status = HealthStatus::Healthy;

    // Credential presence per provider. A missing key degrades that
    // pipeline without taking the process down.
    let mut credential_check = |name: &str, key: &Option<String>| {
        let check = match key.as_deref().filter(|k| !k.trim().is_empty()) {
            Some(_) => HealthCheck {
                status: "ok".to_string(),
                message: "API key configured".to_string(),
            },
            None => {
                overall_status = HealthStatus::Degraded;
                HealthCheck {
                    status: "warning".to_string(),
                    message: "API key not configured".to_string(),
                }
            }
        };
        checks.insert(format!("{}_credentials", name), check);
    };
    credential_check("openai", &state.config.openai.api_key);
    credential_check("gemini", &state.config.gemini.api_key);

    let config_check = HealthCheck {
        status: "ok".to_string(),
        message: format!(
            "openai: {}, gemini: {}",
            state.config.openai.api_base_url, state.config.gemini.api_base_url
        ),
    };
    checks.insert("configuration".to_string(), config_check);

    Json(HealthResponse {
        status: overall_status,
        checks,
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Prometheus text exposition endpoint.
pub async fn metrics_handler() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        metrics::gather_metrics(),
    )
        .into_response()
}

/// Acknowledge CORS preflight without touching the analysis pipeline.
pub async fn preflight_handler() -> impl IntoResponse {
    Json(json!({ "message": "CORS preflight OK" }))
}

/// Handler for `POST /v1/analyze/openai`.
pub async fn analyze_openai_handler(State(state): State<AppState>, body: String) -> Response {
    run_analysis(state.openai.as_ref(), &state, "/v1/analyze/openai", &body).await
}

/// Handler for `POST /v1/analyze/gemini`.
pub async fn analyze_gemini_handler(State(state): State<AppState>, body: String) -> Response {
    run_analysis(state.gemini.as_ref(), &state, "/v1/analyze/gemini", &body).await
}

/// Shared orchestration for both providers: parse, validate, normalize,
/// prompt, invoke, shape. Every failure converts to the uniform error
/// body via `AnalysisError::into_response`.
async fn run_analysis(
    provider: &dyn ImageAnalysisProvider,
    state: &AppState,
    endpoint: &str,
    body: &str,
) -> Response {
    let started = Instant::now();
    let span = tracing::info_span!(
        "analysis",
        provider = provider.name(),
        id = %Uuid::new_v4().simple()
    );

    let response = match execute(provider, state, body).instrument(span).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(err) => err.into_response(),
    };

    metrics::record_request(
        "POST",
        endpoint,
        response.status().as_u16(),
        provider.name(),
        started.elapsed().as_secs_f64(),
    );

    response
}

async fn execute(
    provider: &dyn ImageAnalysisProvider,
    state: &AppState,
    body: &str,
) -> Result<AnalysisResult> {
    let request = parse_body(body)?.validate()?;
    debug!("Validated analysis request for brand: {}", request.brand_name);

    let image = state.fetcher.normalize(&request.image_url).await?;
    let prompts = PromptSet::build(&request);

    let summary = provider.analyze(&prompts, &image).await?;
    info!("Analysis complete ({} chars)", summary.len());

    Ok(AnalysisResult {
        summary,
        brand: request.brand_name,
        brief: request.brief,
    })
}
