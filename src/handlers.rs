use crate::config::Config;
use crate::errors::AppError;
use crate::form::{FormFields, SubmitEvent};
use crate::page::{CreditPage, FORM_ID};
use crate::predict_client::PredictClient;
use crate::render::RenderOptions;
use crate::submitter::FormSubmitter;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::Html,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Client for the prediction endpoint, shared by all submissions.
    pub client: PredictClient,
    /// Rendering switches from configuration.
    pub render_options: RenderOptions,
}

impl AppState {
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: PredictClient::from_config(config)?,
            render_options: RenderOptions {
                raw_html: config.render_raw_html,
            },
        })
    }
}

/// Builds the form host router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/submit", post(submit))
        .layer(ServiceBuilder::new().layer(RequestBodyLimitLayer::new(64 * 1024)))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "credit-form",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// GET /
///
/// Serves the credit form with empty result regions.
pub async fn index() -> Html<String> {
    Html(CreditPage::in_memory().to_html())
}

/// POST /submit
///
/// Takes the browser's urlencoded form body, runs one submission against a
/// fresh page and answers with that page, regions filled.
pub async fn submit(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Html<String>, AppError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    if !content_type.starts_with("application/x-www-form-urlencoded") {
        return Err(AppError::BadRequest(format!(
            "expected application/x-www-form-urlencoded body, got '{}'",
            content_type
        )));
    }

    let fields = FormFields::from_urlencoded(&body);
    tracing::info!("POST /submit - {} fields", fields.len());

    let page = CreditPage::in_memory();
    let submitter = FormSubmitter::new(state.client.clone(), page.clone(), state.render_options);

    let mut event = SubmitEvent::new(FORM_ID, fields);
    submitter.handle_submit(&mut event).await?;

    Ok(Html(page.to_html()))
}
