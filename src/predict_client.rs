use crate::config::Config;
use crate::errors::AppError;
use crate::models::PredictionResult;
use crate::payload::Payload;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use url::Url;

/// Path of the scoring endpoint, relative to the configured base URL.
pub const PREDICT_PATH: &str = "/predict";

/// Client for the credit score prediction endpoint.
#[derive(Clone)]
pub struct PredictClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PredictClient {
    /// Creates a client posting to `{base_url}/predict`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the prediction service. A path prefix is kept.
    /// * `timeout` - Request timeout. `None` lets a request stay pending indefinitely.
    ///
    /// # Returns
    ///
    /// * `Result<Self, AppError>` - The client, or `InternalError` for an
    ///   unparseable base URL.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let endpoint = predict_url(base_url)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| {
            AppError::InternalError(format!("Failed to create prediction client: {}", e))
        })?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        Self::new(&config.predict_base_url, config.predict_timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Posts the payload and parses the response body.
    ///
    /// The status code is not checked: a non-2xx response whose body is a
    /// valid result object is returned like any other.
    ///
    /// # Arguments
    ///
    /// * `payload` - The coerced form fields, sent as the JSON body.
    ///
    /// # Returns
    ///
    /// * `Result<PredictionResult, AppError>` - The parsed result, or
    ///   `Transport`, `InvalidJson` or `MissingField`.
    pub async fn predict(&self, payload: &Payload) -> Result<PredictionResult, AppError> {
        let body = payload.to_json_string().map_err(|e| {
            AppError::InternalError(format!("Failed to encode payload: {}", e))
        })?;

        tracing::info!("POST {} ({} fields)", self.endpoint, payload.len());
        tracing::debug!("Prediction payload: {}", body);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| AppError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Prediction endpoint returned {}", status);
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;

        let value: serde_json::Value =
            serde_json::from_slice(&bytes).map_err(|e| AppError::InvalidJson {
                status: status.as_u16(),
                message: e.to_string(),
            })?;

        let result = PredictionResult::from_value(value)?;
        tracing::info!(
            "Prediction received: score {}, {} suggestions",
            result.credit_score,
            result.suggestions.len()
        );
        Ok(result)
    }
}

/// Resolves `/predict` against a base URL, keeping any path prefix the base carries.
fn predict_url(base_url: &str) -> Result<Url, AppError> {
    let mut base = Url::parse(base_url.trim()).map_err(|e| {
        AppError::InternalError(format!("Invalid prediction base URL '{}': {}", base_url, e))
    })?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(PREDICT_PATH.trim_start_matches('/')).map_err(|e| {
        AppError::InternalError(format!("Invalid prediction URL: {}", e))
    })
}
