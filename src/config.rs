use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub predict_base_url: String,
    pub port: u16,
    pub predict_timeout: Option<Duration>,
    pub render_raw_html: bool,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            predict_base_url: std::env::var("PREDICT_BASE_URL")
                .map_err(|_| anyhow::anyhow!("PREDICT_BASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("PREDICT_BASE_URL cannot be empty");
                    }
                    if !url.starts_with("http://") && !url.starts_with("https://") {
                        anyhow::bail!("PREDICT_BASE_URL must start with http:// or https://");
                    }
                    Ok(url)
                })?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            predict_timeout: match std::env::var("PREDICT_TIMEOUT_SECS")
                .ok()
                .filter(|s| !s.trim().is_empty())
            {
                Some(raw) => Some(parse_timeout(&raw)?),
                None => None,
            },
            render_raw_html: match std::env::var("RENDER_RAW_HTML") {
                Ok(raw) => parse_flag(&raw)?,
                Err(_) => false,
            },
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Prediction base URL: {}", config.predict_base_url);
        tracing::debug!("Server Port: {}", config.port);
        match config.predict_timeout {
            Some(timeout) => tracing::info!("Prediction timeout: {:?}", timeout),
            None => tracing::debug!("Prediction timeout: none"),
        }
        if config.render_raw_html {
            tracing::warn!("RENDER_RAW_HTML enabled: suggestions are inserted without escaping");
        }

        Ok(config)
    }
}

fn parse_timeout(raw: &str) -> anyhow::Result<Duration> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("PREDICT_TIMEOUT_SECS must be a whole number of seconds"))?;
    if secs == 0 {
        anyhow::bail!("PREDICT_TIMEOUT_SECS must be greater than zero");
    }
    Ok(Duration::from_secs(secs))
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("RENDER_RAW_HTML must be a boolean, got '{}'", other),
    }
}
