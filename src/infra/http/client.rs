use crate::config::Config;
use crate::error::AppError;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Instant;
use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Shared JSON transport for the REST adapters.
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config, auth_token: Option<String>) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(config.api_timeout)
            .build()
            .map_err(|e| AppError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.api_base_url.clone(), auth_token))
    }

    pub fn with_client(client: Client, base_url: String, auth_token: Option<String>) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            auth_token,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AppError> {
        let body = self.execute(Method::GET, path, None).await?;
        serde_json::from_str(&body).map_err(|e| {
            error!("Malformed response from {}: {}", path, e);
            AppError::from(e)
        })
    }

    /// Sends `payload` and returns the raw response body (possibly empty).
    pub async fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        payload: &B,
    ) -> Result<String, AppError> {
        let json = serde_json::to_value(payload)?;
        self.execute(method, path, Some(json)).await
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        payload: Option<serde_json::Value>,
    ) -> Result<String, AppError> {
        let request_id = Uuid::new_v4().to_string();
        let span = info_span!(
            "api_request",
            request_id = %request_id,
            method = %method,
            path = %path,
        );

        async move {
            let started = Instant::now();
            let mut request = self.client
                .request(method, self.url(path))
                .header(REQUEST_ID_HEADER, &request_id);

            if let Some(token) = &self.auth_token {
                request = request.bearer_auth(token);
            }
            if let Some(json) = &payload {
                request = request.json(json);
            }

            let res = request.send().await.map_err(|e| {
                let msg = format!("API connection error: {}", e);
                error!("{}", msg);
                AppError::Transport(msg)
            })?;

            let status = res.status();
            let text = res.text().await.map_err(|e| {
                let msg = format!("Failed to read API response: {}", e);
                error!("{}", msg);
                AppError::Transport(msg)
            })?;

            info!(
                status = status.as_u16(),
                latency_ms = started.elapsed().as_millis(),
                "finished api request"
            );

            if !status.is_success() {
                let message = extract_error_message(&text)
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("Request failed").to_string());
                error!("API request failed. Status: {}, Body: {}", status, text);
                return Err(AppError::Server { status: status.as_u16(), message });
            }

            Ok(text)
        }
            .instrument(span)
            .await
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("error")
        .or_else(|| value.get("message"))
        .and_then(|m| m.as_str())
        .map(str::to_string)
}
