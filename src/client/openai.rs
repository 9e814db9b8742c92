use super::{ApiClient, ApiError, ChatRequest, ChatResponse};
use crate::config::Config;
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use tracing::debug;

const MAX_ERROR_BODY: usize = 200;

#[derive(Debug, Deserialize)]
struct ModelList {
    #[serde(default)]
    data: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

/// reqwest-backed client for any OpenAI-compatible endpoint.
pub struct OpenAiClient {
    client: Client,
    config: Config,
    api_key: String,
}

impl OpenAiClient {
    pub fn new(config: &Config, api_key: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("keyprobe/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
            api_key: api_key.into(),
        })
    }

    /// `{base}/v1/models/{id}` with `id` percent-encoded as a single path
    /// segment, so `#`, `?` and `/` stay part of the id.
    fn model_url(&self, id: &str) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.config.endpoint("models"))
            .map_err(|e| ApiError::Transport(format!("Invalid API base: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::Transport("API base cannot hold a path".to_string()))?
            .push(id);
        Ok(url)
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = response.status();
        debug!("Response status: {}", status);
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status.as_u16(), &body))
    }

    fn transport_error(&self, err: reqwest::Error) -> ApiError {
        if err.is_timeout() {
            ApiError::Timeout(self.config.timeout)
        } else if err.is_connect() {
            ApiError::Connection(error_chain(&err))
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(error_chain(&err))
        }
    }
}

#[async_trait]
impl ApiClient for OpenAiClient {
    async fn list_models(&self) -> Result<Vec<String>, ApiError> {
        let url = self.config.endpoint("models");
        debug!("GET {}", url);

        let response = self.send(self.client.get(&url)).await?;
        let list: ModelList = response.json().await.map_err(|e| self.transport_error(e))?;

        Ok(list.data.into_iter().filter_map(|m| m.id).collect())
    }

    async fn retrieve_model(&self, id: &str) -> Result<String, ApiError> {
        let url = self.model_url(id)?;
        debug!("GET {}", url);

        let response = self.send(self.client.get(url)).await?;
        let info: ModelInfo = response.json().await.map_err(|e| self.transport_error(e))?;

        Ok(info.id.unwrap_or_else(|| id.to_string()))
    }

    async fn chat_completion(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let url = self.config.endpoint("chat/completions");
        debug!("POST {} (model: {})", url, request.model);

        let response = self.send(self.client.post(&url).json(request)).await?;
        response.json().await.map_err(|e| self.transport_error(e))
    }
}

/// Builds a status error, preferring the message and code from an
/// OpenAI-style `{"error": {...}}` body over the raw text.
pub(crate) fn status_error(status: u16, body: &str) -> ApiError {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(envelope) => {
            let code = envelope.error.code.and_then(|code| match code {
                serde_json::Value::String(s) => Some(s),
                serde_json::Value::Null => None,
                other => Some(other.to_string()),
            });
            ApiError::Status {
                status,
                message: envelope
                    .error
                    .message
                    .unwrap_or_else(|| truncate(body, MAX_ERROR_BODY)),
                code,
            }
        }
        Err(_) => ApiError::Status {
            status,
            message: truncate(body.trim(), MAX_ERROR_BODY),
            code: None,
        },
    }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let mut cut: String = text.chars().take(max).collect();
        cut.push_str("...");
        cut
    }
}

fn error_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
