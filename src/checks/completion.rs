use super::{rate_limit_message, CheckKind, CheckResult, FailureKind};
use crate::client::{ApiClient, ApiError, ChatMessage, ChatRequest};
use tracing::{debug, warn};

pub const TEST_PROMPT: &str =
    "Hello! Please respond with 'API test successful' if you can see this message.";
pub const MAX_TOKENS: u32 = 50;
pub const TEMPERATURE: f32 = 0.1;

pub fn completion_request(model: &str) -> ChatRequest {
    ChatRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(TEST_PROMPT)],
        max_tokens: MAX_TOKENS,
        temperature: TEMPERATURE,
    }
}

/// End-to-end probe: one short chat completion. On success `detail` holds
/// the trimmed response text.
pub async fn check_completion(client: &dyn ApiClient, model: &str) -> CheckResult {
    let request = completion_request(model);

    match client.chat_completion(&request).await {
        Ok(response) => match response.first_text() {
            Some(text) => {
                debug!("Completion returned {} chars", text.len());
                CheckResult::pass(CheckKind::Completion, "Simple completion test successful!")
                    .with_detail(text)
            }
            None => CheckResult::fail(
                CheckKind::Completion,
                FailureKind::Unexpected,
                "Completion test failed - no response received.",
            ),
        },
        Err(err) => {
            warn!("Completion check failed: {}", err);
            let kind = FailureKind::from(&err);
            CheckResult::fail(CheckKind::Completion, kind, failure_message(kind, &err))
        }
    }
}

fn failure_message(kind: FailureKind, err: &ApiError) -> String {
    match (kind, err) {
        (FailureKind::Authentication, _) => {
            "Authentication failed during completion test.".to_string()
        }
        (FailureKind::Authorization, _) => {
            format!("Access forbidden during completion test: {}", err)
        }
        (FailureKind::RateLimit, _) => rate_limit_message(err),
        (_, ApiError::Timeout(_)) => {
            "Completion request timed out. Please check your internet connection and try again."
                .to_string()
        }
        (_, ApiError::Connection(_)) => {
            "Connection failed during completion test. Please check your internet connection."
                .to_string()
        }
        (_, ApiError::Status { .. }) => format!("API error during completion test: {}", err),
        _ => format!("Unexpected error during completion test: {}", err),
    }
}
