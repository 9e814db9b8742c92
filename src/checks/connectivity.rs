use super::{rate_limit_message, CheckKind, CheckResult, FailureKind};
use crate::client::{ApiClient, ApiError};
use tracing::{debug, warn};

pub async fn check_connectivity(client: &dyn ApiClient) -> CheckResult {
    match client.list_models().await {
        Ok(models) => {
            debug!("Models endpoint listed {} models", models.len());
            CheckResult::pass(CheckKind::Connectivity, "Successfully connected to OpenAI API.")
                .with_detail(format!("{} models listed", models.len()))
        }
        Err(err) => {
            warn!("Connectivity check failed: {}", err);
            let kind = match FailureKind::from(&err) {
                // A 404 on the listing endpoint says nothing about models.
                FailureKind::ModelNotFound => FailureKind::Unexpected,
                kind => kind,
            };
            CheckResult::fail(CheckKind::Connectivity, kind, failure_message(kind, &err))
        }
    }
}

fn failure_message(kind: FailureKind, err: &ApiError) -> String {
    match (kind, err) {
        (FailureKind::Authentication, _) => {
            "Authentication failed. Please check your API key.".to_string()
        }
        (FailureKind::Authorization, _) => {
            "Access forbidden. Your API key may not have the required permissions.".to_string()
        }
        (FailureKind::RateLimit, _) => rate_limit_message(err),
        (_, ApiError::Timeout(_)) => {
            "Connection timeout. Please check your internet connection.".to_string()
        }
        (_, ApiError::Connection(_)) => {
            "Connection failed. Please check your internet connection.".to_string()
        }
        (_, ApiError::Status { status, message, .. }) => {
            format!("Unexpected response: {} - {}", status, message)
        }
        _ => format!("Unexpected error during connectivity test: {}", err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChatRequest, ChatResponse};
    use async_trait::async_trait;
    use std::time::Duration;

    struct ListingClient(Result<Vec<String>, ApiError>);

    #[async_trait]
    impl ApiClient for ListingClient {
        async fn list_models(&self) -> Result<Vec<String>, ApiError> {
            self.0.clone()
        }

        async fn retrieve_model(&self, id: &str) -> Result<String, ApiError> {
            Ok(id.to_string())
        }

        async fn chat_completion(&self, _request: &ChatRequest) -> Result<ChatResponse, ApiError> {
            Ok(ChatResponse::default())
        }
    }

    fn status(status: u16) -> ApiError {
        ApiError::Status {
            status,
            message: "nope".to_string(),
            code: None,
        }
    }

    #[tokio::test]
    async fn test_connectivity_success() {
        let client = ListingClient(Ok(vec!["gpt-3.5-turbo".to_string()]));
        let result = check_connectivity(&client).await;
        assert!(result.passed);
        assert_eq!(result.detail.as_deref(), Some("1 models listed"));
    }

    #[tokio::test]
    async fn test_authentication_is_not_network() {
        let client = ListingClient(Err(status(401)));
        let result = check_connectivity(&client).await;
        assert!(!result.passed);
        assert_eq!(result.failure, Some(FailureKind::Authentication));
        assert!(result.message.starts_with("Authentication failed"));
    }

    #[tokio::test]
    async fn test_forbidden() {
        let client = ListingClient(Err(status(403)));
        let result = check_connectivity(&client).await;
        assert_eq!(result.failure, Some(FailureKind::Authorization));
        assert!(result.message.starts_with("Access forbidden"));
    }

    #[tokio::test]
    async fn test_timeout_and_connection() {
        let client = ListingClient(Err(ApiError::Timeout(Duration::from_secs(10))));
        let result = check_connectivity(&client).await;
        assert_eq!(result.failure, Some(FailureKind::Network));
        assert!(result.message.starts_with("Connection timeout"));

        let client = ListingClient(Err(ApiError::Connection("refused".to_string())));
        let result = check_connectivity(&client).await;
        assert_eq!(result.failure, Some(FailureKind::Network));
        assert!(result.message.starts_with("Connection failed"));
    }

    #[tokio::test]
    async fn test_unexpected_status() {
        let client = ListingClient(Err(status(500)));
        let result = check_connectivity(&client).await;
        assert_eq!(result.failure, Some(FailureKind::Unexpected));
        assert_eq!(result.message, "Unexpected response: 500 - nope");

        let client = ListingClient(Err(status(404)));
        let result = check_connectivity(&client).await;
        assert_eq!(result.failure, Some(FailureKind::Unexpected));
    }
}
