pub mod completion;
pub mod connectivity;
pub mod format;
pub mod models;

pub use completion::check_completion;
pub use connectivity::check_connectivity;
pub use format::check_format;
pub use models::check_model_availability;

use crate::client::ApiError;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CheckKind {
    Format,
    Connectivity,
    ModelAvailability,
    Completion,
}

impl CheckKind {
    pub const ALL: [CheckKind; 4] = [
        CheckKind::Format,
        CheckKind::Connectivity,
        CheckKind::ModelAvailability,
        CheckKind::Completion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CheckKind::Format => "Format",
            CheckKind::Connectivity => "Connectivity",
            CheckKind::ModelAvailability => "Model Availability",
            CheckKind::Completion => "Completion",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a check failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FailureKind {
    Configuration,
    Authentication,
    Authorization,
    Network,
    RateLimit,
    ModelNotFound,
    Unexpected,
}

impl From<&ApiError> for FailureKind {
    fn from(err: &ApiError) -> Self {
        match err {
            ApiError::Timeout(_) | ApiError::Connection(_) => FailureKind::Network,
            ApiError::Status { status, code, .. } => match (code.as_deref(), *status) {
                (Some("invalid_api_key"), _) => FailureKind::Authentication,
                (Some("model_not_found"), _) => FailureKind::ModelNotFound,
                (_, 401) => FailureKind::Authentication,
                (_, 403) => FailureKind::Authorization,
                (_, 404) => FailureKind::ModelNotFound,
                (_, 429) => FailureKind::RateLimit,
                _ => FailureKind::Unexpected,
            },
            ApiError::InvalidResponse(_) | ApiError::Transport(_) => FailureKind::Unexpected,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CheckResult {
    pub kind: CheckKind,
    pub passed: bool,
    pub message: String,
    pub failure: Option<FailureKind>,
    /// Resolved model for the availability check, response text for the
    /// completion check.
    pub detail: Option<String>,
}

impl CheckResult {
    pub fn pass(kind: CheckKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            passed: true,
            message: message.into(),
            failure: None,
            detail: None,
        }
    }

    pub fn fail(kind: CheckKind, failure: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            passed: false,
            message: message.into(),
            failure: Some(failure),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

fn quota_exhausted(err: &ApiError) -> bool {
    err.code() == Some("insufficient_quota")
}

fn rate_limit_message(err: &ApiError) -> String {
    if quota_exhausted(err) {
        "Quota exceeded. Please check your plan and billing details.".to_string()
    } else {
        "Rate limit exceeded. Please wait a moment and try again.".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status(status: u16, code: Option<&str>) -> ApiError {
        ApiError::Status {
            status,
            message: "error".to_string(),
            code: code.map(str::to_string),
        }
    }

    #[test]
    fn test_failure_classification() {
        assert_eq!(
            FailureKind::from(&ApiError::Timeout(Duration::from_secs(1))),
            FailureKind::Network
        );
        assert_eq!(
            FailureKind::from(&ApiError::Connection("refused".to_string())),
            FailureKind::Network
        );
        assert_eq!(FailureKind::from(&status(401, None)), FailureKind::Authentication);
        assert_eq!(FailureKind::from(&status(403, None)), FailureKind::Authorization);
        assert_eq!(FailureKind::from(&status(404, None)), FailureKind::ModelNotFound);
        assert_eq!(FailureKind::from(&status(429, None)), FailureKind::RateLimit);
        assert_eq!(FailureKind::from(&status(500, None)), FailureKind::Unexpected);
        assert_eq!(
            FailureKind::from(&ApiError::InvalidResponse("bad json".to_string())),
            FailureKind::Unexpected
        );
    }

    #[test]
    fn test_error_code_overrides_status() {
        assert_eq!(
            FailureKind::from(&status(400, Some("invalid_api_key"))),
            FailureKind::Authentication
        );
        assert_eq!(
            FailureKind::from(&status(400, Some("model_not_found"))),
            FailureKind::ModelNotFound
        );
    }

    #[test]
    fn test_rate_limit_message() {
        assert!(rate_limit_message(&status(429, None)).starts_with("Rate limit exceeded"));
        assert!(rate_limit_message(&status(429, Some("insufficient_quota"))).starts_with("Quota exceeded"));
    }

    #[test]
    fn test_check_kind_labels() {
        let labels: Vec<&str> = CheckKind::ALL.iter().map(|k| k.label()).collect();
        assert_eq!(
            labels,
            vec!["Format", "Connectivity", "Model Availability", "Completion"]
        );
    }
}
