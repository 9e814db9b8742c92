use super::{CheckKind, CheckResult, FailureKind};
use crate::client::{ApiClient, ApiError};
use tracing::{debug, info, warn};

/// Tried in order when the configured model is missing.
pub const FALLBACK_MODELS: &[&str] = &["gpt-3.5-turbo", "gpt-4o-mini"];

/// Probes the configured model, then the fallbacks. On success `detail`
/// holds the model that should be used for the completion test.
pub async fn check_model_availability(client: &dyn ApiClient, model: &str) -> CheckResult {
    let err = match client.retrieve_model(model).await {
        Ok(_) => {
            return CheckResult::pass(
                CheckKind::ModelAvailability,
                format!("Model {} is available.", model),
            )
            .with_detail(model)
        }
        Err(err) => err,
    };

    if FailureKind::from(&err) != FailureKind::ModelNotFound {
        warn!("Model lookup for {} failed: {}", model, err);
        return CheckResult::fail(
            CheckKind::ModelAvailability,
            FailureKind::from(&err),
            format!("Error checking model availability: {}", err),
        );
    }

    info!("Model {} not found, trying fallbacks", model);
    let mut first_hard_error: Option<ApiError> = None;

    for candidate in FALLBACK_MODELS.iter().copied().filter(|c| *c != model) {
        match client.retrieve_model(candidate).await {
            Ok(_) => {
                return CheckResult::pass(
                    CheckKind::ModelAvailability,
                    format!(
                        "Model {} not found. Fallback model {} is available.",
                        model, candidate
                    ),
                )
                .with_detail(candidate)
            }
            Err(err) => {
                debug!("Fallback model {} unavailable: {}", candidate, err);
                if FailureKind::from(&err) != FailureKind::ModelNotFound && first_hard_error.is_none() {
                    first_hard_error = Some(err);
                }
            }
        }
    }

    match first_hard_error {
        Some(err) => CheckResult::fail(
            CheckKind::ModelAvailability,
            FailureKind::from(&err),
            format!(
                "Model {} not found, and checking fallback models failed: {}",
                model, err
            ),
        ),
        None => CheckResult::fail(
            CheckKind::ModelAvailability,
            FailureKind::ModelNotFound,
            format!(
                "Neither {} nor any fallback model ({}) is available.",
                model,
                FALLBACK_MODELS.join(", ")
            ),
        ),
    }
}
