use super::{CheckKind, CheckResult, FailureKind};

pub const KEY_PREFIX: &str = "sk-";
pub const MIN_KEY_LENGTH: usize = 20;

pub const MISSING_KEY_MESSAGE: &str =
    "No API key found. Please set OPENAI_API_KEY in your .env file.";

/// Static shape validation of the key. Never touches the network.
pub fn check_format(key: Option<&str>) -> CheckResult {
    let key = match key.map(str::trim).filter(|k| !k.is_empty()) {
        Some(key) => key,
        None => {
            return CheckResult::fail(
                CheckKind::Format,
                FailureKind::Configuration,
                MISSING_KEY_MESSAGE,
            )
        }
    };

    if !key.starts_with(KEY_PREFIX) {
        return CheckResult::fail(
            CheckKind::Format,
            FailureKind::Configuration,
            "Invalid API key format. OpenAI API keys should start with 'sk-'.",
        );
    }

    if key.chars().count() < MIN_KEY_LENGTH {
        return CheckResult::fail(
            CheckKind::Format,
            FailureKind::Configuration,
            "API key seems too short. Please check your API key.",
        );
    }

    CheckResult::pass(CheckKind::Format, "API key format looks valid.")
}
