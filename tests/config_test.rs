use keyprobe::config::{
    Config, ConfigError, API_BASE_VAR, API_KEY_VAR, DEFAULT_API_BASE, DEFAULT_MODEL, MODEL_VAR,
    TIMEOUT_VAR,
};
use std::env;
use std::io::Write;
use std::time::Duration;

const VARS: [&str; 4] = [API_KEY_VAR, API_BASE_VAR, MODEL_VAR, TIMEOUT_VAR];

// Everything that touches the process environment lives in one test so the
// cases cannot race each other.
#[test]
fn test_config_from_env_and_env_file() {
    let saved: Vec<(&str, Option<String>)> = VARS.iter().map(|v| (*v, env::var(v).ok())).collect();
    for var in VARS {
        env::remove_var(var);
    }

    // Nothing set
    let config = Config::from_env().unwrap();
    assert!(!config.has_api_key());
    assert_eq!(config.api_base, DEFAULT_API_BASE);
    assert_eq!(config.model, DEFAULT_MODEL);

    // Values from an explicit env file
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "{}=sk-from-file-0123456789abcdef", API_KEY_VAR).unwrap();
    writeln!(file, "{}=http://localhost:4000/v1", API_BASE_VAR).unwrap();
    writeln!(file, "{}=gpt-4o-mini", MODEL_VAR).unwrap();
    writeln!(file, "{}=5", TIMEOUT_VAR).unwrap();
    file.flush().unwrap();

    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.api_key.as_deref(), Some("sk-from-file-0123456789abcdef"));
    assert_eq!(config.api_base, "http://localhost:4000");
    assert_eq!(config.model, "gpt-4o-mini");
    assert_eq!(config.timeout, Duration::from_secs(5));

    // Process variables win over the file
    env::set_var(MODEL_VAR, "gpt-4o");
    let config = Config::load(Some(file.path())).unwrap();
    assert_eq!(config.model, "gpt-4o");

    // A bad timeout is a configuration error
    env::set_var(TIMEOUT_VAR, "later");
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::InvalidTimeout(_))
    ));

    for (var, value) in saved {
        match value {
            Some(value) => env::set_var(var, value),
            None => env::remove_var(var),
        }
    }
}

#[test]
fn test_missing_env_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("absent.env");

    let err = Config::load(Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::EnvFile { .. }));
    assert!(err.to_string().contains("absent.env"));
}

#[test]
fn test_config_default() {
    let config = Config::default();
    assert!(!config.has_api_key());
    assert_eq!(config.endpoint("models"), "https://api.openai.com/v1/models");
}
