pub mod checks;
pub mod client;
pub mod config;
pub mod output;
pub mod report;
pub mod runtime;
pub mod tester;

pub use client::{ApiClient, OpenAiClient};
pub use config::Config;
pub use report::TestReport;
pub use runtime::Runtime;
pub use tester::KeyTester;

#[derive(Debug, thiserror::Error)]
pub enum KeyprobeError {
    #[error("Runtime error: {0}")]
    Runtime(#[from] runtime::RuntimeError),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("API client error: {0}")]
    Client(#[from] client::ApiError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Other error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, KeyprobeError>;
