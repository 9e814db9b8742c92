use tokio::runtime::{Builder, Runtime as TokioRuntime};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    #[error("Failed to create runtime: {0}")]
    Creation(String),
}

/// Single-threaded runtime: the checks run strictly one after another, so
/// there is nothing for worker threads to do.
pub struct Runtime {
    inner: TokioRuntime,
}

impl Runtime {
    pub fn new() -> Result<Self, RuntimeError> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .thread_name("keyprobe")
            .build()
            .map_err(|e| RuntimeError::Creation(e.to_string()))?;

        debug!("Current-thread runtime initialized");

        Ok(Self { inner: runtime })
    }

    pub fn block_on<F>(&self, future: F) -> F::Output
    where
        F: std::future::Future,
    {
        self.inner.block_on(future)
    }
}
