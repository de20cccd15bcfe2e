use crate::config::Config;
use std::sync::Arc;

/// Write-only sink for non-fatal diagnostics emitted during validation.
pub trait LogSink: Send + Sync {
    fn info(&self, message: &str);
}

/// Forwards diagnostics to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLog;

impl LogSink for TracingLog {
    fn info(&self, message: &str) {
        tracing::info!("{message}");
    }
}

/// Everything a validation call reads from its caller.
#[derive(Clone)]
pub struct ValidationContext {
    pub log: Arc<dyn LogSink>,
    pub config: Config,
}

impl ValidationContext {
    pub fn new(config: Config) -> Self {
        Self { log: Arc::new(TracingLog), config }
    }

    pub fn with_log(mut self, log: Arc<dyn LogSink>) -> Self {
        self.log = log;
        self
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl std::fmt::Debug for ValidationContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidationContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
