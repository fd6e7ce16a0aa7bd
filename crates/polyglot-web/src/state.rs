use anyhow::{Context, Result};
use polyglot_core::{AppConfig, BatchTranslator};

/// Global application state
///
/// Holds no per-request data; every translate action owns its own request
/// and outcomes.
pub struct AppState {
    pub batch: BatchTranslator,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self> {
        let batch = BatchTranslator::from_config(&config)
            .context("Failed to create translation client")?;

        Ok(Self { batch, config })
    }

    /// Create with a custom batch translator
    #[cfg(test)]
    pub const fn with_batch(batch: BatchTranslator, config: AppConfig) -> Self {
        Self { batch, config }
    }
}
