/// Lambda context - shared state for every invocation
use inquiry_core::services::EnvConfigProvider;
use inquiry_core::{Dispatcher, InquiryConfig, InquiryError};
use std::sync::Arc;

/// Built once per cold start; read-only afterwards
#[derive(Clone)]
pub struct AppContext {
    pub dispatcher: Dispatcher,
}

impl AppContext {
    /// Create a context from environment variables
    pub fn new() -> Result<Arc<Self>, InquiryError> {
        let provider = EnvConfigProvider::new()?;
        Self::from_config(provider.config())
    }

    pub fn from_config(config: &InquiryConfig) -> Result<Arc<Self>, InquiryError> {
        Ok(Arc::new(Self {
            dispatcher: Dispatcher::from_config(config)?,
        }))
    }
}
