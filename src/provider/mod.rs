use anyhow::Result;
use async_trait::async_trait;

use crate::config::Config;
use crate::errors::ForgeError;

pub mod gemini;

/// The external generative model, injected as a capability. The pipeline
/// never constructs a client or reads the environment itself; anything that
/// can turn an instruction into text can stand in for the real service.
#[async_trait]
pub trait Provider: Send + Sync {
    async fn generate(&self, instruction: &str, debug: bool) -> Result<String>;
}

pub type DynProvider = Box<dyn Provider + Send + Sync>;

/// Resolve the credential once at startup. A missing key is a configuration
/// error and is raised before any request is built.
pub fn make_provider(cfg: &Config) -> Result<DynProvider> {
    let api_key = std::env::var("GEMINI_API_KEY")
        .map_err(|_| ForgeError::Configuration("GEMINI_API_KEY env var is not set".into()))?;
    if api_key.trim().is_empty() {
        return Err(ForgeError::Configuration("GEMINI_API_KEY env var is empty".into()).into());
    }
    Ok(Box::new(gemini::Gemini::new(
        cfg.model.clone(),
        api_key,
        cfg.api_base.clone(),
        cfg.timeout_secs,
    )))
}
