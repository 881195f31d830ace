mod factory;
mod hf_api;
mod prompt;
mod tgi;

pub use factory::GeneratorFactory;
pub use hf_api::HfApiGenerator;
pub use prompt::{build_prompt, RECIPE_PROMPT_PREFIX};
pub use tgi::TgiGenerator;

use crate::config::SamplingParams;
use async_trait::async_trait;
use std::error::Error;

/// Seam for the text-generation model.
///
/// One call per request, no retries. The returned text is the backend's raw
/// decoding, markup tokens included; the formatter depends on them. With
/// sampling enabled the output varies across calls unless the params carry a
/// seed.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the backend name (e.g., "tgi", "hf_api")
    fn generator_name(&self) -> &str;

    /// Generate raw recipe text for a prompt under the given decoding config
    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, Box<dyn Error + Send + Sync>>;
}
