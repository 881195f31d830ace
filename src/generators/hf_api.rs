use crate::config::{GeneratorConfig, SamplingParams};
use crate::generators::TextGenerator;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

/// Client for the hosted Hugging Face inference API.
///
/// Same request shape as the self-hosted server, but routed per model and
/// authenticated with a Bearer token; the response is a one-element array.
pub struct HfApiGenerator {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl HfApiGenerator {
    /// Create a generator from configuration
    pub fn new(config: &GeneratorConfig) -> Result<Self, Box<dyn Error>> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("HF_API_TOKEN").ok())
            .ok_or("HF_API_TOKEN not found in config or environment")?;

        Ok(HfApiGenerator {
            client: Client::new(),
            base_url: "https://api-inference.huggingface.co".to_string(),
            api_key,
            model: config.model.clone(),
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        HfApiGenerator {
            client: Client::new(),
            base_url,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl TextGenerator for HfApiGenerator {
    fn generator_name(&self) -> &str {
        "hf_api"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let response = self
            .client
            .post(format!("{}/models/{}", self.base_url, self.model))
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&json!({
                "inputs": prompt,
                "parameters": params,
                "options": {"use_cache": false},
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Inference API error ({}): {}", status, error_text).into());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let generated = response_body[0]["generated_text"]
            .as_str()
            .ok_or("Missing generated_text in response")?
            .to_string();

        Ok(generated)
    }
}
