use crate::config::{GeneratorConfig, SamplingParams};
use crate::generators::TextGenerator;
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde_json::{json, Value};
use std::error::Error;

/// Client for a self-hosted text-generation inference server.
///
/// The server is expected to serve the recipe model behind
/// `POST {base}/generate` taking `{"inputs": …, "parameters": …}` and
/// answering `{"generated_text": …}`. It must decode without stripping
/// special tokens, which the request states explicitly.
pub struct TgiGenerator {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl TgiGenerator {
    /// Create a generator from configuration
    pub fn new(config: &GeneratorConfig) -> Self {
        TgiGenerator {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        TgiGenerator {
            client: Client::new(),
            base_url,
            api_key: None,
        }
    }
}

#[async_trait]
impl TextGenerator for TgiGenerator {
    fn generator_name(&self) -> &str {
        "tgi"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &SamplingParams,
    ) -> Result<String, Box<dyn Error + Send + Sync>> {
        let body = json!({
            "inputs": prompt,
            "parameters": params,
            "skip_special_tokens": false,
        });

        let mut request = self
            .client
            .post(format!("{}/generate", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Generation server error ({}): {}", status, error_text).into());
        }

        let response_body: Value = response.json().await?;
        debug!("{:?}", response_body);
        let generated = response_body["generated_text"]
            .as_str()
            .ok_or("Missing generated_text in response")?
            .to_string();

        Ok(generated)
    }
}
