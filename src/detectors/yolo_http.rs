use crate::config::DetectorConfig;
use crate::detectors::ObjectDetector;
use crate::model::DetectionResult;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;
use reqwest::Client;
use serde_json::json;
use std::error::Error;

/// Client for a YOLO inference server.
///
/// The image is sent base64-encoded in a JSON body to `POST {base}/predict`;
/// the server replies with the detected instances as
/// `{"detections": [{"class_id": …, "confidence": …}, …]}`. No confidence
/// threshold is applied on this side.
pub struct YoloHttpDetector {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl YoloHttpDetector {
    /// Create a detector from configuration
    pub fn new(config: &DetectorConfig) -> Self {
        YoloHttpDetector {
            client: Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }

    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        YoloHttpDetector {
            client: Client::new(),
            base_url,
            api_key: None,
        }
    }
}

#[async_trait]
impl ObjectDetector for YoloHttpDetector {
    fn detector_name(&self) -> &str {
        "yolo_http"
    }

    async fn detect(
        &self,
        image: &[u8],
    ) -> Result<DetectionResult, Box<dyn Error + Send + Sync>> {
        let body = json!({
            "image": STANDARD.encode(image),
        });

        let mut request = self
            .client
            .post(format!("{}/predict", self.base_url))
            .json(&body);
        if let Some(key) = &self.api_key {
            request = request.header("Authorization", format!("Bearer {}", key));
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;
            return Err(format!("Detection server error ({}): {}", status, error_text).into());
        }

        let result: DetectionResult = response.json().await?;
        debug!("Detection server returned {} instances", result.detections.len());

        Ok(result)
    }
}
