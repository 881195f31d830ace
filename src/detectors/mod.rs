mod yolo_http;

pub use yolo_http::YoloHttpDetector;

use crate::model::DetectionResult;
use async_trait::async_trait;
use std::error::Error;

/// Seam for the object-detection model.
///
/// Implementations are constructed once at startup and shared read-only
/// across requests; tests substitute fakes.
#[async_trait]
pub trait ObjectDetector: Send + Sync {
    /// Get the backend name (e.g., "yolo_http")
    fn detector_name(&self) -> &str;

    /// Run detection over one encoded image and return every instance found
    async fn detect(
        &self,
        image: &[u8],
    ) -> Result<DetectionResult, Box<dyn Error + Send + Sync>>;
}
