use thiserror::Error;

/// Errors that can occur while turning a photo into a recipe
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Caller-supplied input was missing or unusable
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A detection or generation backend call failed
    #[error("Model invocation failed: {0}")]
    ModelInvocation(String),

    /// Uploaded or on-disk image bytes could not be decoded
    #[error("Unreadable image: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem error while reading an image or label file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

impl PipelineError {
    /// True for errors the caller can fix by changing the request
    pub fn is_client_error(&self) -> bool {
        matches!(self, PipelineError::InvalidInput(_) | PipelineError::Image(_))
    }
}
