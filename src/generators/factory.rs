use crate::config::GeneratorConfig;
use crate::generators::{HfApiGenerator, TextGenerator, TgiGenerator};
use std::error::Error;

pub struct GeneratorFactory;

impl GeneratorFactory {
    /// Create the text-generation backend named by the configuration
    pub fn create(config: &GeneratorConfig) -> Result<Box<dyn TextGenerator>, Box<dyn Error>> {
        match config.backend.as_str() {
            "tgi" => Ok(Box::new(TgiGenerator::new(config))),
            "hf_api" => Ok(Box::new(HfApiGenerator::new(config)?)),
            other => Err(format!("Unknown generator backend: {}", other).into()),
        }
    }

    /// List all available backend names
    pub fn available_backends() -> Vec<&'static str> {
        vec!["tgi", "hf_api"]
    }
}
