use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Object-detection backend settings
    #[serde(default)]
    pub detector: DetectorConfig,
    /// Text-generation backend settings
    #[serde(default)]
    pub generator: GeneratorConfig,
}

/// Bind address for the web frontend
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Configuration for the object-detection backend
#[derive(Debug, Deserialize, Clone)]
pub struct DetectorConfig {
    /// Base URL of the YOLO inference server
    #[serde(default = "default_detector_url")]
    pub base_url: String,
    /// API key, if the inference server requires one
    pub api_key: Option<String>,
    /// Path to a label file overriding the embedded class vocabulary,
    /// one label per line in class-index order
    pub labels_path: Option<String>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            base_url: default_detector_url(),
            api_key: None,
            labels_path: None,
        }
    }
}

/// Configuration for the text-generation backend
#[derive(Debug, Deserialize, Clone)]
pub struct GeneratorConfig {
    /// Backend to use: "tgi" (self-hosted server) or "hf_api" (hosted API)
    #[serde(default = "default_generator_backend")]
    pub backend: String,
    /// Base URL of the generation server or API
    #[serde(default = "default_generator_url")]
    pub base_url: String,
    /// API key for hosted backends (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Model identifier the backend should serve
    #[serde(default = "default_generator_model")]
    pub model: String,
    /// Decoding configuration, fixed for the process lifetime
    #[serde(default)]
    pub sampling: SamplingParams,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            backend: default_generator_backend(),
            base_url: default_generator_url(),
            api_key: None,
            model: default_generator_model(),
            sampling: SamplingParams::default(),
        }
    }
}

/// Decoding configuration for recipe generation.
///
/// With `do_sample` enabled the backend samples stochastically, so two calls
/// with identical input produce different text unless `seed` is set. That
/// non-determinism is part of the generation contract; tests pin `seed` to
/// get reproducible output.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SamplingParams {
    #[serde(default = "default_max_length")]
    pub max_length: u32,
    #[serde(default = "default_min_length")]
    pub min_length: u32,
    #[serde(default = "default_do_sample")]
    pub do_sample: bool,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    /// Sampler seed; None leaves seeding to the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            max_length: default_max_length(),
            min_length: default_min_length(),
            do_sample: default_do_sample(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            seed: None,
        }
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_detector_url() -> String {
    "http://127.0.0.1:9001".to_string()
}

fn default_generator_backend() -> String {
    "tgi".to_string()
}

fn default_generator_url() -> String {
    "http://127.0.0.1:8081".to_string()
}

fn default_generator_model() -> String {
    "flax-community/t5-recipe-generation".to_string()
}

fn default_max_length() -> u32 {
    512
}

fn default_min_length() -> u32 {
    64
}

fn default_do_sample() -> bool {
    true
}

fn default_top_k() -> u32 {
    60
}

fn default_top_p() -> f32 {
    0.95
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPESNAP prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPESNAP__GENERATOR__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            // Optional config file (can be missing)
            .add_source(File::with_name("config").required(false))
            // Use double underscore for nested: RECIPESNAP__DETECTOR__BASE_URL
            .add_source(
                Environment::with_prefix("RECIPESNAP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sampling_defaults_match_generation_contract() {
        let params = SamplingParams::default();
        assert_eq!(params.max_length, 512);
        assert_eq!(params.min_length, 64);
        assert!(params.do_sample);
        assert_eq!(params.top_k, 60);
        assert_eq!(params.top_p, 0.95);
        assert!(params.seed.is_none());
    }

    #[test]
    fn test_seed_is_not_serialized_when_unset() {
        let params = SamplingParams::default();
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("seed").is_none());

        let seeded = SamplingParams {
            seed: Some(42),
            ..SamplingParams::default()
        };
        let json = serde_json::to_value(&seeded).unwrap();
        assert_eq!(json["seed"], 42);
    }

    #[test]
    fn test_server_defaults() {
        let server = ServerConfig::default();
        assert_eq!(server.host, "0.0.0.0");
        assert_eq!(server.port, 8080);
    }

    #[test]
    fn test_generator_defaults() {
        let generator = GeneratorConfig::default();
        assert_eq!(generator.backend, "tgi");
        assert_eq!(generator.model, "flax-community/t5-recipe-generation");
        assert!(generator.api_key.is_none());
    }

    #[test]
    fn test_app_config_default_is_complete() {
        let config = AppConfig::default();
        assert_eq!(config.detector.base_url, "http://127.0.0.1:9001");
        assert!(config.detector.labels_path.is_none());
        assert_eq!(config.generator.sampling, SamplingParams::default());
    }
}
