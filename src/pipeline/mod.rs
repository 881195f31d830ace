pub mod extract;
pub mod format;

use std::sync::Arc;

use log::{debug, info};

use crate::config::{AppConfig, SamplingParams};
use crate::detectors::{ObjectDetector, YoloHttpDetector};
use crate::error::PipelineError;
use crate::generators::{build_prompt, GeneratorFactory, TextGenerator};
use crate::labels::ClassLabels;
use crate::model::{FormattedRecipe, IngredientSet};

/// The detection-to-recipe pipeline.
///
/// Holds the injected model backends, the label table, and the fixed
/// decoding configuration. All state is read-only after construction, so one
/// instance is shared across concurrent requests without coordination.
pub struct RecipePipeline {
    detector: Arc<dyn ObjectDetector>,
    generator: Arc<dyn TextGenerator>,
    labels: ClassLabels,
    sampling: SamplingParams,
}

impl RecipePipeline {
    /// Assemble a pipeline from explicit collaborators
    pub fn new(
        detector: Arc<dyn ObjectDetector>,
        generator: Arc<dyn TextGenerator>,
        labels: ClassLabels,
        sampling: SamplingParams,
    ) -> Self {
        Self {
            detector,
            generator,
            labels,
            sampling,
        }
    }

    /// Build the production pipeline described by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self, PipelineError> {
        let detector = Arc::new(YoloHttpDetector::new(&config.detector));
        let generator: Arc<dyn TextGenerator> = Arc::from(
            GeneratorFactory::create(&config.generator)
                .map_err(|e| config::ConfigError::Message(e.to_string()))?,
        );
        let labels = ClassLabels::from_config(&config.detector)?;

        info!(
            "Pipeline ready: detector={}, generator={}, {} labels",
            detector.detector_name(),
            generator.generator_name(),
            labels.len()
        );

        Ok(Self::new(
            detector,
            generator,
            labels,
            config.generator.sampling.clone(),
        ))
    }

    /// Detect ingredients in one encoded image.
    ///
    /// The bytes are decoded first so corrupt uploads fail as a client error
    /// before the detection backend is invoked. An image with nothing
    /// recognizable in it yields the empty set, which is a normal outcome.
    pub async fn detect_ingredients(&self, image: &[u8]) -> Result<IngredientSet, PipelineError> {
        image::load_from_memory(image)?;

        let detections = self
            .detector
            .detect(image)
            .await
            .map_err(|e| PipelineError::ModelInvocation(e.to_string()))?;

        debug!("{} instances detected", detections.detections.len());
        Ok(extract::extract(&detections, &self.labels))
    }

    /// Generate raw recipe text for a non-empty ingredient string.
    ///
    /// One backend invocation, no retries. If the decoded text carries
    /// neither a `title:` nor a `directions:` marker, a parseable fallback is
    /// synthesized: the title names the first ingredient and the whole
    /// decoded text (markup replaced by newlines) becomes the directions
    /// body.
    pub async fn generate_raw(&self, ingredients: &str) -> Result<String, PipelineError> {
        if ingredients.trim().is_empty() {
            return Err(PipelineError::InvalidInput(
                "No ingredients provided".to_string(),
            ));
        }

        let prompt = build_prompt(ingredients);
        debug!("Generation prompt: {}", prompt);

        let decoded = self
            .generator
            .generate(&prompt, &self.sampling)
            .await
            .map_err(|e| PipelineError::ModelInvocation(e.to_string()))?;

        if !decoded.contains("title:") && !decoded.contains("directions:") {
            debug!("Generated text has no section markers, synthesizing fallback");
            let first = format::first_ingredient(ingredients);
            let body = format::replace_markup(&decoded);
            return Ok(format!(
                "title: Custom Recipe with {}\ndirections:\n{}",
                first, body
            ));
        }

        Ok(decoded)
    }

    /// Full recipe operation: generate once, then format for display
    pub async fn create_recipe(&self, ingredients: &str) -> Result<FormattedRecipe, PipelineError> {
        let raw = self.generate_raw(ingredients).await?;
        Ok(format::format(&raw, ingredients))
    }

    /// Detect, then generate and format, for the batch flow
    pub async fn recipe_from_image(
        &self,
        image: &[u8],
    ) -> Result<(IngredientSet, Option<FormattedRecipe>), PipelineError> {
        let ingredients = self.detect_ingredients(image).await?;
        if ingredients.is_empty() {
            return Ok((ingredients, None));
        }
        let recipe = self.create_recipe(&ingredients.to_string()).await?;
        Ok((ingredients, Some(recipe)))
    }
}
