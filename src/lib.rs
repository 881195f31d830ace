pub mod config;
pub mod detectors;
pub mod error;
pub mod generators;
pub mod labels;
pub mod model;
pub mod pipeline;
pub mod server;

pub use config::{AppConfig, SamplingParams};
pub use error::PipelineError;
pub use labels::ClassLabels;
pub use model::{
    Detection, DetectionResult, FormattedRecipe, IngredientSet, NO_INGREDIENTS_SENTINEL,
};
pub use pipeline::RecipePipeline;

/// Detect the ingredients visible in an image file, using the backends named
/// by the ambient configuration
pub async fn detect_ingredients(image_path: &str) -> Result<IngredientSet, PipelineError> {
    let config = AppConfig::load()?;
    let pipeline = RecipePipeline::from_config(&config)?;
    let image = tokio::fs::read(image_path).await?;

    pipeline.detect_ingredients(&image).await
}

/// Generate a formatted recipe for a comma-separated ingredient string
pub async fn recipe_from_ingredients(ingredients: &str) -> Result<FormattedRecipe, PipelineError> {
    let config = AppConfig::load()?;
    let pipeline = RecipePipeline::from_config(&config)?;

    pipeline.create_recipe(ingredients).await
}

/// Full photo-to-recipe flow: detect, then generate and format.
///
/// Returns the detected ingredient set alongside the recipe; the recipe is
/// None when nothing was detected.
pub async fn recipe_from_image(
    image_path: &str,
) -> Result<(IngredientSet, Option<FormattedRecipe>), PipelineError> {
    let config = AppConfig::load()?;
    let pipeline = RecipePipeline::from_config(&config)?;
    let image = tokio::fs::read(image_path).await?;

    pipeline.recipe_from_image(&image).await
}
