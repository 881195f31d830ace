use std::env;
use std::process;
use std::sync::Arc;

use recipe_snap::{server, AppConfig, RecipePipeline};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("serve") => {
            let config = AppConfig::load()?;
            let pipeline = Arc::new(RecipePipeline::from_config(&config)?);
            server::serve(&config.server, pipeline).await
        }
        Some(image_path) => run_batch(image_path).await,
        None => {
            eprintln!("Usage: recipe-snap serve | recipe-snap <image-path>");
            process::exit(2);
        }
    }
}

/// One-shot local experiment: detect, generate, print
async fn run_batch(image_path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    let pipeline = RecipePipeline::from_config(&config)?;

    let image = tokio::fs::read(image_path).await?;
    let ingredients = pipeline.detect_ingredients(&image).await?;

    if ingredients.is_empty() {
        println!("No ingredients detected. Cannot generate recipe.");
        return Ok(());
    }

    println!("Detected Ingredients: {}", ingredients);

    let recipe = pipeline.create_recipe(&ingredients.to_string()).await?;
    println!("{}", recipe);
    println!("{}", "-".repeat(130));

    Ok(())
}
