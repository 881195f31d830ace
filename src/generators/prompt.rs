/// Prompt prefix the recipe-generation model was trained with.
///
/// The t5-recipe-generation family expects its input as a single line of
/// comma-separated ingredients behind this prefix; anything else degrades
/// output quality sharply.
pub const RECIPE_PROMPT_PREFIX: &str = "items: ";

/// Build the generation prompt for a comma-separated ingredient string
pub fn build_prompt(ingredients: &str) -> String {
    format!("{}{}", RECIPE_PROMPT_PREFIX, ingredients.trim())
}
