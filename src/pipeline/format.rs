use crate::model::FormattedRecipe;

/// Tokenizer markup the generation model emits between recipe sections
const SECTION_TOKEN: &str = "<section>";
/// Tokenizer markup the generation model emits between list items
const SEP_TOKEN: &str = "<sep>";
/// Special tokens the backend decodes without stripping
const SPECIAL_TOKENS: [&str; 3] = ["<pad>", "</s>", "<unk>"];

/// Parser position while walking the raw lines
#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    SeekTitle,
    InDirections,
}

/// Replace generator markup with plain newlines and drop special tokens
pub fn replace_markup(raw: &str) -> String {
    let mut text = raw.to_string();
    for token in SPECIAL_TOKENS {
        text = text.replace(token, "");
    }
    text.replace(SECTION_TOKEN, "\n").replace(SEP_TOKEN, "\n")
}

/// Parse raw generated text into the canonical display structure.
///
/// A two-state walk over the trimmed lines:
/// - the first `title:` line becomes the `[TITLE]:` line wherever it occurs
///   (it is still emitted first; the title-first invariant wins over raw
///   order),
/// - a `directions:` line emits the `[DIRECTIONS]:` header and switches
///   state,
/// - in `InDirections`, non-empty lines lose one leading dash bullet and
///   become steps in raw order,
/// - everything else, including `ingredients:` sections ahead of the
///   directions marker, is dropped.
///
/// If no title was found, one is synthesized from the first comma-separated
/// token of the caller's ingredient string. This function never fails.
pub fn format(raw: &str, ingredients: &str) -> FormattedRecipe {
    let replaced = replace_markup(raw);

    let mut title: Option<String> = None;
    let mut body: Vec<String> = Vec::new();
    let mut state = State::SeekTitle;

    for line in replaced.lines() {
        let line = line.trim();

        if let Some(rest) = line.strip_prefix("title:") {
            if title.is_none() {
                title = Some(format!("[TITLE]: {}", capitalize(rest.trim())));
                continue;
            }
        }

        if line.strip_prefix("directions:").is_some() {
            body.push("[DIRECTIONS]:".to_string());
            state = State::InDirections;
        } else if state == State::InDirections && !line.is_empty() {
            body.push(strip_bullet(line).to_string());
        }
    }

    let title = title.unwrap_or_else(|| synthesized_title(ingredients));

    let mut lines = Vec::with_capacity(body.len() + 1);
    lines.push(title);
    lines.extend(body);
    FormattedRecipe::from_lines(lines)
}

/// Title used when the generated text never produced one
fn synthesized_title(ingredients: &str) -> String {
    format!("[TITLE]: Custom {} Dish", capitalize(first_ingredient(ingredients)))
}

/// First comma-separated token of an ingredient string
pub(crate) fn first_ingredient(ingredients: &str) -> &str {
    ingredients.split(',').next().unwrap_or("").trim()
}

/// Uppercase the first letter, leaving the rest untouched
pub(crate) fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Strip one leading dash bullet: optional whitespace, dash, optional whitespace
fn strip_bullet(line: &str) -> &str {
    let trimmed = line.trim_start();
    match trimmed.strip_prefix('-') {
        Some(rest) => rest.trim_start(),
        None => trimmed,
    }
}
