use serde::{Deserialize, Serialize};
use std::fmt;

/// Rendered in place of an empty ingredient list so callers can always
/// distinguish "nothing found" from a blank response
pub const NO_INGREDIENTS_SENTINEL: &str = "No ingredients detected";

/// One detected instance in an image.
///
/// The confidence score is reported by the detection backend but never used
/// to filter instances; every detection contributes its class to the
/// ingredient set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub class_id: usize,
    pub confidence: f32,
}

/// Everything the detection backend found in one image, in detection order
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DetectionResult {
    pub detections: Vec<Detection>,
}

impl DetectionResult {
    pub fn is_empty(&self) -> bool {
        self.detections.is_empty()
    }
}

/// Deduplicated, capitalized ingredient names in first-detected order.
///
/// Order is deliberately deterministic: the comma-joined rendering and the
/// "first ingredient" used for fallback recipe titles both depend on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IngredientSet {
    names: Vec<String>,
}

impl IngredientSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a name, returning false if it was already present
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.names.iter().any(|n| *n == name) {
            return false;
        }
        self.names.push(name);
        true
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn first(&self) -> Option<&str> {
        self.names.first().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }
}

impl fmt::Display for IngredientSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.names.is_empty() {
            f.write_str(NO_INGREDIENTS_SENTINEL)
        } else {
            f.write_str(&self.names.join(", "))
        }
    }
}

impl FromIterator<String> for IngredientSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = IngredientSet::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

/// Display lines of a formatted recipe.
///
/// Always begins with a `[TITLE]: …` line; construction is restricted to the
/// formatter, which enforces that invariant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormattedRecipe {
    lines: Vec<String>,
}

impl FormattedRecipe {
    pub(crate) fn from_lines(lines: Vec<String>) -> Self {
        debug_assert!(matches!(lines.first(), Some(first) if first.starts_with("[TITLE]:")));
        Self { lines }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// The `[TITLE]: …` line, always present and always first
    pub fn title_line(&self) -> &str {
        &self.lines[0]
    }
}

impl fmt::Display for FormattedRecipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}
