use crate::labels::ClassLabels;
use crate::model::{DetectionResult, IngredientSet};
use crate::pipeline::format::capitalize;
use log::warn;

/// Convert one detection result into a deduplicated ingredient set.
///
/// Every instance is mapped through the label table and capitalized;
/// duplicate classes collapse to one entry in first-detected order. There is
/// no confidence threshold. Zero detections is a normal outcome: the empty
/// set renders as the "no ingredients detected" sentinel.
pub fn extract(detections: &DetectionResult, labels: &ClassLabels) -> IngredientSet {
    let mut ingredients = IngredientSet::new();

    for detection in &detections.detections {
        match labels.name(detection.class_id) {
            Some(name) => {
                ingredients.insert(capitalize(name));
            }
            None => {
                // label table is configuration and can drift from the model
                warn!(
                    "Detected class index {} has no label, skipping",
                    detection.class_id
                );
            }
        }
    }

    ingredients
}
