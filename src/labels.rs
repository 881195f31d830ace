use crate::config::DetectorConfig;
use crate::error::PipelineError;
use log::info;

/// The class vocabulary of the detection model the pipeline ships with.
///
/// Loaded from `labels.txt` at compile time; line N is the name of class
/// index N. A deployment serving a differently trained model points
/// `detector.labels_path` at its own file.
const EMBEDDED_LABELS: &str = include_str!("labels.txt");

/// Class-index to ingredient-name lookup table
#[derive(Debug, Clone)]
pub struct ClassLabels {
    names: Vec<String>,
}

impl ClassLabels {
    /// The embedded fruit/vegetable vocabulary
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED_LABELS)
    }

    /// Load labels from a file, one name per line in class-index order
    pub fn from_file(path: &str) -> Result<Self, PipelineError> {
        let contents = std::fs::read_to_string(path)?;
        let labels = Self::parse(&contents);
        info!("Loaded {} class labels from {}", labels.len(), path);
        Ok(labels)
    }

    /// Resolve the label table named by the detector configuration
    pub fn from_config(config: &DetectorConfig) -> Result<Self, PipelineError> {
        match &config.labels_path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::embedded()),
        }
    }

    fn parse(contents: &str) -> Self {
        let names = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(String::from)
            .collect();
        Self { names }
    }

    /// Name of a class index, if the index is within the vocabulary
    pub fn name(&self, class_id: usize) -> Option<&str> {
        self.names.get(class_id).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
