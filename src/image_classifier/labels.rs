use crate::image_classifier::error::ClassifierError;
use std::path::Path;

/// Class names, index-aligned with the model output.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelTable {
    labels: Vec<String>,
}

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self { labels }
    }

    pub fn load(path: impl AsRef<Path>, expected_count: usize) -> Result<Self, ClassifierError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ClassifierError::ModelLoad(format!("reading labels {}: {}", path.display(), e))
        })?;
        Self::parse(&contents, expected_count)
    }

    /// One label per line. Surrounding whitespace is trimmed and trailing
    /// blank lines are dropped; blank lines in the middle keep their index.
    pub fn parse(contents: &str, expected_count: usize) -> Result<Self, ClassifierError> {
        let mut labels: Vec<String> = contents
            .lines()
            .map(|line| line.trim().to_string())
            .collect();
        while labels.last().is_some_and(|label| label.is_empty()) {
            labels.pop();
        }

        if labels.len() != expected_count {
            return Err(ClassifierError::ModelLoad(format!(
                "expected {} labels, found {}",
                expected_count,
                labels.len()
            )));
        }

        Ok(Self { labels })
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.labels.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
