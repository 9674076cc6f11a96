use crate::image_classifier::error::ClassifierError;
use std::fmt;

/// Flat row-major, channel-interleaved model input.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTensor {
    pub values: Vec<f32>,
}

/// One score per class, index-aligned with the label table.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputVector {
    pub scores: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub index: usize,
    pub label: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PredictionResult {
    Known(Classification),
    Unknown,
}

impl PredictionResult {
    pub fn label(&self) -> &str {
        match self {
            PredictionResult::Known(classification) => &classification.label,
            PredictionResult::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for PredictionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A loaded, immutable classification model.
pub trait ClassificationModel: Send + Sync {
    fn run(&self, input: &InputTensor) -> Result<OutputVector, ClassifierError>;
}
