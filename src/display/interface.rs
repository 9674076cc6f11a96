use crate::image_classifier::interface::{Classification, PredictionResult};
use std::error::Error;

/// Where classification results are reported to the user.
pub trait Display: Send + Sync {
    /// Show the winning label, plus the ranked runners-up when any were requested.
    fn show_prediction(
        &mut self,
        result: &PredictionResult,
        ranked: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Short status line, the console counterpart of a toast.
    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
