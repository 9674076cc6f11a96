use crate::display::interface::Display;
use crate::image_classifier::interface::{Classification, PredictionResult};
use std::error::Error;

#[derive(Debug, Default)]
pub struct DisplayFake {
    pub predictions: Vec<(PredictionResult, Vec<Classification>)>,
    pub messages: Vec<String>,
}

impl DisplayFake {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Display for DisplayFake {
    fn show_prediction(
        &mut self,
        result: &PredictionResult,
        ranked: &[Classification],
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.predictions.push((result.clone(), ranked.to_vec()));
        Ok(())
    }

    fn show_message(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.messages.push(message.to_string());
        Ok(())
    }
}
