use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{
    Classification, ClassificationModel, InputTensor, OutputVector, PredictionResult,
};
use crate::image_classifier::labels::LabelTable;
use crate::image_classifier::models::model_config::ModelConfig;
use image::DynamicImage;

/// Image in, label out. Holds only the fixed model contract; the model and
/// label table are passed to every call.
#[derive(Debug, Clone)]
pub struct ClassificationPipeline {
    config: ModelConfig,
}

impl ClassificationPipeline {
    pub fn new(config: ModelConfig) -> Result<Self, ClassifierError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Resizes to the model input shape and emits normalized channels pixel by
    /// pixel, row outer and column inner. Single-channel models get luminance.
    pub fn preprocess(&self, image: &DynamicImage) -> Result<InputTensor, ClassifierError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ClassifierError::InvalidImage(format!(
                "image has zero size ({}x{})",
                image.width(),
                image.height()
            )));
        }

        let (height, width) = self.config.input_shape;
        let resized = image.resize_exact(width, height, self.config.filter);

        let normalization = self.config.normalization;
        let mut values = Vec::with_capacity(self.config.input_len());
        if self.config.channels == 1 {
            for pixel in resized.to_luma8().pixels() {
                values.push(normalization.apply(pixel.0[0]));
            }
        } else {
            for pixel in resized.to_rgb8().pixels() {
                for &value in &pixel.0 {
                    values.push(normalization.apply(value));
                }
            }
        }

        Ok(InputTensor { values })
    }

    pub fn infer(
        &self,
        tensor: &InputTensor,
        model: &dyn ClassificationModel,
    ) -> Result<OutputVector, ClassifierError> {
        let expected = self.config.input_len();
        if tensor.values.len() != expected {
            return Err(ClassifierError::Inference(format!(
                "input tensor has {} values, model expects {}",
                tensor.values.len(),
                expected
            )));
        }

        let output = model.run(tensor)?;

        if output.scores.len() != self.config.class_count {
            return Err(ClassifierError::Inference(format!(
                "model produced {} scores, expected {}",
                output.scores.len(),
                self.config.class_count
            )));
        }

        Ok(output)
    }

    pub fn classify(
        &self,
        image: &DynamicImage,
        model: &dyn ClassificationModel,
        labels: &LabelTable,
    ) -> Result<PredictionResult, ClassifierError> {
        let tensor = self.preprocess(image)?;
        let output = self.infer(&tensor, model)?;
        Ok(decode(&output, labels))
    }

    /// Same single forward pass as `classify`, decoded into the winner and
    /// the `k` best classes.
    pub fn classify_ranked(
        &self,
        image: &DynamicImage,
        model: &dyn ClassificationModel,
        labels: &LabelTable,
        k: usize,
    ) -> Result<(PredictionResult, Vec<Classification>), ClassifierError> {
        let tensor = self.preprocess(image)?;
        let output = self.infer(&tensor, model)?;
        let ranked = if k > 0 {
            top_k(&output, labels, k)
        } else {
            Vec::new()
        };
        Ok((decode(&output, labels), ranked))
    }
}

/// Arg-max over the scores. Strict `>` keeps the lowest index on ties and NaN
/// never wins. An empty vector, or a winner with no label, decodes to `Unknown`.
pub fn decode(output: &OutputVector, labels: &LabelTable) -> PredictionResult {
    if labels.is_empty() {
        return PredictionResult::Unknown;
    }

    let mut best: Option<(usize, f32)> = None;

    for (index, &score) in output.scores.iter().enumerate() {
        if score.is_nan() {
            continue;
        }
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((index, score)),
        }
    }

    let Some((index, confidence)) = best else {
        return PredictionResult::Unknown;
    };

    match labels.get(index) {
        Some(label) => PredictionResult::Known(Classification {
            index,
            label: label.to_string(),
            confidence,
        }),
        None => PredictionResult::Unknown,
    }
}

/// The `k` best classes, highest score first, ties ordered by lower index.
pub fn top_k(output: &OutputVector, labels: &LabelTable, k: usize) -> Vec<Classification> {
    let mut ranked: Vec<(usize, f32)> = output
        .scores
        .iter()
        .copied()
        .enumerate()
        .filter(|(_, score)| !score.is_nan())
        .collect();

    // sort_by is stable, so equal scores keep index order
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

    ranked
        .into_iter()
        .filter_map(|(index, confidence)| {
            labels.get(index).map(|label| Classification {
                index,
                label: label.to_string(),
                confidence,
            })
        })
        .take(k)
        .collect()
}
