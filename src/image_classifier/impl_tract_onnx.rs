use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::interface::{ClassificationModel, InputTensor, OutputVector};
use crate::image_classifier::models::model_config::ModelConfig;
use tract_onnx::prelude::*;

/// ONNX model run through tract with an NHWC `[1, height, width, channels]` input.
pub struct ModelTractOnnx {
    model: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    input_shape: [usize; 4],
}

impl ModelTractOnnx {
    pub fn new(config: &ModelConfig) -> Result<Self, ClassifierError> {
        config.validate()?;

        let input_shape = [
            1,
            config.input_shape.0 as usize,
            config.input_shape.1 as usize,
            config.channels,
        ];

        let model = tract_onnx::onnx()
            .model_for_path(&config.model_path)
            .and_then(|model| model.with_input_fact(0, f32::fact(input_shape).into()))
            .and_then(|model| model.into_optimized())
            .and_then(|model| model.into_runnable())
            .map_err(|e| {
                ClassifierError::ModelLoad(format!("loading model {}: {}", config.model_path, e))
            })?;

        Ok(Self { model, input_shape })
    }
}

impl ClassificationModel for ModelTractOnnx {
    fn run(&self, input: &InputTensor) -> Result<OutputVector, ClassifierError> {
        let tensor: Tensor = tract_ndarray::Array4::from_shape_vec(
            (
                self.input_shape[0],
                self.input_shape[1],
                self.input_shape[2],
                self.input_shape[3],
            ),
            input.values.clone(),
        )
        .map_err(|e| ClassifierError::Inference(e.to_string()))?
        .into();

        let outputs = self
            .model
            .run(tvec!(tensor.into_tvalue()))
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        let output = outputs
            .first()
            .ok_or_else(|| ClassifierError::Inference("model produced no outputs".to_string()))?
            .to_array_view::<f32>()
            .map_err(|e| ClassifierError::Inference(e.to_string()))?;

        Ok(OutputVector {
            scores: output.iter().copied().collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::labels::LabelTable;
    use crate::image_classifier::pipeline::ClassificationPipeline;
    use image::{DynamicImage, ImageBuffer, Rgb};

    // Flatten of a [1, 2, 2, 3] input into [1, 12].
    const FLATTEN_MODEL: &str = "./src/image_classifier/models/flatten_2x2x3.onnx";

    fn flatten_config() -> ModelConfig {
        ModelConfig {
            model_path: FLATTEN_MODEL.to_string(),
            input_shape: (2, 2),
            channels: 3,
            class_count: 12,
            ..ModelConfig::default()
        }
    }

    #[test]
    fn test_missing_model_file_is_a_load_error() {
        let config = ModelConfig {
            model_path: "./does/not/exist.onnx".to_string(),
            ..ModelConfig::default()
        };

        let result = ModelTractOnnx::new(&config);

        assert!(matches!(result, Err(ClassifierError::ModelLoad(_))));
    }

    #[test]
    fn test_run_keeps_nhwc_order() {
        let model = ModelTractOnnx::new(&flatten_config()).unwrap();
        let values: Vec<f32> = (0..12).map(|i| i as f32 / 12.0).collect();

        let output = model
            .run(&InputTensor {
                values: values.clone(),
            })
            .unwrap();

        assert_eq!(output.scores, values);
    }

    #[test]
    fn test_run_rejects_wrong_input_length() {
        let model = ModelTractOnnx::new(&flatten_config()).unwrap();

        let result = model.run(&InputTensor {
            values: vec![0.0; 5],
        });

        assert!(matches!(result, Err(ClassifierError::Inference(_))));
    }

    #[test]
    fn test_classify_through_tract() {
        let config = flatten_config();
        let model = ModelTractOnnx::new(&config).unwrap();
        let pipeline = ClassificationPipeline::new(config).unwrap();
        let labels = LabelTable::new((0..12).map(|i| format!("slot_{}", i)).collect());
        // only the green channel of the pixel at row 1, column 0 is lit
        let image = DynamicImage::ImageRgb8(ImageBuffer::from_fn(2, 2, |x, y| {
            if (x, y) == (0, 1) {
                Rgb([0, 255, 0])
            } else {
                Rgb([0, 0, 0])
            }
        }));

        let result = pipeline.classify(&image, &model, &labels).unwrap();

        assert_eq!(result.label(), "slot_7");
    }
}
