use crate::image_classifier::error::ClassifierError;
use image::imageops::FilterType;

/// Linear remap applied to every 8-bit channel: `(value - offset) / scale`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalization {
    pub offset: f32,
    pub scale: f32,
}

impl Normalization {
    pub fn apply(&self, value: u8) -> f32 {
        (f32::from(value) - self.offset) / self.scale
    }
}

impl Default for Normalization {
    fn default() -> Self {
        Self {
            offset: 127.5,
            scale: 127.5,
        }
    }
}

/// Fixed input/output contract of the bundled model.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelConfig {
    pub model_path: String,
    pub labels_path: String,
    /// (height, width)
    pub input_shape: (u32, u32),
    pub channels: usize,
    pub class_count: usize,
    pub normalization: Normalization,
    pub filter: FilterType,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_path: "./src/image_classifier/models/mobilenet_v1_1.0_224.onnx".to_string(),
            labels_path: "./src/image_classifier/models/labels.txt".to_string(),
            input_shape: (224, 224),
            channels: 3,
            class_count: 1001,
            normalization: Normalization::default(),
            filter: FilterType::Triangle,
        }
    }
}

impl ModelConfig {
    pub fn input_len(&self) -> usize {
        self.input_shape.0 as usize * self.input_shape.1 as usize * self.channels
    }

    pub fn validate(&self) -> Result<(), ClassifierError> {
        if self.input_shape.0 == 0 || self.input_shape.1 == 0 {
            return Err(ClassifierError::ModelLoad(format!(
                "input shape must be non-zero, got {:?}",
                self.input_shape
            )));
        }
        if self.channels != 1 && self.channels != 3 {
            return Err(ClassifierError::ModelLoad(format!(
                "channel count must be 1 (luminance) or 3 (RGB), got {}",
                self.channels
            )));
        }
        if self.class_count == 0 {
            return Err(ClassifierError::ModelLoad(
                "class count must be non-zero".to_string(),
            ));
        }
        if self.normalization.scale == 0.0 {
            return Err(ClassifierError::ModelLoad(
                "normalization scale must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_matches_mobilenet() {
        let config = ModelConfig::default();

        assert_eq!(config.input_len(), 150528);
        assert_eq!(config.class_count, 1001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_normalization_extremes() {
        let normalization = Normalization::default();

        assert_eq!(normalization.apply(0), -1.0);
        assert_eq!(normalization.apply(255), 1.0);
        assert!(normalization.apply(127).abs() <= 1.0 / 255.0);
        assert!(normalization.apply(128).abs() <= 1.0 / 255.0);
    }

    #[test]
    fn test_validate_rejects_bad_channels() {
        let config = ModelConfig {
            channels: 4,
            ..ModelConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ClassifierError::ModelLoad(_))
        ));
    }

    #[test]
    fn test_validate_channel_counts() {
        for (channels, valid) in [(0, false), (1, true), (2, false), (3, true), (4, false)] {
            let config = ModelConfig {
                channels,
                ..ModelConfig::default()
            };

            assert_eq!(config.validate().is_ok(), valid, "channels = {}", channels);
        }
    }

    #[test]
    fn test_validate_rejects_zero_scale() {
        let config = ModelConfig {
            normalization: Normalization {
                offset: 0.0,
                scale: 0.0,
            },
            ..ModelConfig::default()
        };

        assert!(config.validate().is_err());
    }
}
