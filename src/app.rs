use crate::config::Config;
use crate::display::interface::Display;
use crate::image_classifier::error::ClassifierError;
use crate::image_classifier::impl_fake::ModelFake;
use crate::image_classifier::impl_tract_onnx::ModelTractOnnx;
use crate::image_classifier::interface::{Classification, ClassificationModel, PredictionResult};
use crate::image_classifier::labels::LabelTable;
use crate::image_classifier::pipeline::ClassificationPipeline;
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Model and labels, loaded once at startup and shared read-only afterwards.
#[derive(Clone)]
pub struct Session {
    pub model: Arc<dyn ClassificationModel + Send + Sync>,
    pub labels: Arc<LabelTable>,
}

impl Session {
    pub fn load(config: &Config) -> Result<Self, ClassifierError> {
        let model_config = &config.model;

        if config.fake_model {
            let labels = (0..model_config.class_count)
                .map(|i| format!("class_{}", i))
                .collect();
            return Ok(Self {
                model: Arc::new(ModelFake::new(
                    model_config.class_count,
                    config.fake_model_seed,
                )),
                labels: Arc::new(LabelTable::new(labels)),
            });
        }

        let model = ModelTractOnnx::new(model_config)?;
        let labels = LabelTable::load(&model_config.labels_path, model_config.class_count)?;

        Ok(Self {
            model: Arc::new(model),
            labels: Arc::new(labels),
        })
    }
}

pub fn load_image(path: impl AsRef<Path>) -> Result<DynamicImage, ClassifierError> {
    let path = path.as_ref();
    image::open(path)
        .map_err(|e| ClassifierError::InvalidImage(format!("{}: {}", path.display(), e)))
}

pub struct App {
    config: Config,
    logger: Arc<dyn Logger + Send + Sync>,
    pipeline: ClassificationPipeline,
    session: Option<Session>,
}

impl App {
    /// Loads the session from `config`. A failed load is logged and leaves the
    /// app running with classification disabled.
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, ClassifierError> {
        let session = match Session::load(&config) {
            Ok(session) => {
                let _ = logger.with_namespace("app").info(&format!(
                    "Loaded model {} with {} labels",
                    if config.fake_model {
                        "fake"
                    } else {
                        config.model.model_path.as_str()
                    },
                    session.labels.len()
                ));
                Some(session)
            }
            Err(e) => {
                let _ = logger
                    .with_namespace("app")
                    .error(&format!("Error loading model or labels: {}", e));
                None
            }
        };

        Self::with_session(config, logger, session)
    }

    pub fn with_session(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        session: Option<Session>,
    ) -> Result<Self, ClassifierError> {
        let pipeline = ClassificationPipeline::new(config.model.clone())?;

        Ok(Self {
            config,
            logger: logger.with_namespace("app"),
            pipeline,
            session,
        })
    }

    pub fn logger(&self) -> Arc<dyn Logger + Send + Sync> {
        self.logger.clone()
    }

    pub fn is_ready(&self) -> bool {
        self.session.is_some()
    }

    fn session(&self) -> Result<&Session, ClassifierError> {
        self.session
            .as_ref()
            .ok_or_else(|| ClassifierError::Inference("model not loaded".to_string()))
    }

    pub fn classify(&self, image: &DynamicImage) -> Result<PredictionResult, ClassifierError> {
        self.classify_ranked(image, 0).map(|(result, _)| result)
    }

    /// Classifies `image` with one model run and also returns the `k` best classes.
    pub fn classify_ranked(
        &self,
        image: &DynamicImage,
        k: usize,
    ) -> Result<(PredictionResult, Vec<Classification>), ClassifierError> {
        let session = self.session()?;
        let started = Instant::now();

        let result = self
            .pipeline
            .classify_ranked(image, session.model.as_ref(), &session.labels, k);

        match &result {
            Ok((PredictionResult::Known(classification), _)) => {
                let _ = self.logger.info(&format!(
                    "Classified {}x{} image as {} (index {}, score {:.4}) in {:?}",
                    image.width(),
                    image.height(),
                    classification.label,
                    classification.index,
                    classification.confidence,
                    started.elapsed()
                ));
            }
            Ok((PredictionResult::Unknown, _)) => {
                let _ = self.logger.info(&format!(
                    "No label for {}x{} image in {:?}",
                    image.width(),
                    image.height(),
                    started.elapsed()
                ));
            }
            Err(e) => {
                let _ = self.logger.error(&format!("Classification failed: {}", e));
            }
        }

        result
    }

    /// Classifies one image file and reports through `display`.
    pub fn run_console(
        &self,
        path: &Path,
        display: &mut dyn Display,
    ) -> Result<PredictionResult, Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_ready() {
            display.show_message("Error loading model or labels.")?;
            return Err(ClassifierError::Inference("model not loaded".to_string()).into());
        }

        let image = match load_image(path) {
            Ok(image) => image,
            Err(e) => {
                let _ = self.logger.error(&e.to_string());
                display.show_message(&format!("Could not open {}", path.display()))?;
                return Err(e.into());
            }
        };

        let (result, ranked) = self.classify_ranked(&image, self.config.top)?;

        display.show_prediction(&result, &ranked)?;

        Ok(result)
    }
}
