use crate::app::{load_image, App};
use crate::library::logger::interface::Logger;
use image::DynamicImage;
use std::sync::Arc;

pub const MESSAGE_SELECT_FIRST: &str = "Select an image first!";
pub const MESSAGE_LOAD_FAILED: &str = "Error loading model or labels.";

/// Everything the single screen shows, independent of how it is drawn.
pub struct ScreenState {
    app: Arc<App>,
    logger: Arc<dyn Logger + Send + Sync>,
    pub path_input: String,
    pub image: Option<DynamicImage>,
    /// Bumped whenever `image` changes so the view can refresh its preview.
    pub image_version: u64,
    pub label: String,
    pub message: Option<String>,
}

impl ScreenState {
    pub fn new(app: Arc<App>) -> Self {
        let logger = app.logger().with_namespace("screen");
        let message = if app.is_ready() {
            None
        } else {
            Some(MESSAGE_LOAD_FAILED.to_string())
        };

        Self {
            app,
            logger,
            path_input: String::new(),
            image: None,
            image_version: 0,
            label: String::new(),
            message,
        }
    }

    pub fn can_predict(&self) -> bool {
        self.app.is_ready()
    }

    /// Decodes the image at `path_input`. A new image clears the previous label.
    pub fn select(&mut self) {
        let path = self.path_input.trim().to_string();
        if path.is_empty() {
            self.message = Some(MESSAGE_SELECT_FIRST.to_string());
            return;
        }

        match load_image(&path) {
            Ok(image) => {
                let _ = self
                    .logger
                    .info(&format!("Selected {} ({}x{})", path, image.width(), image.height()));
                self.image = Some(image);
                self.image_version += 1;
                self.label.clear();
                self.message = None;
            }
            Err(e) => {
                let _ = self.logger.error(&e.to_string());
                self.message = Some(format!("Could not open {}", path));
            }
        }
    }

    pub fn predict(&mut self) {
        let Some(image) = &self.image else {
            self.message = Some(MESSAGE_SELECT_FIRST.to_string());
            return;
        };

        if !self.app.is_ready() {
            self.message = Some(MESSAGE_LOAD_FAILED.to_string());
            return;
        }

        match self.app.classify(image) {
            Ok(result) => {
                self.label = result.to_string();
                self.message = Some(format!("Prediction: {}", result));
            }
            Err(e) => {
                self.label.clear();
                self.message = Some(e.to_string());
            }
        }
    }
}
