use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClassifierError {
    /// Image is missing, zero-sized or could not be decoded.
    #[error("invalid image: {0}")]
    InvalidImage(String),

    /// Model or label file is missing, corrupt or does not match the model config.
    #[error("model load: {0}")]
    ModelLoad(String),

    /// Tensor size mismatch, missing model or backend failure while running the model.
    #[error("inference: {0}")]
    Inference(String),
}
