use crate::image_classifier::models::model_config::ModelConfig;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "flower-identifier", version, about = "Classify a photo with a pre-trained model")]
pub struct Args {
    /// Image to classify. Opens the window when omitted.
    #[arg(short, long)]
    pub image: Option<PathBuf>,

    /// ONNX model file
    #[arg(short, long)]
    pub model: Option<String>,

    /// Newline separated label file, one label per model class
    #[arg(short, long)]
    pub labels: Option<String>,

    /// Also list the N best labels with their scores
    #[arg(short, long)]
    pub top: Option<usize>,

    /// Run with a deterministic fake model instead of loading one
    #[arg(long)]
    pub fake_model: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub logger_timezone: chrono::FixedOffset,
    pub model: ModelConfig,
    pub image: Option<PathBuf>,
    pub top: usize,
    pub fake_model: bool,
    pub fake_model_seed: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger_timezone: utc(),
            model: ModelConfig::default(),
            image: None,
            top: 0,
            fake_model: false,
            fake_model_seed: 1001,
        }
    }
}

impl Config {
    pub fn from_args(args: Args) -> Self {
        let defaults = Self::default();
        Self {
            model: ModelConfig {
                model_path: args.model.unwrap_or(defaults.model.model_path),
                labels_path: args.labels.unwrap_or(defaults.model.labels_path),
                ..defaults.model
            },
            image: args.image,
            top: args.top.unwrap_or(defaults.top),
            fake_model: args.fake_model,
            ..defaults
        }
    }
}

fn utc() -> chrono::FixedOffset {
    use chrono::Offset;
    chrono::Utc.fix()
}
