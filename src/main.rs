use app::App;
use clap::Parser;
use config::{Args, Config};
use display::impl_console::DisplayConsole;
use library::logger::{impl_console::LoggerConsole, interface::Logger};
use std::sync::Arc;

mod app;
mod config;
mod display;
mod image_classifier;
mod library;
mod screen;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_args(Args::parse());

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let app = App::new(config.clone(), logger.clone())?;

    match &config.image {
        Some(path) => {
            let mut display = DisplayConsole::new();
            app.run_console(path, &mut display)?;
        }
        None => {
            logger.info("Opening window")?;
            screen::impl_gui::run(Arc::new(app))?;
        }
    }

    Ok(())
}
