use config::Config;
use image_classifier::impl_http::ImageClassifierHttp;
use library::logger::impl_console::LoggerConsole;
use std::sync::Arc;

mod classification_session;
mod config;
mod image_classifier;
mod library;
mod surface;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::default();

    let logger = Arc::new(LoggerConsole::new(config.logger_timezone));

    let image_classifier = Arc::new(ImageClassifierHttp::new(&config, logger.clone())?);

    surface::impl_gui::run(config, logger, image_classifier).map_err(|e| e.to_string())?;

    Ok(())
}
