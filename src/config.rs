use chrono::{Offset, Utc};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint_url: String,
    pub image_field_name: String,
    pub request_timeout: Option<Duration>,
    pub use_system_proxy: bool,
    pub poll_interval: Duration,
    pub window_title: String,
    pub window_size: [f32; 2],
    pub logger_timezone: chrono::FixedOffset,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint_url: "http://marcovrc2000.pythonanywhere.com/process_image".to_string(),
            image_field_name: "image".to_string(),
            request_timeout: None,
            use_system_proxy: true,
            poll_interval: Duration::from_millis(100),
            window_title: "TensorDog".to_string(),
            window_size: [420.0, 560.0],
            logger_timezone: mountain_standard_time(),
        }
    }
}

fn mountain_standard_time() -> chrono::FixedOffset {
    chrono::FixedOffset::west_opt(7 * 3600).unwrap_or_else(|| Utc.fix())
}
