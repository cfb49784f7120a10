use crate::config::Config;
use crate::image_classifier::interface::{ClassifyError, ImageClassifier, SelectedImage, Verdict};
use crate::library::logger::interface::Logger;
use reqwest::blocking::multipart::{Form, Part};
use serde::Deserialize;
use std::sync::Arc;

const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct ClassifyResponse {
    result: bool,
}

pub struct ImageClassifierHttp {
    client: reqwest::blocking::Client,
    endpoint_url: String,
    image_field_name: String,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl ImageClassifierHttp {
    pub fn new(
        config: &Config,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        let mut builder = reqwest::blocking::Client::builder().timeout(config.request_timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint_url: config.endpoint_url.clone(),
            image_field_name: config.image_field_name.clone(),
            logger: logger.with_namespace("image_classifier").with_namespace("http"),
        })
    }

    fn image_part(&self, image: &SelectedImage) -> Part {
        let part = Part::bytes(image.bytes.to_vec()).file_name(image.file_name.clone());
        match part.mime_str(&image.media_type) {
            Ok(part) => part,
            Err(_) => {
                let _ = self.logger.info(&format!(
                    "Unrecognized media type {:?}, sending as octet-stream",
                    image.media_type
                ));
                Part::bytes(image.bytes.to_vec())
                    .file_name(image.file_name.clone())
                    .mime_str("application/octet-stream")
                    .unwrap_or_else(|_| Part::bytes(image.bytes.to_vec()))
            }
        }
    }
}

impl ImageClassifier for ImageClassifierHttp {
    fn classify(&self, image: &SelectedImage) -> Result<Verdict, ClassifyError> {
        let _ = self.logger.info(&format!(
            "POST {} ({}, {} bytes)",
            self.endpoint_url,
            image.file_name,
            image.bytes.len()
        ));

        let form = Form::new().part(self.image_field_name.clone(), self.image_part(image));

        let response = self
            .client
            .post(&self.endpoint_url)
            .multipart(form)
            .send()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .map_err(|e| ClassifyError::Transport(e.to_string()))?;

        let _ = self
            .logger
            .info(&format!("Classifier responded with status {}", status));

        interpret_response(status, &body)
    }
}

/// Maps a raw classifier response onto a verdict. Only a 2xx status with a
/// JSON object holding a strict boolean `result` is accepted.
pub fn interpret_response(status: u16, body: &str) -> Result<Verdict, ClassifyError> {
    if !(200..300).contains(&status) {
        return Err(ClassifyError::Server {
            status,
            body: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
        });
    }

    let parsed: ClassifyResponse = serde_json::from_str(body)
        .map_err(|e| ClassifyError::MalformedResponse(e.to_string()))?;

    Ok(Verdict::from_result(parsed.result))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
