use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

/// A user-chosen file held by the session for preview and submission.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedImage {
    pub file_name: String,
    pub media_type: String,
    pub bytes: Arc<[u8]>,
}

impl SelectedImage {
    pub fn new(file_name: &str, media_type: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            media_type: media_type.to_string(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, declaring its media type from the extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let media_type = image::ImageFormat::from_path(path)
            .map(|format| format.to_mime_type())
            .unwrap_or("application/octet-stream");

        Ok(Self::new(&file_name, media_type, bytes))
    }
}

impl fmt::Debug for SelectedImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedImage")
            .field("file_name", &self.file_name)
            .field("media_type", &self.media_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Hotdog,
    NotHotdog,
}

impl Verdict {
    pub fn from_result(result: bool) -> Self {
        if result {
            Verdict::Hotdog
        } else {
            Verdict::NotHotdog
        }
    }

    pub fn is_hotdog(&self) -> bool {
        matches!(self, Verdict::Hotdog)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    #[error("could not reach the classifier: {0}")]
    Transport(String),

    #[error("classifier responded with status {status}: {body}")]
    Server { status: u16, body: String },

    #[error("classifier sent an unreadable response: {0}")]
    MalformedResponse(String),
}

pub trait ImageClassifier {
    fn classify(&self, image: &SelectedImage) -> Result<Verdict, ClassifyError>;
}
