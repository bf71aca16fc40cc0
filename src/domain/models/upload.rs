#[cfg(test)]
#[path = "upload_test.rs"]
mod tests;

use std::path;

use serde_derive::Deserialize;
use serde_derive::Serialize;

/// Which of the two upload endpoints applies, and which file extensions it
/// accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadKind {
    ChatLog,
    Image,
}

impl UploadKind {
    pub fn toggled(&self) -> UploadKind {
        match self {
            UploadKind::ChatLog => return UploadKind::Image,
            UploadKind::Image => return UploadKind::ChatLog,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            UploadKind::ChatLog => return "chat log",
            UploadKind::Image => return "image",
        }
    }

    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        match self {
            UploadKind::ChatLog => return &["txt", "json"],
            UploadKind::Image => return &["png", "jpg", "jpeg", "webp"],
        }
    }

    pub fn accepts(&self, file: &path::Path) -> bool {
        let ext = file
            .extension()
            .map(|e| return e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        return self.accepted_extensions().contains(&ext.as_str());
    }
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatLogInsights {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub messages: Vec<String>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionMetadata {
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub filename: String,
    #[serde(default)]
    pub image_id: i64,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub metadata: DetectionMetadata,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageDetections {
    #[serde(default)]
    pub detections: Vec<Detection>,
}

/// Backend-defined variant shape of a finished upload. Held only until the
/// next upload or a mode toggle.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadResult {
    ChatLog(ChatLogInsights),
    Image(ImageDetections),
}

/// One upload submission handed to the background worker. The sequence
/// token ties the eventual completion event back to the submission that
/// produced it.
pub struct UploadRequest {
    pub kind: UploadKind,
    pub file: path::PathBuf,
    pub user_id: i64,
    pub seq: u64,
}
