#[cfg(test)]
#[path = "preview_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use tempfile::NamedTempFile;

/// Fetched image bytes materialized as a locally-scoped file the user can
/// open with an external viewer. The file lives exactly as long as this
/// handle: dropping it (closing the modal, replacing the preview, or tearing
/// the view down on an error path) removes the file from disk.
pub struct ImagePreview {
    file: NamedTempFile,
    byte_len: usize,
}

impl ImagePreview {
    pub fn new(image_id: i64, bytes: &[u8]) -> Result<ImagePreview> {
        let file = tempfile::Builder::new()
            .prefix(&format!("homeworth-image-{image_id}-"))
            .suffix(".img")
            .tempfile()?;
        std::fs::write(file.path(), bytes)?;

        return Ok(ImagePreview {
            file,
            byte_len: bytes.len(),
        });
    }

    pub fn path(&self) -> &path::Path {
        return self.file.path();
    }

    pub fn byte_len(&self) -> usize {
        return self.byte_len;
    }
}
