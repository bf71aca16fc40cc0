#[cfg(test)]
#[path = "upload_flow_test.rs"]
mod tests;

use std::path;

use anyhow::bail;
use anyhow::Result;

use crate::domain::models::UploadKind;
use crate::domain::models::UploadResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    Selected,
    Uploading,
    Done,
}

/// The upload page's state machine:
/// `idle -> file-selected -> uploading -> {success|failure}`, back to
/// file-selected when a new file is chosen. Toggling the upload mode clears
/// any displayed server response but never the selected file. Each upload
/// carries a sequence token; a completion arriving with a token other than
/// the one currently in flight is stale and gets discarded, so a response
/// from a cancelled upload never renders under the new mode.
pub struct UploadFlow {
    kind: UploadKind,
    file: Option<path::PathBuf>,
    phase: UploadPhase,
    status: Option<String>,
    result: Option<UploadResult>,
    seq: u64,
}

impl Default for UploadFlow {
    fn default() -> UploadFlow {
        return UploadFlow {
            kind: UploadKind::ChatLog,
            file: None,
            phase: UploadPhase::Idle,
            status: None,
            result: None,
            seq: 0,
        };
    }
}

impl UploadFlow {
    pub fn kind(&self) -> UploadKind {
        return self.kind;
    }

    pub fn file(&self) -> Option<&path::Path> {
        return self.file.as_deref();
    }

    pub fn phase(&self) -> UploadPhase {
        return self.phase;
    }

    pub fn status(&self) -> Option<&str> {
        return self.status.as_deref();
    }

    pub fn result(&self) -> Option<&UploadResult> {
        return self.result.as_ref();
    }

    /// Selecting a file replaces any previous selection, it never queues.
    pub fn select_file(&mut self, file: &path::Path) -> Result<()> {
        if !self.kind.accepts(file) {
            bail!(
                "Only {} files are accepted for {} uploads.",
                self.kind.accepted_extensions().join("/"),
                self.kind.label()
            );
        }

        self.file = Some(file.to_path_buf());
        self.phase = UploadPhase::Selected;
        return Ok(());
    }

    /// Switching modes also cancels an upload still in flight: the phase
    /// leaves `Uploading`, which invalidates the outstanding token.
    pub fn toggle_kind(&mut self) {
        self.kind = self.kind.toggled();
        self.status = None;
        self.result = None;
        self.phase = match self.file {
            Some(_) => UploadPhase::Selected,
            None => UploadPhase::Idle,
        };
    }

    pub fn begin_upload(&mut self) -> Result<(path::PathBuf, u64)> {
        let Some(file) = self.file.clone() else {
            bail!("No file selected. Please choose a file to upload.");
        };
        if !self.kind.accepts(&file) {
            bail!(
                "The selected file does not match the {} upload mode.",
                self.kind.label()
            );
        }
        if self.phase == UploadPhase::Uploading {
            bail!("An upload is already in progress.");
        }

        self.phase = UploadPhase::Uploading;
        self.status = None;
        self.result = None;
        self.seq += 1;
        return Ok((file, self.seq));
    }

    /// Local validation errors never went through the worker, so they skip
    /// the staleness check.
    pub fn fail_selection(&mut self, detail: &str) {
        self.status = Some(detail.to_string());
        self.result = None;
        self.phase = match self.file {
            Some(_) => UploadPhase::Selected,
            None => UploadPhase::Idle,
        };
    }

    fn is_stale(&self, seq: u64) -> bool {
        return self.phase != UploadPhase::Uploading || seq != self.seq;
    }

    pub fn finish_success(&mut self, seq: u64, result: UploadResult) {
        if self.is_stale(seq) {
            tracing::debug!(seq = seq, "discarding stale upload result");
            return;
        }

        self.phase = UploadPhase::Done;
        self.status = Some("File uploaded successfully!".to_string());
        self.result = Some(result);
    }

    pub fn finish_failure(&mut self, seq: u64, detail: &str) {
        if self.is_stale(seq) {
            tracing::debug!(seq = seq, "discarding stale upload failure");
            return;
        }

        self.phase = UploadPhase::Done;
        self.status = Some(detail.to_string());
        self.result = None;
    }
}
