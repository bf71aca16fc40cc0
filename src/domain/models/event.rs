use std::path;

use tui_textarea::Input;

use super::ChatLogEntry;
use super::ChatReply;
use super::ImagePreview;
use super::Session;
use super::UploadResult;

/// Everything the UI loop reacts to: keyboard input folded in from
/// crossterm, and completions reported back by the actions service.
pub enum Event {
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardEnter(),
    KeyboardEsc(),
    KeyboardTab(),
    KeyboardPaste(String),
    UIScrollDown(),
    UIScrollUp(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UITick(),

    AuthSucceeded(Session),
    AuthFailed(String),
    LoggedOut(),
    ChatCompleted { seq: u64, reply: ChatReply },
    ChatFailed { seq: u64 },
    ChatLogLoaded(Vec<ChatLogEntry>),
    ChatLogFailed(),
    ImageLoaded(ImagePreview),
    ImageFailed(),
    UploadCompleted { seq: u64, result: UploadResult },
    UploadFailed { seq: u64, detail: String },
    ReportSaved(path::PathBuf),
    ReportFailed(String),
}
