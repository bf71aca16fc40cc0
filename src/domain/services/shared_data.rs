#[cfg(test)]
#[path = "shared_data_test.rs"]
mod tests;

use crate::domain::models::ChatResponse;
use crate::domain::models::ImageResponse;

/// Page-scoped state bridging the chat view and its related-content panel.
/// Mounted while the chat route is active and dropped when it unmounts; both
/// result sequences are replaced wholesale on every query so the panel always
/// reflects the most recent query only.
#[derive(Default)]
pub struct SharedData {
    chat_responses: Vec<ChatResponse>,
    image_responses: Vec<ImageResponse>,
    detail_panel_open: bool,
}

impl SharedData {
    pub fn chat_responses(&self) -> &[ChatResponse] {
        return &self.chat_responses;
    }

    pub fn image_responses(&self) -> &[ImageResponse] {
        return &self.image_responses;
    }

    pub fn detail_panel_open(&self) -> bool {
        return self.detail_panel_open;
    }

    pub fn replace_results(
        &mut self,
        chat_responses: Vec<ChatResponse>,
        image_responses: Vec<ImageResponse>,
    ) {
        self.chat_responses = chat_responses;
        self.image_responses = image_responses;
    }

    /// Toggled only by an explicit user action on a bot message; there are no
    /// automatic transitions.
    pub fn toggle_detail_panel(&mut self) {
        self.detail_panel_open = !self.detail_panel_open;
    }

    pub fn card_count(&self) -> usize {
        return self.chat_responses.len() + self.image_responses.len();
    }
}
