#[cfg(test)]
#[path = "related_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::Author;

fn slice_after<'a>(text: &'a str, delimiter: char) -> &'a str {
    if let Some((_, rest)) = text.split_once(delimiter) {
        return rest.trim();
    }

    return text.trim();
}

/// A prior chat record matching the current query. The `context`, `item`, and
/// `message` fields arrive as ad hoc delimiter-formatted strings from the
/// backend; the label accessors slice out the human-readable fragment the
/// same way the web client did. The delimiter convention is not a formal
/// contract with the backend.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    pub chat_id: i64,
    #[serde(default)]
    pub context: String,
    #[serde(default)]
    pub item: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub message_id: i64,
    #[serde(default, rename = "type")]
    pub rtype: String,
    #[serde(default)]
    pub user_id: i64,
}

impl ChatResponse {
    pub fn context_label(&self) -> String {
        return slice_after(&self.context, ':').to_string();
    }

    pub fn item_label(&self) -> String {
        return slice_after(&self.item, ':').to_string();
    }

    pub fn message_label(&self) -> String {
        return slice_after(&self.message, ']').to_string();
    }
}

/// A prior uploaded image matching the current query.
#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageResponse {
    pub image_id: i64,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default, rename = "type")]
    pub rtype: String,
    #[serde(default)]
    pub user_id: i64,
}

impl ImageResponse {
    pub fn items_label(&self) -> String {
        return self.items.join(", ");
    }
}

/// One line of a drilled-down chat log, parsed from the backend's
/// `"sender: text"` line format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatLogEntry {
    pub sender: String,
    pub text: String,
}

impl ChatLogEntry {
    /// Lines with no extractable text are skipped rather than rendered
    /// half-empty.
    pub fn parse_lines(raw: &str) -> Vec<ChatLogEntry> {
        return raw
            .split('\n')
            .filter_map(|line| {
                let (sender, text) = line.split_once(": ")?;
                if text.is_empty() {
                    return None;
                }

                let mut sender = sender.to_string();
                if sender.to_lowercase() == "user" {
                    sender = "You".to_string();
                }

                return Some(ChatLogEntry {
                    sender,
                    text: text.to_string(),
                });
            })
            .collect();
    }
}

/// Everything the chat endpoint hands back for one query: the reply text plus
/// the related-content payloads the shared data context is replaced with.
pub struct ChatReply {
    pub text: String,
    pub chat_responses: Vec<ChatResponse>,
    pub image_responses: Vec<ImageResponse>,
}

/// The request side of one chat submission. `messages` is the full prior
/// conversation in order, serialized as `{sender, text}` pairs.
pub struct ChatPrompt {
    pub seq: u64,
    pub text: String,
    pub user_id: i64,
    pub history: Vec<(Author, String)>,
    pub search_chat: bool,
    pub search_image: bool,
}
