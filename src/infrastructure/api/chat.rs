#[cfg(test)]
#[path = "chat_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::HttpApi;
use crate::domain::models::Author;
use crate::domain::models::ChatPrompt;
use crate::domain::models::ChatReply;
use crate::domain::models::ChatResponse;
use crate::domain::models::ImageResponse;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct HistoryEntry {
    sender: Author,
    text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionRequest {
    prompt: String,
    user_id: i64,
    messages: Vec<HistoryEntry>,
    #[serde(rename = "searchChat")]
    search_chat: bool,
    #[serde(rename = "searchImage")]
    search_image: bool,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionMessage {
    #[serde(default)]
    content: String,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: CompletionMessage,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Completion {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    response: Completion,
    #[serde(default)]
    pc_chat_response: Vec<ChatResponse>,
    #[serde(default)]
    pc_image_response: Vec<ImageResponse>,
}

impl HttpApi {
    /// Submits one chat query. Absent related-content arrays come back as
    /// empty sequences and an absent completion becomes a fixed placeholder
    /// line, so the transcript always gets a bot message.
    pub async fn send_chat(&self, prompt: ChatPrompt) -> Result<ChatReply> {
        let messages = prompt
            .history
            .iter()
            .map(|(author, text)| {
                return HistoryEntry {
                    sender: author.clone(),
                    text: text.to_string(),
                };
            })
            .collect::<Vec<HistoryEntry>>();

        let req = CompletionRequest {
            prompt: prompt.text,
            user_id: prompt.user_id,
            messages,
            search_chat: prompt.search_chat,
            search_image: prompt.search_image,
        };

        let res = self.post("/api/nebius-chat").json(&req).send().await?;
        if !res.status().is_success() {
            tracing::error!(status = res.status().as_u16(), "chat request failed");
            bail!("chat request returned status {}", res.status().as_u16());
        }

        let body = res.json::<CompletionResponse>().await?;
        let text = body
            .response
            .choices
            .first()
            .map(|choice| return choice.message.content.to_string())
            .filter(|content| return !content.is_empty())
            .unwrap_or_else(|| return "No response from bot.".to_string());

        return Ok(ChatReply {
            text,
            chat_responses: body.pc_chat_response,
            image_responses: body.pc_image_response,
        });
    }
}
