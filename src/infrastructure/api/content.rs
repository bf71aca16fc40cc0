#[cfg(test)]
#[path = "content_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::HttpApi;
use crate::domain::models::ChatLogEntry;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatLogLine {
    #[serde(default)]
    sender: String,
    #[serde(default)]
    message: String,
}

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct ChatLogResponse {
    #[serde(default)]
    chatlog: Vec<ChatLogLine>,
}

impl HttpApi {
    pub async fn fetch_chat_log(&self, chat_id: i64) -> Result<Vec<ChatLogEntry>> {
        let res = self
            .get(&format!("/api/chatlog_from_chatid/{chat_id}"))
            .send()
            .await?;
        if !res.status().is_success() {
            bail!("chat log request returned status {}", res.status().as_u16());
        }

        let body = res.json::<ChatLogResponse>().await?;
        let raw = body
            .chatlog
            .iter()
            .map(|line| return format!("{}: {}", line.sender, line.message))
            .collect::<Vec<String>>()
            .join("\n");

        return Ok(ChatLogEntry::parse_lines(&raw));
    }

    pub async fn fetch_image(&self, image_id: i64) -> Result<Vec<u8>> {
        let res = self
            .get(&format!("/api/get_image/{image_id}"))
            .send()
            .await?;
        if !res.status().is_success() {
            bail!("image request returned status {}", res.status().as_u16());
        }

        return Ok(res.bytes().await?.to_vec());
    }
}
