mod auth;
mod chat;
mod client;
mod content;
mod report;
mod uploads;

use anyhow::Result;
use async_trait::async_trait;
pub use client::HttpApi;

use crate::domain::models::ChatLogEntry;
use crate::domain::models::ChatPrompt;
use crate::domain::models::ChatReply;
use crate::domain::models::Credentials;
use crate::domain::models::Session;
use crate::domain::models::UploadRequest;
use crate::domain::models::UploadResult;

/// Everything the app asks of the backend. The background worker only sees
/// this trait, which keeps the state machinery testable without a server.
#[async_trait]
pub trait Api: Send + Sync {
    /// Startup probe for an existing server-side session. Failure means
    /// "logged out", not an error to surface.
    async fn session_probe(&self) -> Result<Session>;
    async fn login(&self, credentials: &Credentials) -> Result<Session>;
    async fn register(&self, credentials: &Credentials) -> Result<Session>;
    async fn logout(&self) -> Result<()>;
    async fn send_chat(&self, prompt: ChatPrompt) -> Result<ChatReply>;
    async fn fetch_chat_log(&self, chat_id: i64) -> Result<Vec<ChatLogEntry>>;
    async fn fetch_image(&self, image_id: i64) -> Result<Vec<u8>>;
    async fn upload(&self, request: &UploadRequest, bytes: Vec<u8>) -> Result<UploadResult>;
    async fn generate_report(&self, user_id: i64) -> Result<Vec<u8>>;
}

// Inherent methods win resolution here, so each arm delegates to the
// endpoint implementation living next to its tests.
#[async_trait]
impl Api for HttpApi {
    async fn session_probe(&self) -> Result<Session> {
        return HttpApi::session_probe(self).await;
    }

    async fn login(&self, credentials: &Credentials) -> Result<Session> {
        return HttpApi::login(self, credentials).await;
    }

    async fn register(&self, credentials: &Credentials) -> Result<Session> {
        return HttpApi::register(self, credentials).await;
    }

    async fn logout(&self) -> Result<()> {
        return HttpApi::logout(self).await;
    }

    async fn send_chat(&self, prompt: ChatPrompt) -> Result<ChatReply> {
        return HttpApi::send_chat(self, prompt).await;
    }

    async fn fetch_chat_log(&self, chat_id: i64) -> Result<Vec<ChatLogEntry>> {
        return HttpApi::fetch_chat_log(self, chat_id).await;
    }

    async fn fetch_image(&self, image_id: i64) -> Result<Vec<u8>> {
        return HttpApi::fetch_image(self, image_id).await;
    }

    async fn upload(&self, request: &UploadRequest, bytes: Vec<u8>) -> Result<UploadResult> {
        return HttpApi::upload(self, request, bytes).await;
    }

    async fn generate_report(&self, user_id: i64) -> Result<Vec<u8>> {
        return HttpApi::generate_report(self, user_id).await;
    }
}
