#[cfg(test)]
#[path = "uploads_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use reqwest::multipart;

use super::client::error_message;
use super::HttpApi;
use crate::domain::models::ChatLogInsights;
use crate::domain::models::ImageDetections;
use crate::domain::models::UploadKind;
use crate::domain::models::UploadRequest;
use crate::domain::models::UploadResult;

impl HttpApi {
    pub async fn upload(&self, request: &UploadRequest, bytes: Vec<u8>) -> Result<UploadResult> {
        let file_name = request
            .file
            .file_name()
            .map(|name| return name.to_string_lossy().to_string())
            .unwrap_or_else(|| return "upload".to_string());

        let part = multipart::Part::bytes(bytes).file_name(file_name);
        let form = multipart::Form::new()
            .part("file", part)
            .text("user_id", request.user_id.to_string());

        match request.kind {
            UploadKind::ChatLog => {
                let res = self
                    .post("/api/process_chatlog")
                    .multipart(form)
                    .send()
                    .await?;
                if !res.status().is_success() {
                    bail!(error_message(res).await);
                }

                let insights = res.json::<ChatLogInsights>().await?;
                return Ok(UploadResult::ChatLog(insights));
            }
            UploadKind::Image => {
                let form = form.text("type", "image");
                let res = self
                    .post("/api/detect_objects")
                    .multipart(form)
                    .send()
                    .await?;
                if !res.status().is_success() {
                    bail!(error_message(res).await);
                }

                let detections = res.json::<ImageDetections>().await?;
                return Ok(UploadResult::Image(detections));
            }
        }
    }
}
