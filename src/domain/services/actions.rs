#[cfg(test)]
#[path = "actions_test.rs"]
mod tests;

use std::path;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::models::Action;
use crate::domain::models::ChatPrompt;
use crate::domain::models::Event;
use crate::domain::models::ImagePreview;
use crate::domain::models::UploadRequest;
use crate::infrastructure::api::Api;

pub fn report_file_name(title: &str) -> String {
    let cleaned = title
        .split_whitespace()
        .collect::<Vec<&str>>()
        .join("_");

    return format!("{cleaned}_report.pdf");
}

fn report_target_dir() -> path::PathBuf {
    return dirs::download_dir().unwrap_or_else(std::env::temp_dir);
}

async fn submit_chat(
    api: &Arc<dyn Api>,
    prompt: ChatPrompt,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let seq = prompt.seq;
    match api.send_chat(prompt).await {
        Ok(reply) => {
            tx.send(Event::ChatCompleted { seq, reply })?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "chat request failed");
            tx.send(Event::ChatFailed { seq })?;
        }
    }

    return Ok(());
}

async fn fetch_chat_log(
    api: &Arc<dyn Api>,
    chat_id: i64,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    match api.fetch_chat_log(chat_id).await {
        Ok(entries) => {
            tx.send(Event::ChatLogLoaded(entries))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, chat_id = chat_id, "chat log fetch failed");
            tx.send(Event::ChatLogFailed())?;
        }
    }

    return Ok(());
}

async fn fetch_image(
    api: &Arc<dyn Api>,
    image_id: i64,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = async {
        let bytes = api.fetch_image(image_id).await?;
        return ImagePreview::new(image_id, &bytes);
    }
    .await;

    match res {
        Ok(preview) => {
            tx.send(Event::ImageLoaded(preview))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, image_id = image_id, "image fetch failed");
            tx.send(Event::ImageFailed())?;
        }
    }

    return Ok(());
}

async fn upload(
    api: &Arc<dyn Api>,
    request: UploadRequest,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let seq = request.seq;
    let res = async {
        let bytes = tokio::fs::read(&request.file).await?;
        return api.upload(&request, bytes).await;
    }
    .await;

    match res {
        Ok(result) => {
            tx.send(Event::UploadCompleted { seq, result })?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "upload failed");
            tx.send(Event::UploadFailed {
                seq,
                detail: err.to_string(),
            })?;
        }
    }

    return Ok(());
}

async fn generate_report(
    api: &Arc<dyn Api>,
    user_id: i64,
    title: &str,
    tx: &mpsc::UnboundedSender<Event>,
) -> Result<()> {
    let res = async {
        let bytes = api.generate_report(user_id).await?;
        let target = report_target_dir().join(report_file_name(title));
        tokio::fs::write(&target, bytes).await?;
        return anyhow::Ok(target);
    }
    .await;

    match res {
        Ok(target) => {
            tx.send(Event::ReportSaved(target))?;
        }
        Err(err) => {
            tracing::error!(error = ?err, "report generation failed");
            tx.send(Event::ReportFailed(
                "Failed to generate PDF. Please try again.".to_string(),
            ))?;
        }
    }

    return Ok(());
}

pub struct ActionsService {}

impl ActionsService {
    pub async fn start(
        api: Arc<dyn Api>,
        tx: mpsc::UnboundedSender<Event>,
        rx: &mut mpsc::UnboundedReceiver<Action>,
    ) -> Result<()> {
        // Lazy default.
        let mut worker: JoinHandle<Result<()>> = tokio::spawn(async {
            return Ok(());
        });

        loop {
            let action = rx.recv().await;
            if action.is_none() {
                continue;
            }

            let worker_tx = tx.clone();
            let worker_api = api.clone();
            match action.unwrap() {
                Action::Abort() => {
                    worker.abort();
                }
                // Auth calls resolve inline so the token handoff in the HTTP
                // client settles before anything else runs.
                Action::Login(credentials) => match api.login(&credentials).await {
                    Ok(session) => tx.send(Event::AuthSucceeded(session))?,
                    Err(err) => tx.send(Event::AuthFailed(err.to_string()))?,
                },
                Action::Register(credentials) => match api.register(&credentials).await {
                    Ok(session) => tx.send(Event::AuthSucceeded(session))?,
                    Err(err) => tx.send(Event::AuthFailed(err.to_string()))?,
                },
                Action::Logout() => {
                    // Best effort. The session is cleared either way.
                    if let Err(err) = api.logout().await {
                        tracing::warn!(error = ?err, "logout request failed");
                    }
                    tx.send(Event::LoggedOut())?;
                }
                Action::SubmitChat(prompt) => {
                    worker = tokio::spawn(async move {
                        return submit_chat(&worker_api, prompt, &worker_tx).await;
                    });
                }
                Action::FetchChatLog(chat_id) => {
                    worker = tokio::spawn(async move {
                        return fetch_chat_log(&worker_api, chat_id, &worker_tx).await;
                    });
                }
                Action::FetchImage(image_id) => {
                    worker = tokio::spawn(async move {
                        return fetch_image(&worker_api, image_id, &worker_tx).await;
                    });
                }
                Action::Upload(request) => {
                    worker = tokio::spawn(async move {
                        return upload(&worker_api, request, &worker_tx).await;
                    });
                }
                Action::GenerateReport { user_id, title } => {
                    worker = tokio::spawn(async move {
                        return generate_report(&worker_api, user_id, &title, &worker_tx).await;
                    });
                }
            }
        }
    }
}
