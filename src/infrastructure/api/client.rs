use std::sync::RwLock;
use std::time::Duration;

use serde_derive::Deserialize;

use crate::configuration::Config;
use crate::configuration::ConfigKey;

/// Structured error body the backend returns on validation failures. Older
/// endpoints use `error`, the FastAPI-generated ones use `detail`.
#[derive(Default, Debug, Clone, PartialEq, Eq, Deserialize)]
pub(super) struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    detail: Option<String>,
}

impl ErrorBody {
    fn message(self) -> String {
        return self
            .error
            .or(self.detail)
            .unwrap_or_else(|| return "Unknown error".to_string());
    }
}

/// Extracts a user-facing message from a failed response, consuming it.
pub(super) async fn error_message(res: reqwest::Response) -> String {
    let status = res.status().as_u16();
    let body = res.json::<ErrorBody>().await.unwrap_or_default();
    let message = body.message();
    tracing::error!(status = status, message = message, "request rejected");
    return message;
}

/// HTTP client for the backend. Owns the bearer token: set on login and
/// register, dropped on logout, never read by anything outside this module.
/// The cookie store carries the server session across the startup probe.
pub struct HttpApi {
    base_url: String,
    token: RwLock<Option<String>>,
    client: reqwest::Client,
}

impl HttpApi {
    pub fn new(base_url: &str, token: &str) -> HttpApi {
        let timeout = Config::get(ConfigKey::RequestTimeout)
            .parse::<u64>()
            .unwrap_or(30000);

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_millis(timeout))
            .build()
            .unwrap_or_else(|err| {
                tracing::warn!(error = ?err, "falling back to a default HTTP client");
                return reqwest::Client::new();
            });

        return HttpApi {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(Some(token.to_string()).filter(|t| return !t.is_empty())),
            client,
        };
    }

    pub(super) fn set_token(&self, token: &str) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|err| return err.into_inner());
        *guard = Some(token.to_string()).filter(|t| return !t.is_empty());
    }

    pub(super) fn clear_token(&self) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(|err| return err.into_inner());
        *guard = None;
    }

    fn token(&self) -> Option<String> {
        let guard = self
            .token
            .read()
            .unwrap_or_else(|err| return err.into_inner());
        return guard.clone();
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        if let Some(token) = self.token() {
            return builder.header("Authorization", format!("Bearer {token}"));
        }

        return builder;
    }

    pub(super) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        return self.authorize(
            self.client
                .get(format!("{base}{path}", base = self.base_url)),
        );
    }

    pub(super) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        return self.authorize(
            self.client
                .post(format!("{base}{path}", base = self.base_url)),
        );
    }
}
