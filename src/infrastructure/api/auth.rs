#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::client::error_message;
use super::HttpApi;
use crate::domain::models::Credentials;
use crate::domain::models::Session;

#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct AuthRequest {
    email: String,
    password: String,
    #[serde(
        rename = "passwordConfirm",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    password_confirm: Option<String>,
}

impl AuthRequest {
    fn from_credentials(credentials: &Credentials) -> AuthRequest {
        return AuthRequest {
            email: credentials.email.to_string(),
            password: credentials.password.to_string(),
            password_confirm: credentials.password_confirm.clone(),
        };
    }
}

impl HttpApi {
    pub async fn session_probe(&self) -> Result<Session> {
        let res = self.get("/api/user/session").send().await?;
        if !res.status().is_success() {
            bail!("no active session");
        }

        let session = res.json::<Session>().await?;
        return Ok(session);
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<Session> {
        let res = self
            .post("/api/user/login")
            .json(&AuthRequest::from_credentials(credentials))
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(error_message(res).await);
        }

        let session = res.json::<Session>().await?;
        self.set_token(&session.token);
        return Ok(session);
    }

    pub async fn register(&self, credentials: &Credentials) -> Result<Session> {
        let res = self
            .post("/api/user/register")
            .json(&AuthRequest::from_credentials(credentials))
            .send()
            .await?;

        if !res.status().is_success() {
            bail!(error_message(res).await);
        }

        let session = res.json::<Session>().await?;
        self.set_token(&session.token);
        return Ok(session);
    }

    /// The token is dropped whether or not the server acknowledged the
    /// logout.
    pub async fn logout(&self) -> Result<()> {
        let res = self.post("/api/user/logout").send().await;
        self.clear_token();

        let res = res?;
        if !res.status().is_success() {
            bail!("logout returned status {}", res.status().as_u16());
        }

        return Ok(());
    }
}
