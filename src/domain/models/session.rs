use serde_derive::Deserialize;
use serde_derive::Serialize;

/// The authenticated user record held for the lifetime of the app. Populated
/// by the startup session probe or a successful login/register, cleared on
/// logout or probe failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub user_id: i64,
    pub email: String,
    #[serde(default)]
    pub token: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
    pub password_confirm: Option<String>,
}
