use anyhow::Result;

use crate::domain::models::Credentials;
use crate::domain::models::Session;
use crate::infrastructure::api::HttpApi;

fn credentials() -> Credentials {
    return Credentials {
        email: "m@example.com".to_string(),
        password: "securepassword".to_string(),
        password_confirm: None,
    };
}

fn session_body() -> Result<String> {
    return Ok(serde_json::to_string(&Session {
        user_id: 7,
        email: "m@example.com".to_string(),
        token: "abc".to_string(),
    })?);
}

#[tokio::test]
async fn it_probes_an_existing_session() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/user/session")
        .with_status(200)
        .with_body(r#"{"email": "m@example.com"}"#)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let session = api.session_probe().await?;
    mock.assert();

    assert_eq!(session.email, "m@example.com");
    assert_eq!(session.user_id, 0);

    return Ok(());
}

#[tokio::test]
async fn it_treats_a_probe_rejection_as_logged_out() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/api/user/session")
        .with_status(401)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let res = api.session_probe().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_logs_in_and_attaches_the_token_afterwards() -> Result<()> {
    let mut server = mockito::Server::new();
    let login_mock = server
        .mock("POST", "/api/user/login")
        .match_body(r#"{"email":"m@example.com","password":"securepassword"}"#)
        .with_status(200)
        .with_body(session_body()?)
        .create();
    let probe_mock = server
        .mock("GET", "/api/user/session")
        .match_header("Authorization", "Bearer abc")
        .with_status(200)
        .with_body(r#"{"email": "m@example.com"}"#)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let session = api.login(&credentials()).await?;
    assert_eq!(session.user_id, 7);
    assert_eq!(session.token, "abc");

    api.session_probe().await?;

    login_mock.assert();
    probe_mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_surfaces_login_validation_errors() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/user/login")
        .with_status(401)
        .with_body(r#"{"error": "Invalid email or password"}"#)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let res = api.login(&credentials()).await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Invalid email or password");
}

#[tokio::test]
async fn it_sends_the_password_confirmation_on_register() -> Result<()> {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/user/register")
        .match_body(
            r#"{"email":"m@example.com","password":"securepassword","passwordConfirm":"securepassword"}"#,
        )
        .with_status(200)
        .with_body(session_body()?)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let mut creds = credentials();
    creds.password_confirm = Some("securepassword".to_string());
    api.register(&creds).await?;

    mock.assert();
    return Ok(());
}

#[tokio::test]
async fn it_surfaces_detail_errors_from_register() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/user/register")
        .with_status(400)
        .with_body(r#"{"detail": "Email already registered"}"#)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let res = api.register(&credentials()).await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Email already registered");
}

#[tokio::test]
async fn it_falls_back_to_an_unknown_error_on_empty_bodies() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/user/login")
        .with_status(500)
        .create();

    let api = HttpApi::new(&server.url(), "");
    let res = api.login(&credentials()).await;

    mock.assert();
    assert_eq!(res.unwrap_err().to_string(), "Unknown error");
}

#[tokio::test]
async fn it_drops_the_token_on_logout_even_when_the_server_rejects_it() -> Result<()> {
    let mut server = mockito::Server::new();
    let login_mock = server
        .mock("POST", "/api/user/login")
        .with_status(200)
        .with_body(session_body()?)
        .create();
    let logout_mock = server
        .mock("POST", "/api/user/logout")
        .with_status(500)
        .create();
    let probe_mock = server
        .mock("GET", "/api/user/session")
        .match_header("Authorization", mockito::Matcher::Missing)
        .with_status(401)
        .create();

    let api = HttpApi::new(&server.url(), "");
    api.login(&credentials()).await?;

    let logout_res = api.logout().await;
    assert!(logout_res.is_err());

    let probe_res = api.session_probe().await;
    assert!(probe_res.is_err());

    login_mock.assert();
    logout_mock.assert();
    probe_mock.assert();

    return Ok(());
}
