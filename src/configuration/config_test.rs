use anyhow::Result;

use super::Config;
use super::ConfigKey;
use crate::application::cli;

#[test]
fn it_serializes_to_valid_toml() {
    let res = Config::serialize_default(cli::build());
    let toml_res = res.parse::<toml_edit::Document>();
    assert!(toml_res.is_ok());

    let doc = toml_res.unwrap();
    assert_eq!(
        doc.get("base-url").unwrap().as_str().unwrap(),
        "http://localhost:8000"
    );
    assert!(doc.get("config-file").is_none());
}

#[tokio::test]
async fn it_loads_config_from_file() -> Result<()> {
    let matches = cli::build().try_get_matches_from(vec!["homeworth", "-c", "./config.example.toml"])?;
    Config::load(&matches).await?;

    assert_eq!(Config::get(ConfigKey::BaseURL), "http://localhost:8000");
    return Ok(());
}

#[tokio::test]
async fn it_fails_to_load_config_from_file() -> Result<()> {
    let matches =
        cli::build().try_get_matches_from(vec!["homeworth", "-c", "./test/bad-config.toml"])?;
    let res = Config::load(&matches).await;
    assert!(res.is_err());
    return Ok(());
}
