#[cfg(test)]
#[path = "config_test.rs"]
mod tests;

use std::path;

use anyhow::Result;
use clap::parser::ValueSource;
use clap::ArgMatches;
use clap::Command;
use dashmap::DashMap;
use once_cell::sync::Lazy;
use tokio::fs;

static CONFIG: Lazy<DashMap<String, String>> = Lazy::new(DashMap::new);

#[derive(Clone, Copy, Eq, PartialEq)]
pub enum ConfigKey {
    BaseURL,
    ConfigFile,
    RequestTimeout,
    Token,
    Username,
}

impl ConfigKey {
    pub fn iter() -> impl Iterator<Item = ConfigKey> {
        return [
            ConfigKey::BaseURL,
            ConfigKey::ConfigFile,
            ConfigKey::RequestTimeout,
            ConfigKey::Token,
            ConfigKey::Username,
        ]
        .into_iter();
    }
}

impl ToString for ConfigKey {
    fn to_string(&self) -> String {
        let res = match self {
            ConfigKey::BaseURL => "base-url",
            ConfigKey::ConfigFile => "config-file",
            ConfigKey::RequestTimeout => "request-timeout",
            ConfigKey::Token => "token",
            ConfigKey::Username => "username",
        };

        return res.to_string();
    }
}

pub struct Config {}

impl Config {
    pub fn get(key: ConfigKey) -> String {
        if let Some(val) = CONFIG.get(&key.to_string()) {
            return val.to_string();
        }

        return "".to_string();
    }

    pub fn set(key: ConfigKey, value: &str) {
        CONFIG.insert(key.to_string(), value.to_string());
    }

    pub fn default(key: ConfigKey) -> String {
        if key == ConfigKey::Username {
            let mut user = std::env::var("USER").unwrap_or_else(|_| return "".to_string());
            if user.is_empty() {
                user = "You".to_string();
            }

            return user;
        }

        let config_path = dirs::config_dir()
            .unwrap_or_else(|| return path::PathBuf::from("."))
            .join("homeworth/config.toml");

        let res = match key {
            ConfigKey::BaseURL => "http://localhost:8000",
            ConfigKey::RequestTimeout => "30000",
            ConfigKey::Token => "",

            // Special
            ConfigKey::ConfigFile => config_path.to_str().unwrap(),
            ConfigKey::Username => "",
        };

        return res.to_string();
    }

    pub fn serialize_default(cmd: Command) -> String {
        let mut res = String::new();
        for key in ConfigKey::iter() {
            if key == ConfigKey::ConfigFile {
                continue;
            }

            if let Some(arg) = cmd
                .get_arguments()
                .find(|e| return e.get_long().unwrap_or_default() == key.to_string())
            {
                if let Some(help) = arg.get_help() {
                    res.push_str(&format!("# {help}\n"));
                }
            }

            let value = toml_edit::Value::from(Config::default(key));
            res.push_str(&format!("{} ={value}\n\n", key.to_string()));
        }

        return res.trim_end().to_string() + "\n";
    }

    pub async fn load(clap_arg_matches: &ArgMatches) -> Result<()> {
        for key in ConfigKey::iter() {
            Config::set(key, &Config::default(key))
        }

        let mut config_file = Config::default(ConfigKey::ConfigFile);
        if let Some(arg_config_file) =
            clap_arg_matches.get_one::<String>(&ConfigKey::ConfigFile.to_string())
        {
            config_file = arg_config_file.to_string();
        }

        let config_path = path::PathBuf::from(config_file);
        if config_path.exists() {
            let toml_str = fs::read_to_string(config_path).await?;
            let doc = toml_str.parse::<toml_edit::Document>()?;

            for key in ConfigKey::iter() {
                if let Some(val) = doc.get(&key.to_string()) {
                    if let Some(val_int) = val.as_integer() {
                        Config::set(key, &val_int.to_string());
                    } else if let Some(val_str) = val.as_str() {
                        if val_str.is_empty() {
                            continue;
                        }
                        Config::set(key, val_str);
                    }
                }
            }
        }

        for key in ConfigKey::iter() {
            if let Some(val) = clap_arg_matches.get_one::<String>(&key.to_string()) {
                let source = clap_arg_matches.value_source(&key.to_string());
                if source != Some(ValueSource::DefaultValue) {
                    Config::set(key, val);
                }
            }
        }

        return Ok(());
    }
}
