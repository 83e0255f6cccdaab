//! Handles settings for the application. Configuration is written in
//! `settings.toml` and can be overridden from the environment with the
//! `LEDGERDASH` prefix and `__` as separator, e.g.
//! `LEDGERDASH__SERVER__PORT=8080`.
//!
//! See `settings.example.toml` for the configuration.
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level for the workspace crates (`trace`, `debug`, `info`, ...).
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "info".to_string()
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

/// The single dashboard account. Only the SHA-256 digest of the password is
/// configured; print one with `ledgerdash_admin hash-password`.
#[derive(Debug, Deserialize)]
pub struct Auth {
    pub username: String,
    pub password_sha256: String,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Option<Server>,
    pub auth: Auth,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("settings").required(false))
            .add_source(Environment::with_prefix("LEDGERDASH").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}
