/// CLI configuration
use anyhow::{bail, Context, Result};
use myflix_client::DEFAULT_API_URL;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_session")]
    pub session: SessionSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_url")]
    pub url: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionSettings {
    #[serde(default = "default_session_path")]
    pub path: PathBuf,
}

impl Settings {
    /// Load settings from a config file and the environment.
    ///
    /// An explicit `path` must exist; otherwise `config.toml` in the working
    /// directory is used when present. `MYFLIX_*` variables override both.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from("config.toml");
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables (MYFLIX_API_URL, MYFLIX_SESSION_PATH)
        settings = settings.add_source(
            config::Environment::with_prefix("MYFLIX")
                .separator("_")
                .try_parsing(true),
        );

        let settings: Settings = settings
            .build()
            .context("failed to read configuration")?
            .try_deserialize()
            .context("invalid configuration")?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            bail!("API URL is required (set MYFLIX_API_URL)");
        }
        Ok(())
    }
}

fn default_api() -> ApiSettings {
    ApiSettings { url: default_url() }
}

fn default_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_session() -> SessionSettings {
    SessionSettings {
        path: default_session_path(),
    }
}

fn default_session_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("myflix"))
        .unwrap_or_else(|| PathBuf::from(".myflix"))
        .join("session.json")
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: default_api(),
            session: default_session(),
        }
    }
}
