use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context as _;

use crate::{
    options::{API_KEY_VAR, BASE_URL_VAR, ENVIRONMENT_VAR},
    ClientOptions, Environment, Theme,
};

#[derive(Default, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "lowercase")]
pub struct Config {
    pub auth: Auth,
    pub client: ClientSection,
    pub appearance: Appearance,
}

#[derive(Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Auth {
    pub api_key: String,
}

impl std::fmt::Debug for Auth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Auth")
            .field("api_key", &crate::util::redacted(&self.api_key))
            .finish()
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ClientSection {
    pub environment: Environment,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for ClientSection {
    fn default() -> Self {
        Self {
            environment: Environment::default(),
            base_url: None,
            timeout_secs: ClientOptions::DEFAULT_TIMEOUT.as_secs(),
            max_retries: ClientOptions::DEFAULT_MAX_RETRIES,
        }
    }
}

#[derive(Default, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub colors: Theme,
}

impl Config {
    const NAMESPACE: &'static str = "ledger_sdk";

    const DEFAULT_CONFIG: &'static str = r##"
[auth]
# your api key. LEDGER_API_KEY takes priority over this
api_key = ""

[client]
# production or sandbox
environment  = "production"
# overrides the environment's url
# base_url   = "http://localhost:8080"
timeout_secs = 60
max_retries  = 2

[appearance.colors]
# syntax:  { fg: hex-color, bg: hex-color, bold: bool }
# default: { fg: "#C0C0C0", bg: <unset>, bold: false }
fringe      = { fg = "#808080", bold = true }
id          = { fg = "#3B78FF", bold = true }
description = { fg = "#C19C00", bold = true }
credit      = { fg = "#13A10E" }
debit       = { fg = "#C50F1F" }
status      = { fg = "#881798" }
timestamp   = { fg = "#3A96DD" }
"##;

    /// Loads the configuration file, falling back to the defaults when there isn't one
    pub fn load() -> anyhow::Result<Self> {
        let path = match Self::get_config_path() {
            Some(path) if path.is_file() => path,
            _ => {
                log::debug!("no configuration file found, using the defaults");
                return Ok(Self::default());
            }
        };

        let data = std::fs::read_to_string(&path)
            .with_context(|| format!("cannot read {}", path.display()))?;
        Self::from_toml(&data).with_context(|| format!("invalid toml in {}", path.display()))
    }

    pub fn from_toml(data: &str) -> anyhow::Result<Self> {
        toml::from_str(data).map_err(Into::into)
    }

    /// Writes the default configuration to [`Config::get_config_path`], returning that path
    pub fn make_default_config() -> anyhow::Result<PathBuf> {
        let dir = Self::get_config_dir().with_context(|| "cannot find config directory")?;
        let path = dir.join("config.toml");
        Self::write_default_config(&path)?;
        Ok(path)
    }

    /// Never replaces an existing file
    fn write_default_config(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!("{} already exists", path.display())
        }
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        std::fs::write(path, Self::default_formatted_toml())
            .with_context(|| format!("cannot write {}", path.display()))
    }

    pub fn get_config_path() -> Option<PathBuf> {
        Self::get_config_dir().map(|f| f.join("config.toml"))
    }

    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|f| f.join(Self::NAMESPACE))
    }

    pub const fn default_formatted_toml() -> &'static str {
        Self::DEFAULT_CONFIG
    }

    /// Builds the client options from this file, with the `LEDGER_*` environment variables taking priority
    pub fn client_options(&self) -> crate::Result<ClientOptions> {
        self.client_options_from(|key| std::env::var(key).ok())
    }

    fn client_options_from(
        &self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> crate::Result<ClientOptions> {
        let set = |key: &str| lookup(key).filter(|s: &String| !s.trim().is_empty());

        let api_key = set(API_KEY_VAR).unwrap_or_else(|| self.auth.api_key.clone());
        let mut options = ClientOptions::new(api_key)
            .environment(self.client.environment)
            .timeout(Duration::from_secs(self.client.timeout_secs))
            .max_retries(self.client.max_retries);

        if let Some(url) = &self.client.base_url {
            options = options.base_url(url);
        }
        if let Some(env) = set(ENVIRONMENT_VAR) {
            options = options.environment(env.parse()?);
        }
        if let Some(url) = set(BASE_URL_VAR) {
            options = options.base_url(url);
        }

        options.validate()?;
        Ok(options)
    }
}
