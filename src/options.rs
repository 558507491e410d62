use std::time::Duration;

use crate::{Error, Result};

pub const API_KEY_VAR: &str = "LEDGER_API_KEY";
pub const ENVIRONMENT_VAR: &str = "LEDGER_ENVIRONMENT";
pub const BASE_URL_VAR: &str = "LEDGER_BASE_URL";

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Production,
    Sandbox,
}

impl Environment {
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.increase.com",
            Self::Sandbox => "https://sandbox.increase.com",
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            s if s.eq_ignore_ascii_case("production") => Ok(Self::Production),
            s if s.eq_ignore_ascii_case("sandbox") => Ok(Self::Sandbox),
            env => Err(Error::Config(format!(
                "invalid environment: {env}. supported environments: [production | sandbox]"
            ))),
        }
    }
}

#[derive(Clone)]
pub struct ClientOptions {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
    pub max_retries: u32,
}

impl std::fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientOptions")
            .field("api_key", &crate::util::redacted(&self.api_key))
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl ClientOptions {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_MAX_RETRIES: u32 = 2;

    pub fn new(api_key: impl ToString) -> Self {
        Self {
            api_key: api_key.to_string(),
            base_url: Environment::default().base_url().to_string(),
            timeout: Self::DEFAULT_TIMEOUT,
            max_retries: Self::DEFAULT_MAX_RETRIES,
        }
    }

    /// Reads `LEDGER_API_KEY`, and optionally `LEDGER_ENVIRONMENT` and `LEDGER_BASE_URL`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_VAR)
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| Error::Config(format!("'{API_KEY_VAR}' must be set")))?;

        let mut this = Self::new(api_key);
        if let Some(env) = lookup(ENVIRONMENT_VAR) {
            this = this.environment(env.parse()?);
        }
        if let Some(url) = lookup(BASE_URL_VAR).filter(|s| !s.is_empty()) {
            this = this.base_url(url);
        }
        this.validate()?;
        Ok(this)
    }

    pub fn environment(self, env: Environment) -> Self {
        self.base_url(env.base_url())
    }

    pub fn base_url(self, url: impl ToString) -> Self {
        Self {
            base_url: url.to_string().trim_end_matches('/').to_string(),
            ..self
        }
    }

    pub fn timeout(self, timeout: Duration) -> Self {
        Self { timeout, ..self }
    }

    pub fn max_retries(self, max_retries: u32) -> Self {
        Self {
            max_retries,
            ..self
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_key.trim().is_empty() {
            return Err(Error::Config("the api key cannot be empty".into()));
        }
        if !self.base_url.starts_with("https://") && !self.base_url.starts_with("http://") {
            return Err(Error::Config(format!(
                "invalid base url: {}. it must start with http:// or https://",
                self.base_url
            )));
        }
        if self.timeout.is_zero() {
            return Err(Error::Config("the timeout must be greater than zero".into()));
        }
        Ok(())
    }
}
