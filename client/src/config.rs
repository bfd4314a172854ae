use dotenv::dotenv;
use log::{info, warn};
use sansi_shared::timezone::DEFAULT_TIMEZONE;
use std::env;
use url::Url;

use crate::error::{ClientError, Result};

pub const DEFAULT_API_URL: &str = "http://localhost:4000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Test,
    Production,
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Development),
            "test" => Ok(Environment::Test),
            "prod" | "production" => Ok(Environment::Production),
            _ => Err(format!("Unknown environment: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub environment: Environment,
    /// Backend base URL, e.g. `http://localhost:4000`
    pub api_url: Url,
    /// Bearer token sent with authenticated requests
    pub token: Option<String>,
    pub timeout_seconds: u64,
    /// Zone used to read "now" for stage decisions
    pub timezone: String,
}

impl ClientConfig {
    /// Config pointing at `api_url` with everything else defaulted.
    pub fn new(api_url: &str) -> Result<Self> {
        Ok(Self {
            environment: Environment::Development,
            api_url: parse_api_url(api_url)?,
            token: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            timezone: DEFAULT_TIMEZONE.to_string(),
        })
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Loads `.env` files, then reads the process environment.
    pub fn load() -> Result<Self> {
        match env::var("ENV_FILE_PATH") {
            Ok(path) if !path.is_empty() => {
                info!("Loading environment from ENV_FILE_PATH: {}", path);
                dotenv::from_filename(&path).ok();
            }
            _ => {
                dotenv().ok();
                let environment_hint = env::var("RUST_ENV")
                    .unwrap_or_else(|_| "development".to_string())
                    .parse()
                    .unwrap_or(Environment::Development);
                let env_file = format!(".env.{:?}", environment_hint).to_lowercase();
                if env_file != ".env.development" {
                    let _ = dotenv::from_filename(&env_file);
                }
            }
        }

        let config = Self::from_lookup(|key| env::var(key).ok())?;
        config.log_configuration();
        Ok(config)
    }

    /// Builds the config from any key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("RUST_ENV")
            .and_then(|v| v.parse().ok())
            .unwrap_or_default();

        let api_url = lookup("SANSI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_seconds = match lookup("SANSI_TIMEOUT_SECONDS") {
            Some(raw) => raw.trim().parse().map_err(|_| {
                ClientError::Config(format!("SANSI_TIMEOUT_SECONDS is not a number: {}", raw))
            })?,
            None => DEFAULT_TIMEOUT_SECONDS,
        };

        let config = Self {
            environment,
            api_url: parse_api_url(&api_url)?,
            token: lookup("SANSI_TOKEN").filter(|t| !t.trim().is_empty()),
            timeout_seconds,
            timezone: lookup("SANSI_TIMEZONE").unwrap_or_else(|| DEFAULT_TIMEZONE.to_string()),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.timeout_seconds == 0 {
            return Err(ClientError::Config("Timeout cannot be 0".to_string()));
        }
        if self.environment == Environment::Production && self.api_url.scheme() != "https" {
            return Err(ClientError::Config(
                "Production API URL must use https".to_string(),
            ));
        }
        Ok(())
    }

    fn log_configuration(&self) {
        info!("Configuration loaded successfully");
        info!("Environment: {:?}", self.environment);
        info!("API: {} (timeout: {}s)", self.api_url, self.timeout_seconds);
        info!("Timezone: {}", self.timezone);
        if self.token.is_none() {
            warn!("No SANSI_TOKEN configured - requests will be unauthenticated");
        }
    }
}

pub fn parse_api_url(raw: &str) -> Result<Url> {
    Url::parse(raw.trim()).map_err(|e| ClientError::Config(format!("Invalid API URL {}: {}", raw, e)))
}
