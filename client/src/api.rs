// Endpoint groups of the backend API
pub mod auth;
pub mod competitions;
pub mod evaluations;
pub mod inscriptions;
pub mod utils;

use std::time::Duration;

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};

/// Handle on the backend. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ClientConfig,
}

impl ApiClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(ClientError::Transport)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn token(&self) -> Option<&str> {
        self.config.token.as_deref()
    }

    /// Replaces the bearer token, e.g. after a login.
    pub fn set_token(&mut self, token: Option<String>) {
        self.config.token = token;
    }

    /// Absolute URL for the given path segments, appended to the base URL's
    /// own path. Each segment is percent-encoded, so IDs cannot add segments,
    /// a query or a fragment.
    pub fn api_url(&self, segments: &[&str]) -> Result<url::Url> {
        let mut url = self.config.api_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ClientError::Config(format!("API URL cannot be a base: {}", self.config.api_url))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
