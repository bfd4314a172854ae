use log::{debug, warn};
use reqwest::{Method, RequestBuilder, Response};
use sansi_shared::ErrorResponse;
use serde::de::DeserializeOwned;

use crate::api::ApiClient;
use crate::error::{ClientError, Result};

impl ApiClient {
    /// Creates a request with the Authorization header when a token is configured.
    pub(crate) fn authenticated_request(
        &self,
        method: Method,
        path: &[&str],
    ) -> Result<RequestBuilder> {
        let url = self.api_url(path)?;
        debug!("{} {}", method, url);
        let mut req = self
            .http
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(token) = self.token() {
            req = req.bearer_auth(token);
        }

        Ok(req)
    }

    /// Same as [`Self::authenticated_request`] but refuses to go out without a token.
    pub(crate) fn token_request(&self, method: Method, path: &[&str]) -> Result<RequestBuilder> {
        if self.token().map_or(true, str::is_empty) {
            return Err(ClientError::MissingToken);
        }
        self.authenticated_request(method, path)
    }

    pub(crate) fn authenticated_get(&self, path: &[&str]) -> Result<RequestBuilder> {
        self.authenticated_request(Method::GET, path)
    }
}

/// Sends the request and decodes a JSON body from a success response.
pub(crate) async fn send_json<T: DeserializeOwned>(req: RequestBuilder) -> Result<T> {
    let response = check_status(req.send().await?).await?;
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode(e.to_string()))
}

/// Sends the request and ignores any success body.
pub(crate) async fn send_empty(req: RequestBuilder) -> Result<()> {
    check_status(req.send().await?).await?;
    Ok(())
}

/// Sends the request and rejects an `{ "ok": false }` body. An empty or
/// non-JSON success body counts as accepted.
pub(crate) async fn send_acknowledged(req: RequestBuilder) -> Result<()> {
    let body = match send_json::<serde_json::Value>(req).await {
        Ok(body) => body,
        Err(ClientError::Decode(_)) => serde_json::Value::Null,
        Err(err) => return Err(err),
    };
    ensure_ok(&body)
}

/// Turns a non-success response into [`ClientError::Api`].
///
/// The backend's `message` is used when the body has one, otherwise the raw
/// text, otherwise `HTTP {status}`.
pub(crate) async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&text)
        .ok()
        .and_then(|body| body.message)
        .filter(|m| !m.is_empty())
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty() && !trimmed.starts_with('{')).then(|| trimmed.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()));

    warn!("API error {}: {}", status.as_u16(), message);
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

/// Rejects `{ "ok": false, ... }` bodies that came with a success status.
pub(crate) fn ensure_ok(body: &serde_json::Value) -> Result<()> {
    if body.get("ok").and_then(serde_json::Value::as_bool) == Some(false) {
        let message = body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Request was rejected")
            .to_string();
        return Err(ClientError::Api {
            status: 200,
            message,
        });
    }
    Ok(())
}
