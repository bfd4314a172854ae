use log::{debug, info};
use reqwest::Method;
use sansi_shared::{LoginRequest, LoginResponse, MeResponse, RegisterRequest, Session, SessionUser};

use crate::api::utils::{send_empty, send_json};
use crate::api::ApiClient;
use crate::error::{ClientError, Result};

impl ApiClient {
    /// `GET /api/auth/me`. No token, or a token the backend rejects, means no user.
    pub async fn me(&self) -> Result<Option<SessionUser>> {
        if self.token().is_none() {
            return Ok(None);
        }
        let req = self.authenticated_get(&["api", "auth", "me"])?;
        match send_json::<MeResponse>(req).await {
            Ok(me) => Ok(me.into_user()),
            Err(ClientError::Api { status, .. }) if status == 401 || status == 403 => {
                debug!("Token rejected by /api/auth/me (HTTP {})", status);
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// The token plus whatever user it resolves to.
    pub async fn session(&self) -> Result<Session> {
        let user = self.me().await?;
        Ok(Session::new(self.config().token.clone(), user))
    }

    /// `POST /api/auth/login`; on success the client keeps the returned token.
    pub async fn login(&mut self, request: &LoginRequest) -> Result<LoginResponse> {
        request.validate_fields()?;
        let req = self
            .authenticated_request(Method::POST, &["api", "auth", "login"])?
            .json(request);
        let body: LoginResponse = send_json(req).await?;

        match body.token() {
            Some(token) => {
                self.set_token(Some(token.to_string()));
                info!("Logged in as {}", request.email);
                Ok(body)
            }
            None => Err(ClientError::Api {
                status: 200,
                message: body
                    .message
                    .clone()
                    .unwrap_or_else(|| "Invalid credentials.".to_string()),
            }),
        }
    }

    /// `POST /api/auth/register`
    pub async fn register(&self, request: &RegisterRequest) -> Result<()> {
        request.validate_fields()?;
        let req = self
            .authenticated_request(Method::POST, &["api", "auth", "register"])?
            .json(request);
        send_empty(req).await
    }
}
