use serde::{Deserialize, Serialize};

use crate::models::auth::SessionUser;

/// Body of `GET /api/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub user: Option<SessionUser>,
}

impl MeResponse {
    /// The user, only when the backend vouched for it.
    pub fn into_user(self) -> Option<SessionUser> {
        if self.ok {
            self.user
        } else {
            None
        }
    }
}

/// Body of `POST /api/auth/login`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: Option<SessionUser>,
    #[serde(default)]
    pub message: Option<String>,
}

impl LoginResponse {
    /// The token, only when the login went through.
    pub fn token(&self) -> Option<&str> {
        if self.ok {
            self.token.as_deref().filter(|t| !t.is_empty())
        } else {
            None
        }
    }
}
