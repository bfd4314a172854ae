use crate::error::{Result, SharedError};
use crate::models::permissions::{Permissions, Role};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request for account registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Full name
    #[validate(length(min = 1, max = 100, message = "Name is required"))]
    pub name: String,

    /// User's email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// User's password
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,

    #[serde(rename = "ciudad", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// National identity card number
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci: Option<String>,

    /// Requested role code
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
}

impl RegisterRequest {
    pub fn new(name: String, email: String, password: String) -> Result<Self> {
        let request = Self {
            name: name.trim().to_string(),
            email: email.trim().to_string(),
            password,
            city: None,
            ci: None,
            role: None,
        };
        request.validate_fields()?;
        Ok(request)
    }

    /// Checks the password first, the way the registration form does.
    pub fn validate_fields(&self) -> Result<()> {
        if self.password.chars().count() < 6 {
            return Err(SharedError::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        self.validate().map_err(SharedError::from)
    }
}

/// Request for login
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginRequest {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate_fields(&self) -> Result<()> {
        self.validate().map_err(SharedError::from)
    }
}

/// Role details attached to the session user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RoleInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub permissions: Permissions,
}

/// The logged-in user as reported by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    /// Role code; custom roles use their slug
    pub role: String,
    #[serde(default)]
    pub role_info: Option<RoleInfo>,
}

impl SessionUser {
    /// The built-in role, if the code names one.
    pub fn builtin_role(&self) -> Option<Role> {
        self.role.parse().ok()
    }

    /// Capability flags for this user.
    ///
    /// Role info sent by the backend wins; otherwise the built-in role decides,
    /// and an unknown role gets nothing.
    pub fn permissions(&self) -> Permissions {
        match (&self.role_info, self.builtin_role()) {
            (Some(info), _) => info.permissions,
            (None, Some(role)) => Permissions::for_role(role),
            (None, None) => Permissions::default(),
        }
    }

    /// Whether competition edit and delete actions are shown.
    pub fn can_manage_competitions(&self) -> bool {
        self.builtin_role()
            .map_or(false, Role::can_manage_competitions)
    }
}

/// What a screen knows about the visitor: maybe a token, maybe a user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    pub token: Option<String>,
    pub user: Option<SessionUser>,
}

impl Session {
    pub fn new(token: Option<String>, user: Option<SessionUser>) -> Self {
        Self { token, user }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.as_deref().map_or(false, |t| !t.is_empty())
    }

    pub fn permissions(&self) -> Permissions {
        self.user
            .as_ref()
            .map(SessionUser::permissions)
            .unwrap_or_default()
    }
}
