use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SharedError;

/// Built-in roles. Custom roles arrive as permission sets only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    #[serde(rename = "RESPONSABLEACADEMICO")]
    AcademicLead,
    #[serde(rename = "EVALUADOR")]
    Evaluator,
    #[serde(rename = "ESTUDIANTE")]
    Student,
    Tutor,
}

impl Role {
    pub fn code(self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::AcademicLead => "RESPONSABLEACADEMICO",
            Role::Evaluator => "EVALUADOR",
            Role::Student => "ESTUDIANTE",
            Role::Tutor => "TUTOR",
        }
    }

    /// Create, edit and delete competitions.
    pub fn can_manage_competitions(self) -> bool {
        matches!(self, Role::Admin | Role::AcademicLead)
    }

    pub fn can_manage_users(self) -> bool {
        self == Role::Admin
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    pub fn is_academic_lead(self) -> bool {
        self == Role::AcademicLead
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Role {
    type Err = SharedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ADMIN" => Ok(Role::Admin),
            "RESPONSABLEACADEMICO" => Ok(Role::AcademicLead),
            "EVALUADOR" => Ok(Role::Evaluator),
            "ESTUDIANTE" => Ok(Role::Student),
            "TUTOR" => Ok(Role::Tutor),
            other => Err(SharedError::UnknownCode(format!("role {}", other))),
        }
    }
}

/// Menu entries a role may see.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarFlags {
    pub home: bool,
    pub competencias: bool,
    pub usuarios: bool,
    pub roles: bool,
    pub tutorias: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrudFlags {
    pub read: bool,
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InscriptionFlags {
    pub read: bool,
    pub create: bool,
    pub delete: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TutoringFlags {
    pub read: bool,
    pub manage: bool,
}

/// Capability flags attached to a role.
///
/// Anything the backend leaves out reads as `false`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Permissions {
    pub navbar: NavbarFlags,
    pub competitions: CrudFlags,
    pub users: CrudFlags,
    pub roles: CrudFlags,
    pub inscriptions: InscriptionFlags,
    #[serde(rename = "evaluaciones")]
    pub evaluations: CrudFlags,
    #[serde(rename = "tutorias")]
    pub tutoring: TutoringFlags,
}

impl Permissions {
    /// Starting point of the role editor: browse and enroll, nothing else.
    pub fn role_defaults() -> Self {
        Self {
            navbar: NavbarFlags {
                home: true,
                competencias: true,
                ..NavbarFlags::default()
            },
            competitions: CrudFlags {
                read: true,
                ..CrudFlags::default()
            },
            inscriptions: InscriptionFlags {
                read: true,
                create: true,
                delete: false,
            },
            ..Self::default()
        }
    }

    /// Flags implied by a built-in role when the session carries no role info.
    pub fn for_role(role: Role) -> Self {
        let mut perms = Self::role_defaults();
        if role.can_manage_competitions() {
            perms.competitions = CrudFlags {
                read: true,
                create: true,
                update: true,
                delete: true,
            };
        }
        if role.can_manage_users() {
            perms.navbar.usuarios = true;
            perms.navbar.roles = true;
            perms.users = CrudFlags {
                read: true,
                create: true,
                update: true,
                delete: true,
            };
            perms.roles = perms.users;
        }
        match role {
            Role::Evaluator => {
                perms.evaluations = CrudFlags {
                    read: true,
                    create: true,
                    update: true,
                    delete: false,
                };
            }
            Role::Tutor => {
                perms.navbar.tutorias = true;
                perms.tutoring = TutoringFlags {
                    read: true,
                    manage: true,
                };
            }
            _ => {}
        }
        perms
    }

    /// Menu visibility used by the navigation bar.
    pub fn can_see_competitions(&self) -> bool {
        self.competitions.read
    }

    pub fn can_see_users(&self) -> bool {
        self.users.read
    }

    pub fn can_see_my_competitions(&self) -> bool {
        self.inscriptions.read
    }
}
