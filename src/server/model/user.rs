//! User domain models and parameters.

use chrono::{DateTime, Utc};
use std::{fmt, str::FromStr};

use crate::{
    model::user::{RegisterDto, UpdateProfileDto, UserDto},
    server::error::AppError,
};

/// Role controlling what a user may do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    #[default]
    Student,
    Staff,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Staff => "staff",
            Self::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Self::Student),
            "staff" => Ok(Self::Staff),
            "admin" => Ok(Self::Admin),
            other => Err(AppError::BadRequest(format!("Invalid role '{}'", other))),
        }
    }
}

/// Registered account.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub department: Option<String>,
    pub profile_image: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Staff and admins may publish resources.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Staff | Role::Admin)
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role.to_string(),
            department: self.department,
            profile_image: self.profile_image,
            created_at: self.created_at,
        }
    }

    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// Unknown stored roles fall back to `student`, the least privileged role.
    pub fn from_entity(entity: entity::user::Model) -> Self {
        Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role: entity.role.parse().unwrap_or_default(),
            department: entity.department,
            profile_image: entity.profile_image,
            created_at: entity.created_at,
        }
    }
}

/// Parameters for inserting a new account.
#[derive(Debug, Clone)]
pub struct CreateUserParam {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub role: Role,
    pub department: Option<String>,
}

/// Fields a user may change on their own profile. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateProfileParam {
    pub name: Option<String>,
    pub email: Option<String>,
    pub department: Option<String>,
    pub profile_image: Option<String>,
}

impl From<UpdateProfileDto> for UpdateProfileParam {
    /// Blank strings count as not supplied.
    fn from(dto: UpdateProfileDto) -> Self {
        fn supplied(value: Option<String>) -> Option<String> {
            value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
        }

        Self {
            name: supplied(dto.name),
            email: supplied(dto.email),
            department: supplied(dto.department),
            profile_image: supplied(dto.profile_image),
        }
    }
}

/// Validated self-registration request.
#[derive(Debug, Clone)]
pub struct RegisterParam {
    pub email: String,
    pub password: String,
    pub name: String,
    pub department: Option<String>,
    pub admin_code: Option<String>,
}

impl TryFrom<RegisterDto> for RegisterParam {
    type Error = AppError;

    fn try_from(dto: RegisterDto) -> Result<Self, Self::Error> {
        let email = dto.email.trim().to_string();
        let name = dto.name.trim().to_string();

        if email.is_empty() || name.is_empty() || dto.password.is_empty() {
            return Err(AppError::BadRequest(
                "Please fill in all required fields.".to_string(),
            ));
        }

        Ok(Self {
            email,
            password: dto.password,
            name,
            department: dto
                .department
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            admin_code: dto.admin_code.filter(|c| !c.is_empty()),
        })
    }
}
