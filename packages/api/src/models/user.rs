//! # Identity models: users, schools and the auth payload
//!
//! ## [`UserInfo`]
//!
//! A staff account of one school as the backend returns it. The `role` field
//! drives every authorization decision on the client; it is parsed into
//! [`Role`], and unknown role strings land in [`Role::Other`] so they grant
//! neither principal nor teacher access.
//!
//! Teachers carry their classes in `assigned_classes` as a comma-separated
//! string; [`UserInfo::assigned_class_list`] splits it.
//!
//! ## [`SchoolInfo`]
//!
//! The tenant the user belongs to. Only its display fields are used by the UI.
//!
//! ## [`AuthResponse`]
//!
//! What `/auth/login`, `/auth/register-school` and `/auth/me` return: a bearer
//! token plus the user and school snapshots. It is the payload handed to
//! [`crate::SessionStore::login`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role of a staff account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Principal,
    Teacher,
    #[serde(untagged)]
    Other(String),
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Principal => "principal",
            Self::Teacher => "teacher",
            Self::Other(role) => role,
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User information as returned by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserInfo {
    pub id: String,
    pub school_id: String,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// Comma-separated class names (teachers only).
    #[serde(default)]
    pub assigned_classes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UserInfo {
    /// Get display name, falling back to email if name is empty.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.email
        } else {
            &self.name
        }
    }

    pub fn is_principal(&self) -> bool {
        self.role == Role::Principal
    }

    pub fn is_teacher(&self) -> bool {
        self.role == Role::Teacher
    }

    /// Assigned classes as a list, empty entries dropped.
    pub fn assigned_class_list(&self) -> Vec<String> {
        self.assigned_classes
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// School (tenant) information.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchoolInfo {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Token plus identity snapshot returned by every auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub user: UserInfo,
    pub school: SchoolInfo,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `POST /auth/login`.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of `POST /auth/register-school`.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterSchoolRequest {
    pub school_name: String,
    pub school_address: Option<String>,
    pub school_phone: Option<String>,
    pub school_email: Option<String>,
    pub user_name: String,
    pub user_email: String,
    pub user_password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user_json(role: &str) -> String {
        format!(
            r#"{{"id":"u1","school_id":"s1","email":"a@school.test","name":"Asha",
               "role":"{role}","created_at":"2024-06-01T08:00:00Z"}}"#
        )
    }

    #[test]
    fn test_role_parsing() {
        let principal: UserInfo = serde_json::from_str(&user_json("principal")).unwrap();
        assert!(principal.is_principal());
        assert!(!principal.is_teacher());

        let teacher: UserInfo = serde_json::from_str(&user_json("teacher")).unwrap();
        assert!(teacher.is_teacher());
        assert!(!teacher.is_principal());

        let other: UserInfo = serde_json::from_str(&user_json("accountant")).unwrap();
        assert_eq!(other.role, Role::Other("accountant".to_string()));
        assert!(!other.is_principal());
        assert!(!other.is_teacher());
    }

    #[test]
    fn test_assigned_class_list() {
        let mut user: UserInfo = serde_json::from_str(&user_json("teacher")).unwrap();
        assert!(user.assigned_class_list().is_empty());

        user.assigned_classes = Some("Class 3, Class 4,,".to_string());
        assert_eq!(user.assigned_class_list(), vec!["Class 3", "Class 4"]);
    }

    #[test]
    fn test_display_name_falls_back_to_email() {
        let mut user: UserInfo = serde_json::from_str(&user_json("teacher")).unwrap();
        assert_eq!(user.display_name(), "Asha");
        user.name = "  ".to_string();
        assert_eq!(user.display_name(), "a@school.test");
    }
}
