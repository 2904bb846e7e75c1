//! User domain entity
//!
//! Email is the unique login identifier; display name is required.

use chrono::{DateTime, Utc};

/// User role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserRole {
    Admin,
    Host,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Host => "host",
            Self::Guest => "guest",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s {
            "admin" => Self::Admin,
            "host" => Self::Host,
            _ => Self::Guest,
        }
    }
}

impl Default for UserRole {
    fn default() -> Self {
        Self::Guest
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Registered account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    pub password_hash: String,
    pub role: UserRole,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: impl Into<String>, name: impl Into<String>, password_hash: String) -> Self {
        Self {
            id: 0,
            email: email.into(),
            name: name.into(),
            phone: None,
            password_hash,
            role: UserRole::Guest,
            is_active: true,
            created_at: Utc::now(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_roundtrip() {
        for role in &[UserRole::Admin, UserRole::Host, UserRole::Guest] {
            assert_eq!(&UserRole::from_str(role.as_str()), role);
        }
    }

    #[test]
    fn unknown_role_defaults_to_guest() {
        assert_eq!(UserRole::from_str("superuser"), UserRole::Guest);
    }

    #[test]
    fn new_user_is_active_guest() {
        let u = User::new("a@example.com", "Alice", "hash".into());
        assert!(u.is_active);
        assert!(!u.is_admin());
    }
}
