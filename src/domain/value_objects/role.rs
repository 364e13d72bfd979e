//! Authorization roles.

use serde::{Deserialize, Serialize};

/// Authorization tier of an authenticated principal.
///
/// `Student`, `Tutor` and `Admin` are regular accounts in the `users` table.
/// `Nucleus` is the super-admin tier backed by `nucleus_users` and only
/// issued by the nucleus login.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Tutor,
    Admin,
    Nucleus,
}

impl UserRole {
    /// Parse the database/token representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "student" => Some(Self::Student),
            "tutor" => Some(Self::Tutor),
            "admin" => Some(Self::Admin),
            "nucleus" => Some(Self::Nucleus),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Student => "student",
            Self::Tutor => "tutor",
            Self::Admin => "admin",
            Self::Nucleus => "nucleus",
        }
    }

    /// Staff may manage departments and read analytics.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Admin | Self::Nucleus)
    }

    /// Roles a user may pick for themselves at registration.
    pub fn is_self_assignable(&self) -> bool {
        matches!(self, Self::Student | Self::Tutor)
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_round_trips_known_roles() {
        for role in [UserRole::Student, UserRole::Tutor, UserRole::Admin, UserRole::Nucleus] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
        assert_eq!(UserRole::parse("ADMIN"), Some(UserRole::Admin));
        assert_eq!(UserRole::parse("root"), None);
    }

    #[test]
    fn test_staff_and_self_assignable() {
        assert!(UserRole::Admin.is_staff());
        assert!(UserRole::Nucleus.is_staff());
        assert!(!UserRole::Tutor.is_staff());
        assert!(UserRole::Tutor.is_self_assignable());
        assert!(!UserRole::Admin.is_self_assignable());
        assert!(!UserRole::Nucleus.is_self_assignable());
    }
}
