//! # Identity
//!
//! The resolved caller of a request: anonymous, or a named user with a
//! derived role. Resolution itself lives on `ForumService::identify`, which
//! consults the session registry and then the users collection.

use fb_core::models::Role;
use fb_core::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Anonymous,
    User { username: String, role: Role },
}

impl Identity {
    pub fn username(&self) -> Option<&str> {
        match self {
            Identity::Anonymous => None,
            Identity::User { username, .. } => Some(username),
        }
    }

    pub fn role(&self) -> Option<Role> {
        match self {
            Identity::Anonymous => None,
            Identity::User { role, .. } => Some(*role),
        }
    }

    pub fn is_logged_in(&self) -> bool {
        !matches!(self, Identity::Anonymous)
    }

    pub fn is_moderator(&self) -> bool {
        self.role().is_some_and(|r| r >= Role::Moderator)
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Some(Role::Administrator)
    }

    /// The caller's username, or `Unauthorized` when anonymous.
    pub fn require_member(&self) -> Result<&str> {
        self.username()
            .ok_or_else(|| AppError::Unauthorized("login required".into()))
    }

    pub fn require_moderator(&self) -> Result<&str> {
        if self.is_moderator() {
            Ok(self.username().unwrap_or_default())
        } else {
            Err(AppError::Unauthorized("moderator role required".into()))
        }
    }

    pub fn require_admin(&self) -> Result<&str> {
        if self.is_admin() {
            Ok(self.username().unwrap_or_default())
        } else {
            Err(AppError::Unauthorized("administrator role required".into()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_privileges() {
        let id = Identity::Anonymous;
        assert!(!id.is_logged_in());
        assert!(id.require_member().is_err());
        assert!(id.require_moderator().is_err());
        assert!(id.require_admin().is_err());
    }

    #[test]
    fn role_gates_are_ordered() {
        let member = Identity::User {
            username: "m".into(),
            role: Role::Member,
        };
        assert!(member.require_member().is_ok());
        assert!(member.require_moderator().is_err());

        let moderator = Identity::User {
            username: "mod".into(),
            role: Role::Moderator,
        };
        assert!(moderator.require_moderator().is_ok());
        assert!(moderator.require_admin().is_err());

        let admin = Identity::User {
            username: "root".into(),
            role: Role::Administrator,
        };
        assert!(admin.require_moderator().is_ok());
        assert!(admin.require_admin().is_ok());
    }
}
