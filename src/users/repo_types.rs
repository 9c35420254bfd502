use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{RepoError, RepoResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Signed URL of the stored picture, or the placeholder.
    pub avatar: String,
}

/// Attributes reported by the identity provider for the signed-in owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: Uuid,
    pub name: Option<String>,
    pub email: Option<String>,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

impl Identity {
    pub fn into_profile(self, avatar: String) -> RepoResult<UserProfile> {
        let name = self
            .name
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty())
            .ok_or_else(|| RepoError::validation("identity has no name attribute"))?;
        let email = self
            .email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| is_valid_email(e))
            .ok_or_else(|| RepoError::validation("identity has no valid email attribute"))?;

        Ok(UserProfile {
            id: self.user_id,
            name,
            email,
            avatar,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(name: Option<&str>, email: Option<&str>) -> Identity {
        Identity {
            user_id: Uuid::new_v4(),
            name: name.map(Into::into),
            email: email.map(Into::into),
        }
    }

    #[test]
    fn builds_profile_from_attributes() {
        let id = identity(Some(" Ada "), Some("Ada@Example.com"));
        let user_id = id.user_id;
        let profile = id.into_profile("https://x/avatar".into()).unwrap();
        assert_eq!(profile.id, user_id);
        assert_eq!(profile.name, "Ada");
        assert_eq!(profile.email, "ada@example.com");
        assert_eq!(profile.avatar, "https://x/avatar");
    }

    #[test]
    fn missing_name_is_a_validation_error() {
        let err = identity(None, Some("a@b.io")).into_profile(String::new()).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn malformed_email_is_a_validation_error() {
        let err = identity(Some("Ada"), Some("not-an-email"))
            .into_profile(String::new())
            .unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn email_regex() {
        assert!(is_valid_email("mock.user@example.com"));
        assert!(!is_valid_email("mock user@example.com"));
        assert!(!is_valid_email("@example.com"));
    }
}
