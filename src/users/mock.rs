use std::sync::Arc;

use async_trait::async_trait;

use super::cache::ProfileCache;
use super::repo::UserRepository;
use super::repo_types::UserProfile;
use crate::error::{RepoError, RepoResult};
use crate::fixtures::{self, PLACEHOLDER_AVATAR};

/// Serves a fixed profile. Still caches, so it behaves like the remote one.
pub struct MockUserRepository {
    profile: UserProfile,
    cache: ProfileCache,
}

impl MockUserRepository {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            profile,
            cache: ProfileCache::new(),
        }
    }
}

impl Default for MockUserRepository {
    fn default() -> Self {
        Self::new(fixtures::mock_profile())
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn get_user_profile(&self) -> RepoResult<Arc<UserProfile>> {
        self.cache
            .get_or_fetch(move || async move { Ok(self.profile.clone()) })
            .await
    }

    async fn update_profile_picture(&self) -> RepoResult<Arc<UserProfile>> {
        let current = self.cache.get().ok_or_else(|| {
            RepoError::IllegalState("profile picture refreshed before the profile was fetched".into())
        })?;
        Ok(self.cache.replace(UserProfile {
            avatar: PLACEHOLDER_AVATAR.to_string(),
            ..(*current).clone()
        }))
    }

    fn clear_cache(&self) {
        self.cache.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_the_mock_profile() {
        let repo = MockUserRepository::default();
        let profile = repo.get_user_profile().await.unwrap();
        assert_eq!(profile.name, "Mock User");
        assert_eq!(profile.email, "mock.user@example.com");
        assert_eq!(profile.avatar, PLACEHOLDER_AVATAR);
    }

    #[tokio::test]
    async fn repeated_calls_share_the_cached_value() {
        let repo = MockUserRepository::default();
        let a = repo.get_user_profile().await.unwrap();
        let b = repo.get_user_profile().await.unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[tokio::test]
    async fn update_requires_a_cached_profile() {
        let repo = MockUserRepository::default();
        assert!(matches!(
            repo.update_profile_picture().await.unwrap_err(),
            RepoError::IllegalState(_)
        ));
        repo.get_user_profile().await.unwrap();
        repo.update_profile_picture().await.unwrap();
        repo.clear_cache();
        assert!(repo.update_profile_picture().await.is_err());
    }
}
