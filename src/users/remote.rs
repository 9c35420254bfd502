use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use super::cache::ProfileCache;
use super::identity::IdentityProvider;
use super::repo::UserRepository;
use super::repo_types::UserProfile;
use crate::error::{RepoError, RepoResult};
use crate::fixtures::PLACEHOLDER_AVATAR;
use crate::storage::StorageClient;

pub fn avatar_key(user_id: Uuid) -> String {
    format!("profile-pictures/{}.jpg", user_id)
}

/// Profile built from identity attributes plus a signed avatar URL.
pub struct RemoteUserRepository {
    identity: Arc<dyn IdentityProvider>,
    storage: Arc<dyn StorageClient>,
    avatar_ttl_secs: u64,
    cache: ProfileCache,
}

impl RemoteUserRepository {
    pub fn new(
        identity: Arc<dyn IdentityProvider>,
        storage: Arc<dyn StorageClient>,
        avatar_ttl_secs: u64,
    ) -> Self {
        Self {
            identity,
            storage,
            avatar_ttl_secs,
            cache: ProfileCache::new(),
        }
    }

    /// A missing object falls back to the placeholder; any other storage
    /// failure is returned.
    async fn resolve_avatar(&self, user_id: Uuid) -> RepoResult<String> {
        let key = avatar_key(user_id);
        if !self.storage.object_exists(&key).await? {
            warn!(%user_id, key = %key, "no profile picture stored, using placeholder");
            return Ok(PLACEHOLDER_AVATAR.to_string());
        }
        Ok(self.storage.presign_get(&key, self.avatar_ttl_secs).await?)
    }
}

#[async_trait]
impl UserRepository for RemoteUserRepository {
    #[instrument(skip(self))]
    async fn get_user_profile(&self) -> RepoResult<Arc<UserProfile>> {
        self.cache
            .get_or_fetch(move || async move {
                let identity = self.identity.current_identity().await?;
                let avatar = self.resolve_avatar(identity.user_id).await?;
                let profile = identity.into_profile(avatar)?;
                info!(user_id = %profile.id, "user profile fetched");
                Ok(profile)
            })
            .await
    }

    #[instrument(skip(self))]
    async fn update_profile_picture(&self) -> RepoResult<Arc<UserProfile>> {
        let current = self.cache.get().ok_or_else(|| {
            RepoError::IllegalState("profile picture refreshed before the profile was fetched".into())
        })?;
        let avatar = self.resolve_avatar(current.id).await?;
        Ok(self.cache.replace(UserProfile {
            avatar,
            ..(*current).clone()
        }))
    }

    fn clear_cache(&self) {
        self.cache.invalidate();
    }
}
