use std::sync::Arc;

use async_trait::async_trait;

use super::repo_types::UserProfile;
use crate::error::RepoResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Cached profile, fetched on first use.
    async fn get_user_profile(&self) -> RepoResult<Arc<UserProfile>>;

    /// Re-resolves the avatar of the cached profile after the caller uploaded
    /// a new picture. `IllegalState` if no profile has been fetched yet.
    async fn update_profile_picture(&self) -> RepoResult<Arc<UserProfile>>;

    fn clear_cache(&self);
}
