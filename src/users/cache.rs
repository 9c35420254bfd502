use std::future::Future;
use std::sync::{Arc, PoisonError, RwLock};

use super::repo_types::UserProfile;
use crate::error::RepoResult;

/// Single-slot memo for the signed-in user's profile. Only `invalidate`
/// empties it; there is no expiry.
#[derive(Default)]
pub struct ProfileCache {
    slot: RwLock<Option<Arc<UserProfile>>>,
}

impl ProfileCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<Arc<UserProfile>> {
        self.slot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn replace(&self, profile: UserProfile) -> Arc<UserProfile> {
        let profile = Arc::new(profile);
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = Some(profile.clone());
        profile
    }

    pub fn invalidate(&self) {
        *self.slot.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Returns the cached profile or runs `fetch` and caches its result.
    /// The slot is not locked while `fetch` runs, so concurrent misses each
    /// fetch and the last one to finish wins.
    pub async fn get_or_fetch<F, Fut>(&self, fetch: F) -> RepoResult<Arc<UserProfile>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = RepoResult<UserProfile>>,
    {
        if let Some(profile) = self.get() {
            return Ok(profile);
        }
        let profile = fetch().await?;
        Ok(self.replace(profile))
    }
}
