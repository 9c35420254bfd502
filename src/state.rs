use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use crate::auth::Session;
use crate::config::{AppConfig, Backend, RemoteConfig};
use crate::db;
use crate::fixtures;
use crate::meals::{MealRepository, MemoryMealRepository, PgMealRepository};
use crate::shopping::{MemoryShoppingListRepository, PgShoppingListRepository, ShoppingListRepository};
use crate::storage::{Storage, StorageClient};
use crate::store::MemoryStore;
use crate::users::{MockUserRepository, PgIdentityProvider, RemoteUserRepository, UserRepository};

/// The three repositories, bound to one backend for the context's lifetime.
/// Build it once at startup and hand it to whatever composes the UI.
#[derive(Clone)]
pub struct AppContext {
    meals: Arc<dyn MealRepository>,
    shopping_list: Arc<dyn ShoppingListRepository>,
    users: Arc<dyn UserRepository>,
}

impl AppContext {
    /// `access_token` identifies the owner; the memory backend ignores it.
    pub async fn init(config: &AppConfig, access_token: &str) -> anyhow::Result<Self> {
        match config.backend {
            Backend::Memory => {
                info!("using in-memory repositories");
                Ok(Self::in_memory())
            }
            Backend::Remote => {
                let remote = config
                    .remote
                    .as_ref()
                    .context("remote backend selected without remote settings")?;
                let session = Session::from_access_token(access_token, &remote.jwt)?;
                Self::remote(remote, session).await
            }
        }
    }

    async fn remote(cfg: &RemoteConfig, session: Session) -> anyhow::Result<Self> {
        let db = db::connect(&cfg.database_url, cfg.max_connections).await?;
        if let Err(e) = db::migrate(&db).await {
            warn!(error = %e, "migrations failed; continuing");
        }

        let storage = Arc::new(Storage::new(&cfg.storage).await?) as Arc<dyn StorageClient>;
        let identity = Arc::new(PgIdentityProvider::new(db.clone(), session));

        info!(owner_id = %session.owner_id, "using remote repositories");
        Ok(Self {
            meals: Arc::new(PgMealRepository::new(db.clone(), session)),
            shopping_list: Arc::new(PgShoppingListRepository::new(db)),
            users: Arc::new(RemoteUserRepository::new(
                identity,
                storage,
                cfg.storage.avatar_url_ttl_secs,
            )),
        })
    }

    /// Fixture-seeded memory backend with the mock user.
    pub fn in_memory() -> Self {
        let store = Arc::new(MemoryStore::with_meals(fixtures::sample_meals()));
        Self::from_parts(
            Arc::new(MemoryMealRepository::new(store.clone())),
            Arc::new(MemoryShoppingListRepository::new(store)),
            Arc::new(MockUserRepository::default()),
        )
    }

    pub fn from_parts(
        meals: Arc<dyn MealRepository>,
        shopping_list: Arc<dyn ShoppingListRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            meals,
            shopping_list,
            users,
        }
    }

    pub fn meals(&self) -> &Arc<dyn MealRepository> {
        &self.meals
    }

    pub fn shopping_list(&self) -> &Arc<dyn ShoppingListRepository> {
        &self.shopping_list
    }

    pub fn users(&self) -> &Arc<dyn UserRepository> {
        &self.users
    }

    /// Drops per-user cached state.
    pub fn sign_out(&self) {
        self.users.clear_cache();
    }
}
