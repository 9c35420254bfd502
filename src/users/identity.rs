use anyhow::Context;
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};
use tracing::instrument;
use uuid::Uuid;

use super::repo_types::Identity;
use crate::auth::Session;
use crate::error::{RepoError, RepoResult};

/// Source of the signed-in owner's attributes.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn current_identity(&self) -> RepoResult<Identity>;
}

#[derive(Debug, FromRow)]
struct UserRow {
    id: Uuid,
    email: Option<String>,
    name: Option<String>,
}

/// Reads the owner's attributes from the `users` table.
#[derive(Clone)]
pub struct PgIdentityProvider {
    db: PgPool,
    session: Session,
}

impl PgIdentityProvider {
    pub fn new(db: PgPool, session: Session) -> Self {
        Self { db, session }
    }
}

#[async_trait]
impl IdentityProvider for PgIdentityProvider {
    #[instrument(skip(self), fields(owner_id = %self.session.owner_id))]
    async fn current_identity(&self) -> RepoResult<Identity> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"SELECT id, email, name FROM users WHERE id = $1"#,
        )
        .bind(self.session.owner_id)
        .fetch_optional(&self.db)
        .await
        .context("select user")?
        .ok_or_else(|| RepoError::not_found("user", self.session.owner_id))?;

        Ok(Identity {
            user_id: row.id,
            name: row.name,
            email: row.email,
        })
    }
}
