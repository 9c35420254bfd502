use anyhow::Context;
use async_trait::async_trait;
use sqlx::{types::Json, FromRow, PgPool, Postgres, Transaction};
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::dto::NewMeal;
use super::repo::MealRepository;
use super::repo_types::{Ingredient, Meal, MealId};
use crate::auth::Session;
use crate::error::{RepoError, RepoResult};

pub(crate) const MEAL_COLUMNS: &str =
    "m.id, m.title, m.ingredients, m.last_cooked, m.favorite_meals_id";

#[derive(Debug, FromRow)]
pub(crate) struct MealRow {
    pub id: Uuid,
    pub title: String,
    pub ingredients: Json<Vec<Ingredient>>,
    pub last_cooked: Option<OffsetDateTime>,
    pub favorite_meals_id: Option<Uuid>,
}

impl From<MealRow> for Meal {
    fn from(r: MealRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            ingredients: r.ingredients.0,
            last_cooked: r.last_cooked,
            favorite_meals_id: r.favorite_meals_id,
        }
    }
}

pub(crate) async fn fetch_meal(db: &PgPool, id: MealId) -> RepoResult<Meal> {
    let row = sqlx::query_as::<_, MealRow>(&format!(
        "SELECT {MEAL_COLUMNS} FROM meals m WHERE m.id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("select meal")?;

    row.map(Meal::from)
        .ok_or_else(|| RepoError::not_found("meal", id))
}

/// Replaces the stored ingredient list. Returns `false` if the meal is gone.
pub(crate) async fn store_ingredients(
    db: &PgPool,
    id: MealId,
    ingredients: &[Ingredient],
) -> RepoResult<bool> {
    let res = sqlx::query("UPDATE meals SET ingredients = $2 WHERE id = $1")
        .bind(id)
        .bind(Json(ingredients))
        .execute(db)
        .await
        .context("update meal ingredients")?;
    Ok(res.rows_affected() > 0)
}

/// Row-locks the meal for the rest of the transaction. `NotFound` if absent.
async fn lock_meal(tx: &mut Transaction<'_, Postgres>, id: MealId) -> RepoResult<()> {
    let found = sqlx::query("SELECT 1 FROM meals WHERE id = $1 FOR UPDATE")
        .bind(id)
        .fetch_optional(&mut **tx)
        .await
        .context("lock meal")?;
    match found {
        Some(_) => Ok(()),
        None => Err(RepoError::not_found("meal", id)),
    }
}

/// Meal repository backed by the remote Postgres store.
#[derive(Clone)]
pub struct PgMealRepository {
    db: PgPool,
    session: Session,
}

impl PgMealRepository {
    pub fn new(db: PgPool, session: Session) -> Self {
        Self { db, session }
    }
}

#[async_trait]
impl MealRepository for PgMealRepository {
    #[instrument(skip(self))]
    async fn get_recent_meals(&self) -> RepoResult<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals m
            ORDER BY m.last_cooked DESC NULLS LAST
            "#
        ))
        .fetch_all(&self.db)
        .await
        .context("list meals")?;
        Ok(rows.into_iter().map(Meal::from).collect())
    }

    #[instrument(skip(self), fields(owner_id = %self.session.owner_id))]
    async fn get_favorite_meals(&self) -> RepoResult<Vec<Meal>> {
        let rows = sqlx::query_as::<_, MealRow>(&format!(
            r#"
            SELECT {MEAL_COLUMNS}
            FROM meals m
            JOIN favorite_meals f ON f.id = m.favorite_meals_id
            WHERE f.owner_id = $1
            ORDER BY m.last_cooked DESC NULLS LAST
            "#
        ))
        .bind(self.session.owner_id)
        .fetch_all(&self.db)
        .await
        .context("list favorite meals")?;
        Ok(rows.into_iter().map(Meal::from).collect())
    }

    #[instrument(skip(self))]
    async fn get_meal_by_id(&self, id: MealId) -> RepoResult<Meal> {
        fetch_meal(&self.db, id).await
    }

    #[instrument(skip(self))]
    async fn delete_meal_by_id(&self, id: MealId) -> RepoResult<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        let res = sqlx::query("DELETE FROM meals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete meal")?;
        sqlx::query("DELETE FROM favorite_meals WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .context("delete favorite entry")?;
        tx.commit().await.context("commit tx")?;

        if res.rows_affected() == 0 {
            debug!(meal_id = %id, "delete of absent meal ignored");
        }
        Ok(())
    }

    #[instrument(skip(self, new_meal), fields(title = %new_meal.title))]
    async fn create_meal(&self, new_meal: NewMeal) -> RepoResult<Meal> {
        let (title, ingredients) = new_meal.validate()?;
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            INSERT INTO meals AS m (id, title, ingredients, last_cooked)
            VALUES ($1, $2, $3, $4)
            RETURNING m.id, m.title, m.ingredients, m.last_cooked, m.favorite_meals_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&title)
        .bind(Json(&ingredients))
        .bind(OffsetDateTime::now_utc())
        .fetch_one(&self.db)
        .await
        .context("insert meal")?;

        info!(meal_id = %row.id, "meal created");
        Ok(row.into())
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id, owner_id = %self.session.owner_id))]
    async fn add_meal_to_favorites(&self, meal: &Meal) -> RepoResult<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        lock_meal(&mut tx, meal.id).await?;

        sqlx::query(
            r#"
            INSERT INTO favorite_meals (id, owner_id)
            VALUES ($1, $2)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(meal.id)
        .bind(self.session.owner_id)
        .execute(&mut *tx)
        .await
        .context("insert favorite entry")?;

        let owner: Uuid = sqlx::query_scalar("SELECT owner_id FROM favorite_meals WHERE id = $1")
            .bind(meal.id)
            .fetch_one(&mut *tx)
            .await
            .context("select favorite owner")?;
        if owner != self.session.owner_id {
            return Err(RepoError::IllegalState(format!(
                "meal {} is a favorite of another owner",
                meal.id
            )));
        }

        sqlx::query("UPDATE meals SET favorite_meals_id = id WHERE id = $1")
            .bind(meal.id)
            .execute(&mut *tx)
            .await
            .context("mark meal favorite")?;

        tx.commit().await.context("commit tx")?;
        Ok(())
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id, owner_id = %self.session.owner_id))]
    async fn remove_meal_from_favorites(&self, meal: &Meal) -> RepoResult<()> {
        let mut tx = self.db.begin().await.context("begin tx")?;
        lock_meal(&mut tx, meal.id).await?;

        let res = sqlx::query("DELETE FROM favorite_meals WHERE id = $1 AND owner_id = $2")
            .bind(meal.id)
            .bind(self.session.owner_id)
            .execute(&mut *tx)
            .await
            .context("delete favorite entry")?;

        if res.rows_affected() > 0 {
            sqlx::query("UPDATE meals SET favorite_meals_id = NULL WHERE id = $1")
                .bind(meal.id)
                .execute(&mut *tx)
                .await
                .context("unmark meal favorite")?;
        } else {
            debug!("no favorite entry owned by caller; nothing to remove");
        }

        tx.commit().await.context("commit tx")?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn mark_meal_cooked(&self, id: MealId) -> RepoResult<Meal> {
        let row = sqlx::query_as::<_, MealRow>(
            r#"
            UPDATE meals AS m SET last_cooked = $2
            WHERE m.id = $1
            RETURNING m.id, m.title, m.ingredients, m.last_cooked, m.favorite_meals_id
            "#,
        )
        .bind(id)
        .bind(OffsetDateTime::now_utc())
        .fetch_optional(&self.db)
        .await
        .context("mark meal cooked")?;

        row.map(Meal::from)
            .ok_or_else(|| RepoError::not_found("meal", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;

    #[test]
    fn row_converts_into_meal() {
        let id = Uuid::new_v4();
        let ingredient = Ingredient::new("Tomato");
        let meal: Meal = MealRow {
            id,
            title: "Pasta".into(),
            ingredients: Json(vec![ingredient.clone()]),
            last_cooked: None,
            favorite_meals_id: Some(id),
        }
        .into();
        assert_eq!(meal.id, id);
        assert_eq!(meal.ingredients, vec![ingredient]);
        assert!(meal.is_favorite());
    }

    async fn live_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = db::connect(&url, 2).await.expect("connect");
        db::migrate(&pool).await.expect("migrate");
        pool
    }

    async fn live_repo() -> PgMealRepository {
        PgMealRepository::new(live_pool().await, Session::new(Uuid::new_v4()))
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn live_create_favorite_delete_cycle() {
        let repo = live_repo().await;
        let meal = repo
            .create_meal(NewMeal::new("Pasta").ingredient("Tomato", 1).ingredient("Basil", 1))
            .await
            .unwrap();
        assert_eq!(repo.get_meal_by_id(meal.id).await.unwrap().ingredients.len(), 2);

        repo.add_meal_to_favorites(&meal).await.unwrap();
        assert!(repo
            .get_favorite_meals()
            .await
            .unwrap()
            .iter()
            .any(|m| m.id == meal.id));
        repo.remove_meal_from_favorites(&meal).await.unwrap();
        repo.remove_meal_from_favorites(&meal).await.unwrap();
        assert!(repo.get_favorite_meals().await.unwrap().is_empty());

        repo.delete_meal_by_id(meal.id).await.unwrap();
        repo.delete_meal_by_id(meal.id).await.unwrap();
        assert!(repo.get_meal_by_id(meal.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn live_favorite_entry_belongs_to_one_owner() {
        let pool = live_pool().await;
        let alice = PgMealRepository::new(pool.clone(), Session::new(Uuid::new_v4()));
        let bob = PgMealRepository::new(pool, Session::new(Uuid::new_v4()));
        let meal = alice
            .create_meal(NewMeal::new("Shared").ingredient("Rice", 1))
            .await
            .unwrap();
        alice.add_meal_to_favorites(&meal).await.unwrap();

        let err = bob.add_meal_to_favorites(&meal).await.unwrap_err();
        assert!(matches!(err, RepoError::IllegalState(_)));
        assert!(bob.get_favorite_meals().await.unwrap().iter().all(|m| m.id != meal.id));

        bob.remove_meal_from_favorites(&meal).await.unwrap();
        assert!(alice.get_meal_by_id(meal.id).await.unwrap().is_favorite());
        assert!(alice
            .get_favorite_meals()
            .await
            .unwrap()
            .iter()
            .any(|m| m.id == meal.id));

        alice.remove_meal_from_favorites(&meal).await.unwrap();
        bob.add_meal_to_favorites(&meal).await.unwrap();
        assert!(bob.get_favorite_meals().await.unwrap().iter().any(|m| m.id == meal.id));

        bob.delete_meal_by_id(meal.id).await.unwrap();
    }
}
