use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::repo::{CurrentMeal, ShoppingListRepository};
use super::repo_types::{items_for_meal, set_checked, uncheck_all, ShoppingListItem};
use crate::error::{RepoError, RepoResult};
use crate::meals::postgres::{fetch_meal, store_ingredients};
use crate::meals::MealId;

/// Shopping list whose checked flags live in the remote meal records. The
/// current selection is held in process memory only.
pub struct PgShoppingListRepository {
    db: PgPool,
    current: CurrentMeal,
}

impl PgShoppingListRepository {
    pub fn new(db: PgPool) -> Self {
        Self {
            db,
            current: CurrentMeal::default(),
        }
    }
}

#[async_trait]
impl ShoppingListRepository for PgShoppingListRepository {
    async fn get_current_meal_id(&self) -> RepoResult<Option<MealId>> {
        Ok(self.current.get().await)
    }

    async fn set_current_meal_id(&self, id: MealId) -> RepoResult<()> {
        self.current.set(id).await;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_shopping_list_for_meal(&self, id: MealId) -> RepoResult<Vec<ShoppingListItem>> {
        let meal = fetch_meal(&self.db, id).await?;
        Ok(items_for_meal(&meal))
    }

    #[instrument(skip(self))]
    async fn update_ingredient_status(
        &self,
        meal_id: MealId,
        index: usize,
        checked: bool,
    ) -> RepoResult<()> {
        let mut meal = fetch_meal(&self.db, meal_id).await?;
        set_checked(&mut meal.ingredients, index, checked)?;
        if !store_ingredients(&self.db, meal_id, &meal.ingredients).await? {
            return Err(RepoError::not_found("meal", meal_id));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_current_shopping_list(&self) -> RepoResult<()> {
        let Some(id) = self.current.get().await else {
            return Ok(());
        };

        match fetch_meal(&self.db, id).await {
            Ok(mut meal) => {
                uncheck_all(&mut meal.ingredients);
                store_ingredients(&self.db, id, &meal.ingredients).await?;
            }
            Err(e) if e.is_not_found() => {
                debug!(meal_id = %id, "current meal no longer exists");
            }
            Err(e) => return Err(e),
        }

        self.current.clear_if(id).await;
        Ok(())
    }
}
