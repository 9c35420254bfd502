use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use super::repo::{CurrentMeal, ShoppingListRepository};
use super::repo_types::{items_for_meal, set_checked, uncheck_all, ShoppingListItem};
use crate::error::RepoResult;
use crate::meals::MealId;
use crate::store::MemoryStore;

/// Shopping list over the shared in-memory store.
pub struct MemoryShoppingListRepository {
    store: Arc<MemoryStore>,
    current: CurrentMeal,
}

impl MemoryShoppingListRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            current: CurrentMeal::default(),
        }
    }
}

#[async_trait]
impl ShoppingListRepository for MemoryShoppingListRepository {
    async fn get_current_meal_id(&self) -> RepoResult<Option<MealId>> {
        Ok(self.current.get().await)
    }

    async fn set_current_meal_id(&self, id: MealId) -> RepoResult<()> {
        self.current.set(id).await;
        Ok(())
    }

    async fn get_shopping_list_for_meal(&self, id: MealId) -> RepoResult<Vec<ShoppingListItem>> {
        let meal = self.store.get(id).await?;
        Ok(items_for_meal(&meal))
    }

    #[instrument(skip(self))]
    async fn update_ingredient_status(
        &self,
        meal_id: MealId,
        index: usize,
        checked: bool,
    ) -> RepoResult<()> {
        self.store
            .update(meal_id, |meal| set_checked(&mut meal.ingredients, index, checked))
            .await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_current_shopping_list(&self) -> RepoResult<()> {
        let Some(id) = self.current.get().await else {
            return Ok(());
        };

        match self
            .store
            .update(id, |meal| {
                uncheck_all(&mut meal.ingredients);
                Ok(())
            })
            .await
        {
            Ok(_) => {}
            Err(e) if e.is_not_found() => {
                debug!(meal_id = %id, "current meal no longer exists");
            }
            Err(e) => return Err(e),
        }

        self.current.clear_if(id).await;
        Ok(())
    }
}
