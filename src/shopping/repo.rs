use async_trait::async_trait;
use tokio::sync::RwLock;

use super::repo_types::ShoppingListItem;
use crate::error::RepoResult;
use crate::meals::MealId;

/// A single active "being shopped" meal and a checked-state view over its
/// ingredients. Ingredient writes go to the stored meal; last write wins.
#[async_trait]
pub trait ShoppingListRepository: Send + Sync {
    /// `None` when no meal is selected.
    async fn get_current_meal_id(&self) -> RepoResult<Option<MealId>>;

    /// Overwrites the selection. The meal is not checked for existence.
    async fn set_current_meal_id(&self, id: MealId) -> RepoResult<()>;

    async fn get_shopping_list_for_meal(&self, id: MealId) -> RepoResult<Vec<ShoppingListItem>>;

    async fn update_ingredient_status(
        &self,
        meal_id: MealId,
        index: usize,
        checked: bool,
    ) -> RepoResult<()>;

    /// Unchecks every ingredient of the current meal in the backing store and
    /// clears the selection. No-op when nothing is selected.
    async fn remove_current_shopping_list(&self) -> RepoResult<()>;
}

/// Process-memory slot for the current meal, shared by both backends.
#[derive(Default)]
pub(crate) struct CurrentMeal(RwLock<Option<MealId>>);

impl CurrentMeal {
    pub async fn get(&self) -> Option<MealId> {
        *self.0.read().await
    }

    pub async fn set(&self, id: MealId) {
        *self.0.write().await = Some(id);
    }

    /// Clears the slot unless another meal was selected in the meantime.
    pub async fn clear_if(&self, id: MealId) {
        let mut slot = self.0.write().await;
        if *slot == Some(id) {
            *slot = None;
        }
    }
}
