//! Apply speculative state, await confirmation, roll back to the snapshot on
//! failure. Repositories never see speculative state; this lives with the
//! callers that render it.

use std::future::Future;

use tracing::warn;

use crate::error::{RepoError, RepoResult};
use crate::meals::{Meal, MealId, MealRepository};
use crate::shopping::{ShoppingListItem, ShoppingListRepository};

/// Snapshot of the state taken before a speculative value was installed.
#[must_use = "settle the speculation or the snapshot is lost"]
pub struct Speculation<T> {
    snapshot: T,
}

impl<T> Speculation<T> {
    /// Installs `next` into `state` and keeps the previous value.
    pub fn apply(state: &mut T, next: T) -> Self {
        Self {
            snapshot: std::mem::replace(state, next),
        }
    }

    pub fn snapshot(&self) -> &T {
        &self.snapshot
    }

    /// Keeps the speculative value on success, restores the snapshot on error.
    pub fn settle<R, E>(self, state: &mut T, result: Result<R, E>) -> Result<R, E> {
        if result.is_err() {
            *state = self.snapshot;
        }
        result
    }
}

pub async fn optimistic_update<T, R, Fut>(state: &mut T, next: T, confirm: Fut) -> RepoResult<R>
where
    Fut: Future<Output = RepoResult<R>>,
{
    let speculation = Speculation::apply(state, next);
    let result = confirm.await;
    if let Err(e) = &result {
        warn!(error = %e, "backend rejected update, rolling back");
    }
    speculation.settle(state, result)
}

/// Flips the favorite flag of a displayed meal before the backend confirms.
pub async fn toggle_favorite(meals: &dyn MealRepository, shown: &mut Meal) -> RepoResult<()> {
    let original = shown.clone();
    let mut next = original.clone();
    next.favorite_meals_id = if original.is_favorite() {
        None
    } else {
        Some(original.id)
    };

    optimistic_update(shown, next, async {
        if original.is_favorite() {
            meals.remove_meal_from_favorites(&original).await
        } else {
            meals.add_meal_to_favorites(&original).await
        }
    })
    .await
}

/// Flips one displayed shopping list item before the backend confirms.
pub async fn toggle_item(
    shopping: &dyn ShoppingListRepository,
    meal_id: MealId,
    shown: &mut Vec<ShoppingListItem>,
    index: usize,
) -> RepoResult<()> {
    let mut next = shown.clone();
    let Some(item) = next.iter_mut().find(|i| i.index == index) else {
        return Err(RepoError::validation(format!(
            "no shopping list item at index {index}"
        )));
    };
    item.checked = !item.checked;
    let checked = item.checked;

    optimistic_update(
        shown,
        next,
        shopping.update_ingredient_status(meal_id, index, checked),
    )
    .await
}
