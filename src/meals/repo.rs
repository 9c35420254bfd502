use async_trait::async_trait;

use super::dto::NewMeal;
use super::repo_types::{Meal, MealId};
use crate::error::RepoResult;

/// Meal CRUD and favorites. No implementor caches the meal list between
/// calls: re-fetch to observe your own writes.
#[async_trait]
pub trait MealRepository: Send + Sync {
    /// All meals, most recently cooked first.
    async fn get_recent_meals(&self) -> RepoResult<Vec<Meal>>;

    /// Meals referenced by the owner's favorites; empty before the first favorite.
    async fn get_favorite_meals(&self) -> RepoResult<Vec<Meal>>;

    async fn get_meal_by_id(&self, id: MealId) -> RepoResult<Meal>;

    /// Succeeds when the meal is already gone.
    async fn delete_meal_by_id(&self, id: MealId) -> RepoResult<()>;

    async fn create_meal(&self, new_meal: NewMeal) -> RepoResult<Meal>;

    /// Points `favorite_meals_id` at the meal's own id and makes sure the
    /// matching favorites entry exists.
    async fn add_meal_to_favorites(&self, meal: &Meal) -> RepoResult<()>;

    /// Succeeds when the meal is not a favorite.
    async fn remove_meal_from_favorites(&self, meal: &Meal) -> RepoResult<()>;

    /// Stamps `last_cooked` with the current time.
    async fn mark_meal_cooked(&self, id: MealId) -> RepoResult<Meal>;
}
