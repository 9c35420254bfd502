use std::sync::Arc;

use async_trait::async_trait;
use time::OffsetDateTime;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use super::dto::NewMeal;
use super::repo::MealRepository;
use super::repo_types::{sort_recent, Meal, MealId};
use crate::error::RepoResult;
use crate::store::MemoryStore;

/// Meal repository over the shared in-memory store.
#[derive(Clone)]
pub struct MemoryMealRepository {
    store: Arc<MemoryStore>,
}

impl MemoryMealRepository {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl MealRepository for MemoryMealRepository {
    async fn get_recent_meals(&self) -> RepoResult<Vec<Meal>> {
        let mut meals = self.store.list().await;
        sort_recent(&mut meals);
        Ok(meals)
    }

    async fn get_favorite_meals(&self) -> RepoResult<Vec<Meal>> {
        let mut meals = self.store.list_favorites().await;
        sort_recent(&mut meals);
        Ok(meals)
    }

    async fn get_meal_by_id(&self, id: MealId) -> RepoResult<Meal> {
        self.store.get(id).await
    }

    #[instrument(skip(self))]
    async fn delete_meal_by_id(&self, id: MealId) -> RepoResult<()> {
        if !self.store.remove(id).await {
            debug!(meal_id = %id, "delete of absent meal ignored");
        }
        Ok(())
    }

    #[instrument(skip(self, new_meal), fields(title = %new_meal.title))]
    async fn create_meal(&self, new_meal: NewMeal) -> RepoResult<Meal> {
        let (title, ingredients) = new_meal.validate()?;
        let meal = Meal {
            id: Uuid::new_v4(),
            title,
            ingredients,
            last_cooked: Some(OffsetDateTime::now_utc()),
            favorite_meals_id: None,
        };
        self.store.insert(meal.clone()).await;
        info!(meal_id = %meal.id, "meal created");
        Ok(meal)
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id))]
    async fn add_meal_to_favorites(&self, meal: &Meal) -> RepoResult<()> {
        self.store.set_favorite(meal.id, true).await
    }

    #[instrument(skip(self, meal), fields(meal_id = %meal.id))]
    async fn remove_meal_from_favorites(&self, meal: &Meal) -> RepoResult<()> {
        self.store.set_favorite(meal.id, false).await
    }

    #[instrument(skip(self))]
    async fn mark_meal_cooked(&self, id: MealId) -> RepoResult<Meal> {
        self.store
            .update(id, |meal| {
                meal.last_cooked = Some(OffsetDateTime::now_utc());
                Ok(())
            })
            .await
    }
}
