use std::collections::{HashMap, HashSet};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{RepoError, RepoResult};
use crate::meals::{Meal, MealId};

#[derive(Default)]
struct StoreInner {
    meals: HashMap<MealId, Meal>,
    /// Favorites entries, keyed by the id of the meal they mark.
    favorites: HashSet<Uuid>,
}

/// In-memory backing store shared by the memory meal and shopping list
/// repositories, so both see the same ingredient state.
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<StoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_meals(meals: impl IntoIterator<Item = Meal>) -> Self {
        let mut inner = StoreInner::default();
        for meal in meals {
            if let Some(fav) = meal.favorite_meals_id {
                inner.favorites.insert(fav);
            }
            inner.meals.insert(meal.id, meal);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    pub async fn list(&self) -> Vec<Meal> {
        self.inner.read().await.meals.values().cloned().collect()
    }

    pub async fn list_favorites(&self) -> Vec<Meal> {
        let inner = self.inner.read().await;
        inner
            .meals
            .values()
            .filter(|m| {
                m.favorite_meals_id
                    .is_some_and(|fav| inner.favorites.contains(&fav))
            })
            .cloned()
            .collect()
    }

    pub async fn get(&self, id: MealId) -> RepoResult<Meal> {
        self.inner
            .read()
            .await
            .meals
            .get(&id)
            .cloned()
            .ok_or_else(|| RepoError::not_found("meal", id))
    }

    pub async fn insert(&self, meal: Meal) {
        self.inner.write().await.meals.insert(meal.id, meal);
    }

    /// Returns whether a meal was removed. Its favorites entry goes with it.
    pub async fn remove(&self, id: MealId) -> bool {
        let mut inner = self.inner.write().await;
        match inner.meals.remove(&id) {
            Some(meal) => {
                if let Some(fav) = meal.favorite_meals_id {
                    inner.favorites.remove(&fav);
                }
                true
            }
            None => false,
        }
    }

    /// Applies `f` to a copy of the stored meal under a single write guard and
    /// stores the copy only if `f` succeeds.
    pub async fn update<F>(&self, id: MealId, f: F) -> RepoResult<Meal>
    where
        F: FnOnce(&mut Meal) -> RepoResult<()>,
    {
        let mut inner = self.inner.write().await;
        let meal = inner
            .meals
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("meal", id))?;
        let mut next = meal.clone();
        f(&mut next)?;
        *meal = next.clone();
        Ok(next)
    }

    pub async fn set_favorite(&self, id: MealId, favorite: bool) -> RepoResult<()> {
        let mut guard = self.inner.write().await;
        let inner = &mut *guard;
        let meal = inner
            .meals
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("meal", id))?;
        if favorite {
            meal.favorite_meals_id = Some(id);
            inner.favorites.insert(id);
        } else {
            meal.favorite_meals_id = None;
            inner.favorites.remove(&id);
        }
        Ok(())
    }
}
