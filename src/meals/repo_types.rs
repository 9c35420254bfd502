use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

pub type MealId = Uuid;

/// One line of a meal's ingredient checklist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub id: Uuid,
    pub name: String,
    /// Doubles as the shopping list "picked up" flag.
    #[serde(default)]
    pub checked: bool,
}

impl Ingredient {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            checked: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meal {
    pub id: MealId,
    pub title: String,
    pub ingredients: Vec<Ingredient>,
    #[serde(with = "time::serde::rfc3339::option", default)]
    pub last_cooked: Option<OffsetDateTime>,
    /// Set iff a favorites entry with the same id exists.
    pub favorite_meals_id: Option<Uuid>,
}

impl Meal {
    pub fn is_favorite(&self) -> bool {
        self.favorite_meals_id.is_some()
    }
}

/// Most recently cooked first; never-cooked meals go last.
pub(crate) fn sort_recent(meals: &mut [Meal]) {
    meals.sort_by(|a, b| b.last_cooked.cmp(&a.last_cooked));
}
