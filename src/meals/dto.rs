use serde::Deserialize;

use super::repo_types::Ingredient;
use crate::error::{RepoError, RepoResult};

/// Input for `MealRepository::create_meal`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewMeal {
    pub title: String,
    /// Ingredient name with its quantity, in display order.
    #[serde(default)]
    pub ingredients: Vec<(String, u32)>,
    /// Accepted and kept verbatim; not stored yet.
    #[serde(default)]
    pub steps: Vec<String>,
}

impl NewMeal {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn ingredient(mut self, name: impl Into<String>, quantity: u32) -> Self {
        self.ingredients.push((name.into(), quantity));
        self
    }

    pub fn step(mut self, step: impl Into<String>) -> Self {
        self.steps.push(step.into());
        self
    }

    /// Trimmed title and the unchecked ingredient list to store.
    ///
    /// Ingredients are keyed by name, so a repeated name keeps its first position.
    pub(crate) fn validate(&self) -> RepoResult<(String, Vec<Ingredient>)> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(RepoError::validation("meal title must not be empty"));
        }

        let mut ingredients: Vec<Ingredient> = Vec::with_capacity(self.ingredients.len());
        for (name, _quantity) in &self.ingredients {
            let name = name.trim();
            if name.is_empty() {
                return Err(RepoError::validation("ingredient name must not be empty"));
            }
            if ingredients.iter().any(|i| i.name == name) {
                continue;
            }
            ingredients.push(Ingredient::new(name));
        }

        Ok((title.to_string(), ingredients))
    }
}
