mod dto;
mod memory;
pub(crate) mod postgres;
mod repo;
mod repo_types;

pub use dto::NewMeal;
pub use memory::MemoryMealRepository;
pub use postgres::PgMealRepository;
pub use repo::MealRepository;
pub use repo_types::{Ingredient, Meal, MealId};
