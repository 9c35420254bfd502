//! Seed data for the in-memory backend.

use time::macros::datetime;
use uuid::Uuid;

use crate::meals::{Ingredient, Meal};
use crate::users::UserProfile;

pub const PLACEHOLDER_AVATAR: &str = "https://via.placeholder.com/150";

fn meal(title: &str, ingredients: &[&str], last_cooked: time::OffsetDateTime, favorite: bool) -> Meal {
    let id = Uuid::new_v4();
    Meal {
        id,
        title: title.to_string(),
        ingredients: ingredients.iter().map(|n| Ingredient::new(*n)).collect(),
        last_cooked: Some(last_cooked),
        favorite_meals_id: favorite.then_some(id),
    }
}

pub fn sample_meals() -> Vec<Meal> {
    vec![
        meal(
            "Spaghetti Carbonara",
            &["Spaghetti", "Eggs", "Pecorino Romano", "Pancetta"],
            datetime!(2023-05-15 0:00 UTC),
            true,
        ),
        meal(
            "Chicken Curry",
            &["Chicken", "Curry Powder", "Coconut Milk", "Rice"],
            datetime!(2023-05-10 0:00 UTC),
            false,
        ),
        meal(
            "Caesar Salad",
            &["Romaine Lettuce", "Croutons", "Parmesan Cheese", "Caesar Dressing"],
            datetime!(2023-05-12 0:00 UTC),
            true,
        ),
    ]
}

pub fn mock_profile() -> UserProfile {
    UserProfile {
        id: Uuid::nil(),
        name: "Mock User".into(),
        email: "mock.user@example.com".into(),
        avatar: PLACEHOLDER_AVATAR.into(),
    }
}
