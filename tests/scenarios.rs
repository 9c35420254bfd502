use std::sync::Arc;

use mealplanner::meals::{Ingredient, Meal, MemoryMealRepository, NewMeal};
use mealplanner::shopping::MemoryShoppingListRepository;
use mealplanner::store::MemoryStore;
use mealplanner::users::MockUserRepository;
use mealplanner::{AppContext, RepoError};
use time::macros::datetime;
use uuid::Uuid;

fn empty_context() -> AppContext {
    let store = Arc::new(MemoryStore::new());
    AppContext::from_parts(
        Arc::new(MemoryMealRepository::new(store.clone())),
        Arc::new(MemoryShoppingListRepository::new(store)),
        Arc::new(MockUserRepository::default()),
    )
}

#[tokio::test]
async fn pasta_scenario() {
    let ctx = empty_context();
    let created = ctx
        .meals()
        .create_meal(NewMeal::new("Pasta").ingredient("Tomato", 1).ingredient("Basil", 1))
        .await
        .unwrap();

    let meal = ctx.meals().get_meal_by_id(created.id).await.unwrap();
    assert_eq!(meal.title, "Pasta");
    let ingredients: Vec<_> = meal
        .ingredients
        .iter()
        .map(|i| (i.name.as_str(), i.checked))
        .collect();
    assert_eq!(ingredients, [("Tomato", false), ("Basil", false)]);
}

#[tokio::test]
async fn unknown_meal_is_not_found() {
    let ctx = empty_context();
    let err = ctx.meals().get_meal_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, RepoError::NotFound { entity: "meal", .. }));
}

#[tokio::test]
async fn uncooked_meals_sort_last() {
    let never = Meal {
        id: Uuid::new_v4(),
        title: "Never cooked".into(),
        ingredients: vec![Ingredient::new("Flour")],
        last_cooked: None,
        favorite_meals_id: None,
    };
    let cooked = Meal {
        id: Uuid::new_v4(),
        title: "Cooked".into(),
        ingredients: vec![],
        last_cooked: Some(datetime!(2020-01-01 0:00 UTC)),
        favorite_meals_id: None,
    };
    let store = Arc::new(MemoryStore::with_meals([never, cooked]));
    let ctx = AppContext::from_parts(
        Arc::new(MemoryMealRepository::new(store.clone())),
        Arc::new(MemoryShoppingListRepository::new(store)),
        Arc::new(MockUserRepository::default()),
    );

    let titles: Vec<_> = ctx
        .meals()
        .get_recent_meals()
        .await
        .unwrap()
        .into_iter()
        .map(|m| m.title)
        .collect();
    assert_eq!(titles, ["Cooked", "Never cooked"]);
}

#[tokio::test]
async fn favorites_and_shopping_list_together() {
    let ctx = AppContext::in_memory();
    let curry = ctx
        .meals()
        .get_recent_meals()
        .await
        .unwrap()
        .into_iter()
        .find(|m| m.title == "Chicken Curry")
        .unwrap();
    assert!(!curry.is_favorite());

    ctx.meals().add_meal_to_favorites(&curry).await.unwrap();
    let favs = ctx.meals().get_favorite_meals().await.unwrap();
    assert!(favs.iter().any(|m| m.id == curry.id));

    ctx.shopping_list().set_current_meal_id(curry.id).await.unwrap();
    ctx.shopping_list()
        .update_ingredient_status(curry.id, 3, true)
        .await
        .unwrap();
    let checked: Vec<_> = ctx
        .shopping_list()
        .get_shopping_list_for_meal(curry.id)
        .await
        .unwrap()
        .into_iter()
        .map(|i| i.checked)
        .collect();
    assert_eq!(checked, [false, false, false, true]);

    ctx.meals().remove_meal_from_favorites(&curry).await.unwrap();
    ctx.meals().remove_meal_from_favorites(&curry).await.unwrap();
    let favs = ctx.meals().get_favorite_meals().await.unwrap();
    assert!(favs.iter().all(|m| m.id != curry.id));

    ctx.shopping_list().remove_current_shopping_list().await.unwrap();
    assert_eq!(ctx.shopping_list().get_current_meal_id().await.unwrap(), None);
}
