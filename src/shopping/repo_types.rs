use serde::{Deserialize, Serialize};

use crate::error::{RepoError, RepoResult};
use crate::meals::{Ingredient, Meal};

/// One row of the shopping list view. `index` is the ingredient's position
/// in its meal and is what callers use to address it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShoppingListItem {
    pub index: usize,
    pub name: String,
    pub checked: bool,
}

pub fn items_for_meal(meal: &Meal) -> Vec<ShoppingListItem> {
    meal.ingredients
        .iter()
        .enumerate()
        .map(|(index, ingredient)| ShoppingListItem {
            index,
            name: ingredient.name.clone(),
            checked: ingredient.checked,
        })
        .collect()
}

/// True once every item has been picked up. An empty list is never complete.
pub fn is_complete(items: &[ShoppingListItem]) -> bool {
    !items.is_empty() && items.iter().all(|i| i.checked)
}

pub(crate) fn set_checked(
    ingredients: &mut [Ingredient],
    index: usize,
    checked: bool,
) -> RepoResult<()> {
    let len = ingredients.len();
    let ingredient = ingredients.get_mut(index).ok_or_else(|| {
        RepoError::validation(format!(
            "ingredient index {index} out of range for {len} ingredients"
        ))
    })?;
    ingredient.checked = checked;
    Ok(())
}

pub(crate) fn uncheck_all(ingredients: &mut [Ingredient]) {
    for ingredient in ingredients {
        ingredient.checked = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ingredients() -> Vec<Ingredient> {
        vec![Ingredient::new("Tomato"), Ingredient::new("Basil"), Ingredient::new("Garlic")]
    }

    #[test]
    fn set_checked_touches_only_the_target() {
        let mut list = ingredients();
        let before = list.clone();
        set_checked(&mut list, 1, true).unwrap();
        assert!(list[1].checked);
        assert_eq!(list[0], before[0]);
        assert_eq!(list[2], before[2]);
        assert_eq!(list[1].id, before[1].id);
    }

    #[test]
    fn set_checked_rejects_out_of_range() {
        let mut list = ingredients();
        let err = set_checked(&mut list, 3, true).unwrap_err();
        assert!(matches!(err, RepoError::Validation(_)));
    }

    #[test]
    fn completeness() {
        let mut items = vec![
            ShoppingListItem { index: 0, name: "a".into(), checked: true },
            ShoppingListItem { index: 1, name: "b".into(), checked: false },
        ];
        assert!(!is_complete(&items));
        items[1].checked = true;
        assert!(is_complete(&items));
        assert!(!is_complete(&[]));
    }

    #[test]
    fn uncheck_all_clears_flags() {
        let mut list = ingredients();
        for i in &mut list {
            i.checked = true;
        }
        uncheck_all(&mut list);
        assert!(list.iter().all(|i| !i.checked));
    }
}
