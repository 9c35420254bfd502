mod memory;
mod postgres;
mod repo;
mod repo_types;

pub use memory::MemoryShoppingListRepository;
pub use postgres::PgShoppingListRepository;
pub use repo::ShoppingListRepository;
pub use repo_types::{is_complete, items_for_meal, ShoppingListItem};
