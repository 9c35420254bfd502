mod cache;
mod identity;
mod mock;
mod remote;
mod repo;
mod repo_types;

pub use cache::ProfileCache;
pub use identity::{IdentityProvider, PgIdentityProvider};
pub use mock::MockUserRepository;
pub use remote::{avatar_key, RemoteUserRepository};
pub use repo::UserRepository;
pub use repo_types::{Identity, UserProfile};
