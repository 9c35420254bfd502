//! Data-access layer for the meal planner app: meal, shopping list and user
//! profile repositories behind traits, with an in-memory fixture backend and
//! a remote (Postgres + S3) backend, composed through [`AppContext`].

pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod fixtures;
pub mod meals;
pub mod optimistic;
pub mod shopping;
pub mod state;
pub mod storage;
pub mod store;
pub mod telemetry;
pub mod users;

pub use config::{AppConfig, Backend};
pub use error::{RepoError, RepoResult};
pub use state::AppContext;
