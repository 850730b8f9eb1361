//! PostgreSQL persistence layer: connection pool, row models, and the
//! access-controlled entity repositories.

pub mod error;
pub mod models;
pub mod pool;
pub mod repositories;

pub use error::{RepoError, RepoResult};
pub use pool::{connect_from_env, create_pool, DbPool};
