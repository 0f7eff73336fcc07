//! Repository Module
//!
//! CRUD operations over the embedded SurrealDB tables. Record references
//! are stored as `"table:id"` strings (see `models::serde_helpers`), so
//! queries bind plain strings and address rows via `type::record()`.

// Accounts
pub mod user;

// Catalog
pub mod product;

// Checkout
pub mod address;
pub mod cart;
pub mod order;

// Notifications
pub mod subscription;

// Re-exports
pub use address::AddressRepository;
pub use cart::CartRepository;
pub use order::OrderRepository;
pub use product::ProductRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        RepoError::Database(err.to_string())
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Strip a `"table:"` prefix so callers may pass either form
pub fn record_key<'a>(table: &'a str, id: &'a str) -> &'a str {
    let prefix_len = table.len() + 1;
    if id.starts_with(table) && id.as_bytes().get(table.len()) == Some(&b':') {
        &id[prefix_len..]
    } else {
        id
    }
}

/// Full `"table:id"` reference string
pub fn record_ref(table: &str, id: &str) -> String {
    format!("{}:{}", table, record_key(table, id))
}

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
