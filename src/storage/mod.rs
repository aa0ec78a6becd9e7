//! Storage backends for the `restaurants` table.
//!
//! The service talks to storage only through [`RestaurantStore`], so the HTTP
//! layer can run against Postgres in production and against
//! [`MemoryRestaurantStore`] in tests.

use crate::domain::{NewRestaurant, Restaurant};
use async_trait::async_trait;
use thiserror::Error;

pub mod memory;
pub mod postgres;

pub use memory::MemoryRestaurantStore;
pub use postgres::PgRestaurantStore;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("stored row {id} is unreadable: {reason}")]
    CorruptRow { id: i32, reason: String },
}

/// Single-statement operations over the `restaurants` table.
///
/// Lookups by id return `Ok(None)` when no row matches; "not found" is a
/// service-level decision, not a storage error.
#[async_trait]
pub trait RestaurantStore: Send + Sync {
    /// Creates the backing table if it does not exist.
    async fn ensure_schema(&self) -> Result<(), StorageError>;

    /// Round-trips to the backend; used by the health check.
    async fn ping(&self) -> Result<(), StorageError>;

    /// All rows in ascending id order.
    async fn list(&self) -> Result<Vec<Restaurant>, StorageError>;

    async fn get(&self, id: i32) -> Result<Option<Restaurant>, StorageError>;

    /// Inserts a row; the id is generated by the store and never reused.
    async fn insert(&self, input: &NewRestaurant) -> Result<Restaurant, StorageError>;

    /// Overwrites every mutable column of row `id`.
    async fn update(&self, id: i32, input: &NewRestaurant)
        -> Result<Option<Restaurant>, StorageError>;

    /// Removes row `id`, returning it as it was before deletion.
    async fn delete(&self, id: i32) -> Result<Option<Restaurant>, StorageError>;

    async fn count(&self) -> Result<i64, StorageError>;
}
