//! In-process store with the same id semantics as a `SERIAL` column.

use crate::domain::{NewRestaurant, Restaurant};
use crate::storage::{RestaurantStore, StorageError};
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[derive(Default)]
struct Table {
    rows: BTreeMap<i32, Restaurant>,
    last_id: i32,
}

/// Rows live in a `BTreeMap`, so iteration is already in id order.
#[derive(Default)]
pub struct MemoryRestaurantStore {
    table: RwLock<Table>,
}

impl MemoryRestaurantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store pre-populated with `rows`, ids assigned 1, 2, ...
    pub async fn seeded(rows: &[NewRestaurant]) -> Result<Self, StorageError> {
        let store = Self::new();
        for row in rows {
            store.insert(row).await?;
        }
        Ok(store)
    }
}

fn to_row(id: i32, input: &NewRestaurant) -> Restaurant {
    Restaurant {
        id,
        name: input.name.clone(),
        cuisine: input.cuisine.clone(),
        rating: input.rating,
    }
}

#[async_trait]
impl RestaurantStore for MemoryRestaurantStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Restaurant>, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn get(&self, id: i32) -> Result<Option<Restaurant>, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, input: &NewRestaurant) -> Result<Restaurant, StorageError> {
        let mut table = self.table.write().await;
        table.last_id += 1;
        let row = to_row(table.last_id, input);
        table.rows.insert(row.id, row.clone());
        Ok(row)
    }

    async fn update(
        &self,
        id: i32,
        input: &NewRestaurant,
    ) -> Result<Option<Restaurant>, StorageError> {
        let mut table = self.table.write().await;
        Ok(table.rows.get_mut(&id).map(|existing| {
            *existing = to_row(id, input);
            existing.clone()
        }))
    }

    async fn delete(&self, id: i32) -> Result<Option<Restaurant>, StorageError> {
        let mut table = self.table.write().await;
        Ok(table.rows.remove(&id))
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }
}
