//! Restaurant use cases.
//!
//! Validates request payloads, issues exactly one storage call per operation
//! and turns "no such row" into [`ServiceError::NotFound`].

use crate::domain::{FieldError, Restaurant, RestaurantPayload};
use crate::storage::{RestaurantStore, StorageError};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("restaurant {0} not found")]
    NotFound(i32),
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Cheap to clone; all clones share one store handle.
#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<dyn RestaurantStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn RestaurantStore>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Restaurant>, ServiceError> {
        let rows = self.store.list().await?;
        debug!(count = rows.len(), "listed restaurants");
        Ok(rows)
    }

    pub async fn get(&self, id: i32) -> Result<Restaurant, ServiceError> {
        self.store
            .get(id)
            .await?
            .ok_or(ServiceError::NotFound(id))
    }

    pub async fn create(&self, payload: &RestaurantPayload) -> Result<Restaurant, ServiceError> {
        let input = payload.validate().map_err(ServiceError::Validation)?;
        let created = self.store.insert(&input).await?;
        debug!(id = created.id, "created restaurant");
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i32,
        payload: &RestaurantPayload,
    ) -> Result<Restaurant, ServiceError> {
        let input = payload.validate().map_err(ServiceError::Validation)?;
        let updated = self
            .store
            .update(id, &input)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        debug!(id, "updated restaurant");
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> Result<Restaurant, ServiceError> {
        let deleted = self
            .store
            .delete(id)
            .await?
            .ok_or(ServiceError::NotFound(id))?;
        debug!(id, "deleted restaurant");
        Ok(deleted)
    }

    pub async fn health(&self) -> Result<(), ServiceError> {
        self.store.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryRestaurantStore;
    use serde_json::json;

    fn service() -> RestaurantService {
        RestaurantService::new(Arc::new(MemoryRestaurantStore::new()))
    }

    fn payload(v: serde_json::Value) -> RestaurantPayload {
        serde_json::from_value(v).unwrap()
    }

    #[tokio::test]
    async fn invalid_payload_never_reaches_storage() {
        let svc = service();
        let err = svc.create(&payload(json!({"rating": 4.0}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(ref e) if e[0].field == "name"));
        assert!(svc.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_rows_are_not_found() {
        let svc = service();
        let body = payload(json!({"name": "x"}));
        assert!(matches!(svc.get(5).await, Err(ServiceError::NotFound(5))));
        assert!(matches!(svc.update(5, &body).await, Err(ServiceError::NotFound(5))));
        assert!(matches!(svc.delete(5).await, Err(ServiceError::NotFound(5))));
    }

    #[tokio::test]
    async fn update_on_missing_row_still_validates_first() {
        let svc = service();
        let err = svc.update(5, &payload(json!({}))).await.unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn deleted_rows_stay_deleted() {
        let svc = service();
        let created = svc.create(&payload(json!({"name": "Gone Soon"}))).await.unwrap();
        let deleted = svc.delete(created.id).await.unwrap();
        assert_eq!(deleted, created);
        assert!(matches!(svc.get(created.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete(created.id).await, Err(ServiceError::NotFound(_))));
    }
}
