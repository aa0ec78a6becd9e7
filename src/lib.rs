pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::{RestaurantService, ServiceError};
pub use domain::{NewRestaurant, Rating, Restaurant, RestaurantPayload};
pub use infra::config::{AppConfig, DbConfig, ServerConfig};
pub use storage::{MemoryRestaurantStore, PgRestaurantStore, RestaurantStore, StorageError};
