pub mod restaurant_service;

pub use restaurant_service::{RestaurantService, ServiceError};
