//! Domain types for the restaurant catalogue.

pub mod restaurant;

pub use restaurant::{FieldError, NewRestaurant, Rating, Restaurant, RestaurantPayload};
