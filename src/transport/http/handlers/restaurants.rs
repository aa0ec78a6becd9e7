//! CRUD handlers for `/restaurants`.

use crate::domain::{Restaurant, RestaurantPayload};
use crate::transport::http::error::ApiError;
use crate::transport::http::types::{ApiResponse, AppState};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

/// Parses the `:id` path segment. Ids are `SERIAL`, so anything that does not
/// fit an `i32` is rejected up front.
pub fn parse_id(raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse::<i32>()
        .map_err(|_| ApiError::InvalidId(raw.to_string()))
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "All restaurants in id order", body = [Restaurant]),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn list_restaurants_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    Ok(Json(state.service.list().await?))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "The restaurant", body = Restaurant),
        (status = 400, description = "Id is not an integer", body = ApiResponse),
        (status = 404, description = "No restaurant with this id", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn get_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.get(id).await?))
}

#[utoipa::path(
    post,
    path = "/restaurants",
    request_body = RestaurantPayload,
    responses(
        (status = 201, description = "Restaurant created", body = Restaurant),
        (status = 400, description = "Validation failed", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn create_restaurant_handler(
    State(state): State<AppState>,
    request: Result<Json<RestaurantPayload>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Json(payload) = request?;
    let created = state.service.create(&payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    put,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    request_body = RestaurantPayload,
    responses(
        (status = 200, description = "Restaurant replaced", body = Restaurant),
        (status = 400, description = "Validation failed or id is not an integer", body = ApiResponse),
        (status = 404, description = "No restaurant with this id", body = ApiResponse),
        (status = 422, description = "Unprocessable entity (invalid JSON body)", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn update_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    request: Result<Json<RestaurantPayload>, JsonRejection>,
) -> Result<Json<Restaurant>, ApiError> {
    let id = parse_id(&id)?;
    let Json(payload) = request?;
    Ok(Json(state.service.update(id, &payload).await?))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    params(
        ("id" = i32, Path, description = "Restaurant id")
    ),
    responses(
        (status = 200, description = "Restaurant deleted; body is the row before deletion", body = Restaurant),
        (status = 400, description = "Id is not an integer", body = ApiResponse),
        (status = 404, description = "No restaurant with this id", body = ApiResponse),
        (status = 500, description = "Internal server error", body = ApiResponse)
    )
)]
pub async fn delete_restaurant_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Restaurant>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(state.service.delete(id).await?))
}
