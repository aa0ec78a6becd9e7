use crate::app::RestaurantService;
use serde::Serialize;
use serde_json::Value as JsonValue;
use utoipa::ToSchema;

/// Shared by every handler. Holds only the service handle; rows are never
/// cached in process.
#[derive(Clone)]
pub struct AppState {
    pub service: RestaurantService,
}

impl AppState {
    pub fn new(service: RestaurantService) -> Self {
        Self { service }
    }
}

/// Envelope for health and error responses. Restaurant endpoints return the
/// bare `Restaurant` shape on success.
#[derive(Serialize, Debug, ToSchema)]
pub struct ApiResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Object)]
    pub data: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ApiResponse {
    pub fn ok(data: JsonValue) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>, data: Option<JsonValue>) -> Self {
        Self {
            success: false,
            data,
            error: Some(error.into()),
        }
    }
}
