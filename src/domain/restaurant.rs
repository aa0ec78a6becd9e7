//! The `Restaurant` entity and its write-side validation.

use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value as JsonValue;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Column limits of the `restaurants` table.
pub const NAME_MAX_CHARS: usize = 100;
pub const CUISINE_MAX_CHARS: usize = 50;
/// `DECIMAL(2,1)` holds at most 99 tenths either side of zero.
pub const RATING_MAX_TENTHS: i16 = 99;

/// A rating stored as a whole number of tenths, so `4.9` is `Rating(49)`.
///
/// Always rendered with exactly one fractional digit (`"5.0"`), which is also
/// how it is serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rating(i16);

impl Rating {
    pub fn from_tenths(tenths: i16) -> Option<Self> {
        (tenths.unsigned_abs() <= RATING_MAX_TENTHS.unsigned_abs()).then_some(Self(tenths))
    }

    /// Rounds to one decimal place (half away from zero).
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let tenths = (value * 10.0).round();
        if tenths.abs() > f64::from(RATING_MAX_TENTHS) {
            return None;
        }
        Self::from_tenths(tenths as i16)
    }

    pub fn tenths(self) -> i16 {
        self.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{}", sign, abs / 10, abs % 10)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRatingError(pub String);

impl fmt::Display for ParseRatingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid rating {:?}", self.0)
    }
}

impl std::error::Error for ParseRatingError {}

impl FromStr for Rating {
    type Err = ParseRatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<f64>()
            .ok()
            .and_then(Rating::from_f64)
            .ok_or_else(|| ParseRatingError(s.to_string()))
    }
}

impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A persisted row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Restaurant {
    #[schema(example = 1)]
    pub id: i32,
    #[schema(example = "Testaurant")]
    pub name: String,
    #[schema(example = "Test Cuisine")]
    pub cuisine: Option<String>,
    /// One-decimal string, e.g. `"4.0"`.
    #[schema(value_type = Option<String>, example = "4.0")]
    pub rating: Option<Rating>,
}

/// Request body for create and full-replacement update.
///
/// Fields are kept loose here so that missing or mistyped values come back as
/// field-level validation errors instead of a body rejection.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct RestaurantPayload {
    #[serde(default)]
    #[schema(value_type = String, example = "Brand New Cafe")]
    pub name: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "Coffee & Pastries")]
    pub cuisine: Option<JsonValue>,
    #[serde(default)]
    #[schema(value_type = Option<f64>, example = 4.9)]
    pub rating: Option<JsonValue>,
}

/// The validated mutable fields of a restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRestaurant {
    pub name: String,
    pub cuisine: Option<String>,
    pub rating: Option<Rating>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl RestaurantPayload {
    /// Checks every field and reports all problems at once.
    pub fn validate(&self) -> Result<NewRestaurant, Vec<FieldError>> {
        let mut errors = Vec::new();

        let name = match self.name.as_ref() {
            None | Some(JsonValue::Null) => {
                errors.push(FieldError::new("name", "is required"));
                None
            }
            Some(JsonValue::String(s)) if s.trim().is_empty() => {
                errors.push(FieldError::new("name", "must not be empty"));
                None
            }
            Some(JsonValue::String(s)) if s.chars().count() > NAME_MAX_CHARS => {
                errors.push(FieldError::new(
                    "name",
                    format!("must be at most {} characters", NAME_MAX_CHARS),
                ));
                None
            }
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("name", "expected string"));
                None
            }
        };

        let cuisine = match self.cuisine.as_ref() {
            None | Some(JsonValue::Null) => None,
            Some(JsonValue::String(s)) if s.chars().count() > CUISINE_MAX_CHARS => {
                errors.push(FieldError::new(
                    "cuisine",
                    format!("must be at most {} characters", CUISINE_MAX_CHARS),
                ));
                None
            }
            Some(JsonValue::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new("cuisine", "expected string or null"));
                None
            }
        };

        let rating = match self.rating.as_ref() {
            None | Some(JsonValue::Null) => None,
            Some(v) => match coerce_rating(v) {
                Ok(r) => Some(r),
                Err(msg) => {
                    errors.push(FieldError::new("rating", msg));
                    None
                }
            },
        };

        match name {
            Some(name) if errors.is_empty() => Ok(NewRestaurant {
                name,
                cuisine,
                rating,
            }),
            _ => Err(errors),
        }
    }
}

// Numbers and numeric strings are both accepted ("4.5" -> 4.5).
fn coerce_rating(v: &JsonValue) -> Result<Rating, String> {
    let value = if let Some(n) = v.as_f64() {
        n
    } else if let Some(s) = v.as_str() {
        s.trim()
            .parse::<f64>()
            .map_err(|_| "expected number".to_string())?
    } else {
        return Err("expected number".to_string());
    };
    Rating::from_f64(value).ok_or_else(|| "must be between -9.9 and 9.9".to_string())
}
