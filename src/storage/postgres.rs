//! Postgres-backed restaurant store.

use crate::domain::{NewRestaurant, Rating, Restaurant};
use crate::infra::config::DbConfig;
use crate::storage::{RestaurantStore, StorageError};
use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::info;

pub const CREATE_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS restaurants (
    id SERIAL PRIMARY KEY,
    name VARCHAR(100) NOT NULL,
    cuisine VARCHAR(50),
    rating DECIMAL(2, 1)
)";

// `rating::text` keeps Postgres' own one-decimal rendering of DECIMAL(2,1).
const COLUMNS: &str = "id, name, cuisine, rating::text AS rating";

/// Store over a shared connection pool. Cloning shares the pool.
#[derive(Clone)]
pub struct PgRestaurantStore {
    pool: PgPool,
}

impl PgRestaurantStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a bounded pool using `config`.
    pub async fn connect(config: &DbConfig) -> Result<Self, StorageError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(config.connect_options())
            .await?;
        info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            max_connections = config.max_connections,
            "connected to postgres"
        );
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Waits for checked-out connections to return, then closes the pool.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn row_to_restaurant(row: &PgRow) -> Result<Restaurant, StorageError> {
    let id: i32 = row.try_get("id")?;
    let rating: Option<String> = row.try_get("rating")?;
    let rating = rating
        .map(|text| text.parse::<Rating>())
        .transpose()
        .map_err(|e| StorageError::CorruptRow {
            id,
            reason: e.to_string(),
        })?;
    Ok(Restaurant {
        id,
        name: row.try_get("name")?,
        cuisine: row.try_get("cuisine")?,
        rating,
    })
}

fn rating_param(input: &NewRestaurant) -> Option<String> {
    input.rating.map(|r| r.to_string())
}

#[async_trait]
impl RestaurantStore for PgRestaurantStore {
    async fn ensure_schema(&self) -> Result<(), StorageError> {
        sqlx::query(CREATE_TABLE_SQL).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Restaurant>, StorageError> {
        let sql = format!("SELECT {} FROM restaurants ORDER BY id", COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;
        rows.iter().map(row_to_restaurant).collect()
    }

    async fn get(&self, id: i32) -> Result<Option<Restaurant>, StorageError> {
        let sql = format!("SELECT {} FROM restaurants WHERE id = $1", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn insert(&self, input: &NewRestaurant) -> Result<Restaurant, StorageError> {
        let sql = format!(
            "INSERT INTO restaurants (name, cuisine, rating) \
             VALUES ($1, $2, CAST($3 AS NUMERIC(2, 1))) RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(input.name.as_str())
            .bind(input.cuisine.as_deref())
            .bind(rating_param(input))
            .fetch_one(&self.pool)
            .await?;
        row_to_restaurant(&row)
    }

    async fn update(
        &self,
        id: i32,
        input: &NewRestaurant,
    ) -> Result<Option<Restaurant>, StorageError> {
        let sql = format!(
            "UPDATE restaurants SET name = $1, cuisine = $2, rating = CAST($3 AS NUMERIC(2, 1)) \
             WHERE id = $4 RETURNING {}",
            COLUMNS
        );
        let row = sqlx::query(&sql)
            .bind(input.name.as_str())
            .bind(input.cuisine.as_deref())
            .bind(rating_param(input))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn delete(&self, id: i32) -> Result<Option<Restaurant>, StorageError> {
        let sql = format!("DELETE FROM restaurants WHERE id = $1 RETURNING {}", COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(row_to_restaurant).transpose()
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM restaurants")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }
}
