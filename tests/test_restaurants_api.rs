//! HTTP contract tests against the in-memory store.

mod common;

use common::{seed_rows, spawn_app, TestApp};
use reqwest::StatusCode;
use restaurant_service::MemoryRestaurantStore;
use serde_json::{json, Value};
use std::sync::Arc;

async fn seeded_app() -> anyhow::Result<TestApp> {
    let store = MemoryRestaurantStore::seeded(&seed_rows()).await?;
    spawn_app(Arc::new(store)).await
}

#[tokio::test]
async fn list_returns_all_rows_in_id_order() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app.client.get(app.url("/restaurants")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = res.json().await?;
    let rows = body.as_array().expect("array body");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0]["name"], "Testaurant");
    assert_eq!(rows[0]["id"], 1);
    assert_eq!(rows[0]["rating"], "4.0");
    assert_eq!(rows[1]["name"], "Mock Bistro");
    assert_eq!(rows[1]["rating"], "4.2");
    Ok(())
}

#[tokio::test]
async fn list_on_empty_table_is_empty_array() -> anyhow::Result<()> {
    let app = spawn_app(Arc::new(MemoryRestaurantStore::new())).await?;
    let res = app.client.get(app.url("/restaurants")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!([]));
    Ok(())
}

#[tokio::test]
async fn get_by_id_and_missing_id() -> anyhow::Result<()> {
    let app = seeded_app().await?;

    let res = app.client.get(app.url("/restaurants/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Testaurant");
    assert_eq!(body["cuisine"], "Test Cuisine");

    let res = app.client.get(app.url("/restaurants/999")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await?;
    assert_eq!(body["success"], false);
    assert!(body.get("name").is_none());
    Ok(())
}

#[tokio::test]
async fn non_integer_id_is_a_client_error() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app.client.get(app.url("/restaurants/abc")).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn create_assigns_next_id() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .post(app.url("/restaurants"))
        .json(&json!({
            "name": "Brand New Cafe",
            "cuisine": "Coffee & Pastries",
            "rating": 4.9
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["id"], 3);
    assert_eq!(body["name"], "Brand New Cafe");
    assert_eq!(body["rating"], "4.9");

    let res = app.client.get(app.url("/restaurants")).send().await?;
    assert_eq!(res.json::<Value>().await?.as_array().map(Vec::len), Some(3));
    Ok(())
}

#[tokio::test]
async fn create_ids_strictly_increase() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let mut last = 2;
    for i in 0..5 {
        let body: Value = app
            .client
            .post(app.url("/restaurants"))
            .json(&json!({ "name": format!("Place {}", i) }))
            .send()
            .await?
            .json()
            .await?;
        let id = body["id"].as_i64().expect("numeric id");
        assert!(id > last);
        last = id;
    }
    Ok(())
}

#[tokio::test]
async fn create_without_name_is_rejected() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .post(app.url("/restaurants"))
        .json(&json!({ "cuisine": "Nameless", "rating": 3.0 }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["errors"][0]["field"], "name");

    // Nothing was written.
    let res = app.client.get(app.url("/restaurants")).send().await?;
    assert_eq!(res.json::<Value>().await?.as_array().map(Vec::len), Some(2));
    Ok(())
}

#[tokio::test]
async fn create_with_non_numeric_rating_is_rejected() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .post(app.url("/restaurants"))
        .json(&json!({ "name": "Odd", "rating": "great" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["errors"][0]["field"], "rating");
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_unprocessable() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .post(app.url("/restaurants"))
        .header("content-type", "application/json")
        .body("{\"name\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    Ok(())
}

#[tokio::test]
async fn update_replaces_all_fields() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .put(app.url("/restaurants/1"))
        .json(&json!({
            "name": "Testaurant Updated",
            "cuisine": "New Cuisine",
            "rating": 5.0
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Testaurant Updated");
    assert_eq!(body["rating"], "5.0");

    let fetched: Value = app
        .client
        .get(app.url("/restaurants/1"))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(
        fetched,
        json!({
            "id": 1,
            "name": "Testaurant Updated",
            "cuisine": "New Cuisine",
            "rating": "5.0"
        })
    );
    Ok(())
}

#[tokio::test]
async fn update_clears_omitted_optional_fields() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let body: Value = app
        .client
        .put(app.url("/restaurants/2"))
        .json(&json!({ "name": "Just A Name" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["cuisine"], Value::Null);
    assert_eq!(body["rating"], Value::Null);
    Ok(())
}

#[tokio::test]
async fn update_missing_row_is_not_found() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app
        .client
        .put(app.url("/restaurants/999"))
        .json(&json!({ "name": "Ghost" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn delete_returns_row_and_it_stays_gone() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app.client.delete(app.url("/restaurants/1")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["name"], "Testaurant");

    let res = app.client.get(app.url("/restaurants/1")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.client.delete(app.url("/restaurants/1")).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // Deleted ids are not handed out again.
    let body: Value = app
        .client
        .post(app.url("/restaurants"))
        .json(&json!({ "name": "After Delete" }))
        .send()
        .await?
        .json()
        .await?;
    assert_eq!(body["id"], 3);
    Ok(())
}

#[tokio::test]
async fn health_and_openapi_are_served() -> anyhow::Result<()> {
    let app = seeded_app().await?;
    let res = app.client.get(app.url("/health")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await?;
    assert_eq!(body["data"]["status"], "ok");

    let res = app.client.get(app.url("/api-docs/openapi.json")).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let doc: Value = res.json().await?;
    assert!(doc["paths"]["/restaurants/{id}"].is_object());
    Ok(())
}
