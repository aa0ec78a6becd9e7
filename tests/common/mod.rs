//! Shared helpers: spin the real router up on an ephemeral port.

use restaurant_service::transport;
use restaurant_service::{NewRestaurant, Rating, RestaurantService, RestaurantStore};
use std::sync::Arc;

pub struct TestApp {
    pub base_url: String,
    pub client: reqwest::Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

pub async fn spawn_app(store: Arc<dyn RestaurantStore>) -> anyhow::Result<TestApp> {
    let state = transport::http::AppState::new(RestaurantService::new(store));
    let app = transport::http::create_app(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    Ok(TestApp {
        base_url: format!("http://{}", addr),
        client,
    })
}

/// The two rows every scenario starts from.
pub fn seed_rows() -> Vec<NewRestaurant> {
    vec![
        NewRestaurant {
            name: "Testaurant".into(),
            cuisine: Some("Test Cuisine".into()),
            rating: Rating::from_tenths(40),
        },
        NewRestaurant {
            name: "Mock Bistro".into(),
            cuisine: Some("Mock Cuisine".into()),
            rating: Rating::from_tenths(42),
        },
    ]
}
