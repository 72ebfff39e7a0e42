//! Test application factory for integration tests.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tower::ServiceExt;

use bandwave::assets::AssetLoader;
use bandwave::models::AppConfig;
use bandwave::server::{build_router, create_app_state_with_config, AppState};

use super::fixtures;

/// Test application with router and a private gallery directory
pub struct TestApp {
    router: axum::Router,
    pub state: AppState,
    /// Keeps the gallery directory alive for the lifetime of the app
    gallery_dir: TempDir,
}

impl TestApp {
    /// Create a new test application using embedded palettes and a small canvas
    pub fn new() -> Self {
        Self::with_config(fixtures::small_config())
    }

    /// Create a test application with a custom configuration
    pub fn with_config(config: AppConfig) -> Self {
        Self::build(config, None)
    }

    /// Create a test application that also reads palettes from `dir`
    pub fn with_palettes_dir(dir: &Path) -> Self {
        Self::build(fixtures::small_config(), Some(dir.to_path_buf()))
    }

    fn build(config: AppConfig, palettes_dir: Option<PathBuf>) -> Self {
        let gallery_dir = TempDir::new().expect("Failed to create gallery dir");
        let asset_loader = Arc::new(AssetLoader::new(palettes_dir, None));

        let state =
            create_app_state_with_config(Arc::new(config), asset_loader, gallery_dir.path())
                .expect("Failed to create app state");
        let router = build_router(state.clone());

        Self {
            router,
            state,
            gallery_dir,
        }
    }

    /// Directory generated images are written to
    pub fn gallery_path(&self) -> &Path {
        self.gallery_dir.path()
    }

    /// Make a GET request to the given path
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(Request::get(path).body(Body::empty()).unwrap())
            .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, path: &str, body: &str) -> TestResponse {
        let builder = Request::post(path).header("Content-Type", "application/json");
        self.request(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, path: &str) -> TestResponse {
        self.request(Request::post(path).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request to the router
    async fn request(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .into_body()
            .collect()
            .await
            .expect("Failed to collect body")
            .to_bytes()
            .to_vec();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Generate an image and return the response JSON
    pub async fn generate(&self, wave_type: &str, palette: &str) -> serde_json::Value {
        let body = serde_json::json!({
            "wave_type": wave_type,
            "palette": palette,
        });
        let response = self.post_json("/generate", &body.to_string()).await;
        assert_eq!(
            response.status,
            StatusCode::OK,
            "generate failed: {}",
            response.text()
        );
        response.json()
    }
}

impl Default for TestApp {
    fn default() -> Self {
        Self::new()
    }
}

/// Test response with convenience methods
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: axum::http::HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    /// Parse body as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.body).expect("Failed to parse JSON response")
    }

    /// Get body as string
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).to_string()
    }

    /// Get raw body bytes
    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Check if response is a PNG image
    pub fn is_png(&self) -> bool {
        self.body.len() >= 8 && &self.body[0..8] == b"\x89PNG\r\n\x1a\n"
    }
}
