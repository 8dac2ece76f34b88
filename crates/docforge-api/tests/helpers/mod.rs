//! Test helpers: build the router against temporary state.
//!
//! Run from workspace root: `cargo test -p docforge-api --test upload_test`
//! or `cargo test -p docforge-api`.

// Not every test binary uses every helper.
#![allow(dead_code)]

pub mod fixtures;

use axum_test::TestServer;
use docforge_api::setup;
use docforge_core::config::{MediaKindTable, RasterFormat};
use docforge_core::Config;
use tempfile::TempDir;

/// Test application: server plus the storage directory it owns.
pub struct TestApp {
    pub server: TestServer,
    pub _temp_dir: TempDir,
}

impl TestApp {
    pub fn client(&self) -> &TestServer {
        &self.server
    }
}

/// Setup a test app with isolated local storage and an in-memory store.
pub async fn setup_test_app() -> TestApp {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");

    let config = Config {
        server_port: 0,
        cors_origins: Vec::new(),
        environment: "test".to_string(),
        storage_path: temp_dir.path().display().to_string(),
        storage_base_url: "http://localhost:3000/media".to_string(),
        max_file_size_bytes: 50 * 1024 * 1024,
        raster_dpi: 300,
        raster_format: RasterFormat::Jpeg,
        media_kinds: MediaKindTable::default(),
    };

    let (_state, router) = setup::initialize_app(config)
        .await
        .expect("Failed to initialize app");

    let server = TestServer::new(router).expect("Failed to create test server");

    TestApp {
        server,
        _temp_dir: temp_dir,
    }
}
