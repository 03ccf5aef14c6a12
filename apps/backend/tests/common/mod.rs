//! Common test utilities and fixtures for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wrapping an in-memory catalog and progress store
//! - Helper functions for creating test data

pub mod fixtures;

use axum::Router;
use axum_test::TestServer;

use protocol_review_backend::services::catalog::Catalog;
use protocol_review_backend::services::progress::InMemoryProgress;
use protocol_review_backend::{router, AppState};

/// Test context holding application state and a test server.
pub struct TestContext {
    pub state: AppState,
    app: Router,
}

impl TestContext {
    /// Create a context over the sample protocol deck.
    pub fn new() -> Self {
        Self::with_json(fixtures::SAMPLE_CARDS_JSON)
    }

    /// Create a context over a JSON array of records.
    ///
    /// # Panics
    /// Panics if the JSON is not a valid record file.
    pub fn with_json(json: &str) -> Self {
        let catalog = Catalog::from_json(json).expect("Failed to parse test records");
        let state = AppState::new(catalog, InMemoryProgress::new(fixtures::HISTORY_LIMIT));
        let app = router(state.clone());
        Self { state, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    pub fn server(&self) -> TestServer {
        TestServer::new(self.router()).expect("Failed to start test server")
    }

    /// Percent-encode a card id for use in a path segment.
    pub fn id_path(id: &str) -> String {
        id.bytes()
            .map(|b| match b {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                    (b as char).to_string()
                }
                _ => format!("%{:02X}", b),
            })
            .collect()
    }
}
