//! Test fixtures: a router over the seeded employee events database

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use employee_events::QueryExecutor;
use employee_report::classifier::LogisticModel;
use employee_report::{build_router, AppState};

pub use employee_events::test_support::create_test_db;

/// Classifier whose risk grows with negative events
pub fn test_classifier() -> LogisticModel {
    LogisticModel {
        features: vec!["positive_events".into(), "negative_events".into()],
        intercept: 0.0,
        coefficients: [-0.5, 0.5],
    }
}

/// Router over the given database file
pub fn setup_app(db_path: impl Into<PathBuf>) -> axum::Router {
    let state = AppState::new(QueryExecutor::new(db_path), Arc::new(test_classifier()));
    build_router(state)
}
