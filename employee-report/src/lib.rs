//! employee-report library - Employee events dashboard
//!
//! Server-rendered HTML dashboard over the employee events database with
//! per-employee and per-team recruitment risk scores.

use std::sync::Arc;

use axum::Router;
use employee_events::QueryExecutor;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod classifier;
pub mod components;
pub mod config;
pub mod error;

use classifier::Classifier;
use components::Report;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Read-only query executor (one connection per query)
    pub executor: QueryExecutor,
    /// Classifier loaded once at startup
    pub classifier: Arc<dyn Classifier>,
    /// Component tree rendered by every dashboard page
    pub report: Arc<Report>,
}

impl AppState {
    pub fn new(executor: QueryExecutor, classifier: Arc<dyn Classifier>) -> Self {
        Self {
            executor,
            classifier,
            report: Arc::new(Report::dashboard()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::index))
        .route("/employee/:id", get(api::employee_dashboard))
        .route("/team/:id", get(api::team_dashboard))
        .route("/update_dropdown", get(api::update_dropdown))
        .route("/update_data", post(api::update_data))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
