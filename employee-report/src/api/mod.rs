//! HTTP handlers for employee-report

pub mod dashboard;
pub mod filters;
pub mod health;

pub use dashboard::{employee_dashboard, index, team_dashboard};
pub use filters::{update_data, update_dropdown};
pub use health::health_routes;
