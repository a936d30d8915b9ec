//! # Employee Events
//!
//! Read-only query layer over the employee events SQLite database:
//! - Query executor (one scoped connection per statement, bound parameters)
//! - Shared query templates (`event_counts`, `notes`) bound to an entity
//! - Entity queries for employees and teams (`names`, `username`, `model_data`)
//! - Result shaping used by the report (fill-na, cumulative sums, risk mean)

pub mod employee;
pub mod entity;
pub mod error;
pub mod executor;
pub mod models;
pub mod query_base;
pub mod team;
#[cfg(feature = "test-support")]
pub mod test_support;
pub mod transform;

pub use employee::Employee;
pub use entity::{Entity, EntityId};
pub use error::{Error, Result};
pub use executor::QueryExecutor;
pub use models::{EventCount, ModelInput, Note, Table};
pub use query_base::{model_for, QueryBase, Unbound};
pub use team::Team;
