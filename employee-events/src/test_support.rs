//! Test database fixtures shared by this crate's tests and the report's
//!
//! Seeds a temporary SQLite file with the employee events schema and a small
//! known data set. Enabled with the `test-support` feature.

use std::path::PathBuf;

use anyhow::Result;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::{ConnectOptions, Connection};
use tempfile::TempDir;

use crate::QueryExecutor;

pub const SCHEMA: &[&str] = &[
    "CREATE TABLE team (
        team_id INTEGER PRIMARY KEY,
        team_name TEXT NOT NULL,
        shift TEXT,
        manager_name TEXT
    )",
    "CREATE TABLE employee (
        employee_id INTEGER PRIMARY KEY,
        first_name TEXT NOT NULL,
        last_name TEXT NOT NULL,
        team_id INTEGER REFERENCES team (team_id)
    )",
    "CREATE TABLE employee_events (
        event_date TEXT NOT NULL,
        employee_id INTEGER REFERENCES employee (employee_id),
        team_id INTEGER REFERENCES team (team_id),
        positive_events INTEGER,
        negative_events INTEGER
    )",
    "CREATE TABLE notes (
        employee_id INTEGER REFERENCES employee (employee_id),
        team_id INTEGER REFERENCES team (team_id),
        note TEXT NOT NULL,
        note_date TEXT NOT NULL
    )",
];

pub const SEED: &[&str] = &[
    "INSERT INTO team (team_id, team_name, shift, manager_name) VALUES
        (1, 'Alpha', 'Day', 'Margaret Hamilton'),
        (2, 'Bravo', 'Night', 'Ken Thompson'),
        (3, 'Charlie', 'Day', 'Barbara Liskov')",
    "INSERT INTO employee (employee_id, first_name, last_name, team_id) VALUES
        (1, 'Ada', 'Lovelace', 1),
        (2, 'Grace', 'Hopper', 1),
        (3, 'Alan', 'Turing', 2),
        (4, 'Edsger', 'Dijkstra', 1)",
    "INSERT INTO employee_events (event_date, employee_id, team_id, positive_events, negative_events) VALUES
        ('2024-01-02', 1, 1, 2, 0),
        ('2024-01-01', 1, 1, 3, 1),
        ('2024-01-01', 2, 1, 1, 2),
        ('2024-01-03', 2, 1, 4, 1),
        ('2024-01-02', 3, 2, 5, 5)",
    "INSERT INTO notes (employee_id, team_id, note, note_date) VALUES
        (1, 1, 'Strong quarter', '2024-01-05'),
        (1, 1, 'Asked about promotion', '2024-01-02'),
        (3, 2, 'Moved to night shift', '2024-01-04')",
];

/// Seeded database; keep the `TempDir` alive for the duration of the test
pub struct TestDb {
    pub dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    pub fn executor(&self) -> QueryExecutor {
        QueryExecutor::new(&self.path)
    }
}

/// Create and seed a database in a fresh temporary directory
pub async fn create_test_db() -> Result<TestDb> {
    let dir = TempDir::new()?;
    let path = dir.path().join("employee_events.db");

    let mut conn = SqliteConnectOptions::new()
        .filename(&path)
        .create_if_missing(true)
        .connect()
        .await?;

    for statement in SCHEMA.iter().chain(SEED) {
        sqlx::query(statement).execute(&mut conn).await?;
    }
    conn.close().await?;

    Ok(TestDb { dir, path })
}
