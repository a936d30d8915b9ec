//! Query execution against the employee events database
//!
//! Every statement gets its own read-only connection, which is closed
//! before the result is returned, whether or not the statement succeeded.
//! Entity ids are always bound as integer parameters. An id that is not an
//! integer matches no row and the statement is not run: SQLite would coerce
//! text such as `1.0` or `1e0` to a number when comparing it with an
//! INTEGER key.

use std::path::{Path, PathBuf};

use serde_json::json;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteRow};
use sqlx::{
    Arguments, Column, ConnectOptions, Connection, Executor, FromRow, Row, SqliteConnection,
    Statement, ValueRef,
};
use tracing::{debug, warn};

use crate::entity::EntityId;
use crate::models::Table;
use crate::{Error, Result};

/// Runs statements against one SQLite file
#[derive(Debug, Clone)]
pub struct QueryExecutor {
    db_path: PathBuf,
    options: SqliteConnectOptions,
}

impl QueryExecutor {
    /// Executor for the database at `db_path`, opened read-only
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        let db_path = db_path.into();
        let options = SqliteConnectOptions::new()
            .filename(&db_path)
            .read_only(true)
            .create_if_missing(false);

        Self { db_path, options }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Confirm the database file exists and can be opened
    pub async fn verify(&self) -> Result<()> {
        if !self.db_path.exists() {
            return Err(Error::NotFound(self.db_path.display().to_string()));
        }
        let conn = self.connect().await?;
        release(conn).await;
        Ok(())
    }

    /// Run `sql` and map every row to `T` (a `FromRow` struct or tuple)
    pub async fn run_query<T>(&self, sql: &str, id: Option<&EntityId>) -> Result<Vec<T>>
    where
        T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
    {
        let Some(args) = id_arguments(id) else {
            return Ok(Vec::new());
        };
        let mut conn = self.connect().await?;

        let result = sqlx::query_as_with::<_, T, _>(sql, args)
            .fetch_all(&mut conn)
            .await;

        release(conn).await;

        let rows = result?;
        debug!(rows = rows.len(), "Query returned");
        Ok(rows)
    }

    /// Run `sql` and return a [`Table`] whose columns are named by the statement
    pub async fn run_query_table(&self, sql: &str, id: Option<&EntityId>) -> Result<Table> {
        let mut conn = self.connect().await?;
        let result = fetch_table(&mut conn, sql, id).await;
        release(conn).await;

        let table = result?;
        debug!(rows = table.len(), columns = table.columns.len(), "Table query returned");
        Ok(table)
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        self.options.connect().await.map_err(|e| {
            warn!("Failed to open {}: {}", self.db_path.display(), e);
            Error::Database(e)
        })
    }
}

async fn fetch_table(conn: &mut SqliteConnection, sql: &str, id: Option<&EntityId>) -> Result<Table> {
    let statement = (&mut *conn).prepare(sql).await?;
    let columns: Vec<String> = statement
        .columns()
        .iter()
        .map(|column| column.name().to_string())
        .collect();

    let Some(args) = id_arguments(id) else {
        return Ok(Table {
            columns,
            rows: Vec::new(),
        });
    };
    let rows = sqlx::query_with(sql, args).fetch_all(&mut *conn).await?;

    Ok(Table {
        columns,
        rows: rows.iter().map(row_to_json).collect(),
    })
}

/// Statement arguments for an optional entity id, `None` when the id is
/// not an integer and can match no row
fn id_arguments(id: Option<&EntityId>) -> Option<SqliteArguments<'static>> {
    let mut args = SqliteArguments::default();
    let Some(id) = id else {
        return Some(args);
    };
    let Some(value) = id.as_integer() else {
        debug!("Entity id {:?} is not an integer, skipping query", id.as_str());
        return None;
    };
    if let Err(e) = args.add(value) {
        warn!("Failed to bind entity id {}: {}", id, e);
    }
    Some(args)
}

/// Convert one SQLite row to JSON cells, NULL as `null`
fn row_to_json(row: &SqliteRow) -> Vec<serde_json::Value> {
    (0..row.len())
        .map(|i| {
            row.try_get_raw(i)
                .ok()
                .and_then(|val| {
                    if val.is_null() {
                        Some(serde_json::Value::Null)
                    } else {
                        row.try_get::<i64, _>(i)
                            .ok()
                            .map(|v| json!(v))
                            .or_else(|| row.try_get::<f64, _>(i).ok().map(|v| json!(v)))
                            .or_else(|| {
                                row.try_get::<String, _>(i)
                                    .ok()
                                    .map(serde_json::Value::String)
                            })
                    }
                })
                .unwrap_or(serde_json::Value::Null)
        })
        .collect()
}

/// Close a connection, logging rather than failing the caller
async fn release(conn: SqliteConnection) {
    if let Err(e) = conn.close().await {
        warn!("Failed to close database connection: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn scratch_db() -> (TempDir, QueryExecutor) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("scratch.db");

        let mut conn = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .connect()
            .await
            .unwrap();
        sqlx::query("CREATE TABLE t (id INTEGER PRIMARY KEY, label TEXT, score REAL)")
            .execute(&mut conn)
            .await
            .unwrap();
        sqlx::query("INSERT INTO t (id, label, score) VALUES (1, 'one', 0.5), (2, NULL, NULL)")
            .execute(&mut conn)
            .await
            .unwrap();
        conn.close().await.unwrap();

        (dir, QueryExecutor::new(path))
    }

    #[tokio::test]
    async fn test_run_query_binds_integer_id() {
        let (_dir, executor) = scratch_db().await;
        let rows: Vec<(i64, Option<String>)> = executor
            .run_query("SELECT id, label FROM t WHERE id = ?", Some(&EntityId::from(1)))
            .await
            .unwrap();
        assert_eq!(rows, vec![(1, Some("one".to_string()))]);
    }

    #[tokio::test]
    async fn test_run_query_text_id_never_matches() {
        let (_dir, executor) = scratch_db().await;
        let rows: Vec<(i64,)> = executor
            .run_query("SELECT id FROM t WHERE id = ?", Some(&EntityId::new("1 OR 1=1")))
            .await
            .unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn test_run_query_numeric_text_id_never_matches() {
        let (_dir, executor) = scratch_db().await;
        for raw in ["1.0", "1e0", "1.", " 1.00"] {
            let id = EntityId::new(raw);
            let rows: Vec<(i64,)> = executor
                .run_query("SELECT id FROM t WHERE id = ?", Some(&id))
                .await
                .unwrap();
            assert!(rows.is_empty(), "{raw:?} should match nothing");

            let table = executor
                .run_query_table("SELECT id, label FROM t WHERE id = ?", Some(&id))
                .await
                .unwrap();
            assert!(table.is_empty(), "{raw:?} should match nothing");
            assert_eq!(table.columns, vec!["id", "label"]);
        }
    }

    #[tokio::test]
    async fn test_run_query_table_names_columns() {
        let (_dir, executor) = scratch_db().await;
        let table = executor
            .run_query_table("SELECT id, label AS name, score FROM t ORDER BY id", None)
            .await
            .unwrap();

        assert_eq!(table.columns, vec!["id", "name", "score"]);
        assert_eq!(table.rows[0], vec![json!(1), json!("one"), json!(0.5)]);
        assert_eq!(
            table.rows[1],
            vec![json!(2), serde_json::Value::Null, serde_json::Value::Null]
        );
    }

    #[tokio::test]
    async fn test_run_query_table_empty_keeps_columns() {
        let (_dir, executor) = scratch_db().await;
        let table = executor
            .run_query_table("SELECT id, label FROM t WHERE id = ?", Some(&EntityId::from(99)))
            .await
            .unwrap();
        assert!(table.is_empty());
        assert_eq!(table.columns, vec!["id", "label"]);
    }

    #[tokio::test]
    async fn test_connection_is_read_only() {
        let (_dir, executor) = scratch_db().await;
        let result = executor
            .run_query::<(i64,)>("INSERT INTO t (id) VALUES (3) RETURNING id", None)
            .await;
        assert!(result.is_err(), "Write should fail on a read-only connection");
    }

    #[tokio::test]
    async fn test_missing_database_is_an_error() {
        let dir = TempDir::new().unwrap();
        let executor = QueryExecutor::new(dir.path().join("absent.db"));

        assert!(matches!(executor.verify().await, Err(Error::NotFound(_))));
        let result = executor.run_query::<(i64,)>("SELECT 1", None).await;
        assert!(matches!(result, Err(Error::Database(_))));
    }

    #[tokio::test]
    async fn test_failed_statement_still_releases() {
        let (_dir, executor) = scratch_db().await;
        let bad = executor.run_query::<(i64,)>("SELECT nope FROM t", None).await;
        assert!(bad.is_err());

        // A fresh connection still works after the failure
        let ok: Vec<(i64,)> = executor.run_query("SELECT id FROM t", None).await.unwrap();
        assert_eq!(ok.len(), 2);
    }
}
