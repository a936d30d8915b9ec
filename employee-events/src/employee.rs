//! Employee-scoped queries

use async_trait::async_trait;

use crate::entity::{Entity, EntityId};
use crate::executor::QueryExecutor;
use crate::models::ModelInput;
use crate::query_base::QueryBase;
use crate::Result;

const NAMES_SQL: &str = r#"
    SELECT employee_id, first_name || ' ' || last_name AS full_name
      FROM employee
     ORDER BY employee_id
"#;

const USERNAME_SQL: &str = r#"
    SELECT first_name || ' ' || last_name AS full_name
      FROM employee
     WHERE employee_id = ?
"#;

// One row for an existing employee (NULL sums when they have no events),
// no rows for an unknown id.
const MODEL_DATA_SQL: &str = r#"
    SELECT SUM(employee_events.positive_events) AS positive_events,
           SUM(employee_events.negative_events) AS negative_events
      FROM employee
      LEFT JOIN employee_events
        ON employee_events.employee_id = employee.employee_id
     WHERE employee.employee_id = ?
     GROUP BY employee.employee_id
"#;

#[derive(Debug, Clone)]
pub struct Employee {
    executor: QueryExecutor,
}

impl Employee {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl QueryBase for Employee {
    fn entity(&self) -> Option<Entity> {
        Some(Entity::Employee)
    }

    fn executor(&self) -> &QueryExecutor {
        &self.executor
    }

    async fn names(&self) -> Result<Vec<(i64, String)>> {
        self.executor.run_query(NAMES_SQL, None).await
    }

    async fn username(&self, id: &EntityId) -> Result<Option<String>> {
        let rows: Vec<(String,)> = self.executor.run_query(USERNAME_SQL, Some(id)).await?;
        Ok(rows.into_iter().next().map(|(name,)| name))
    }

    async fn model_data(&self, id: &EntityId) -> Result<Vec<ModelInput>> {
        self.executor.run_query(MODEL_DATA_SQL, Some(id)).await
    }
}
