//! Team-scoped queries

use async_trait::async_trait;

use crate::entity::{Entity, EntityId};
use crate::executor::QueryExecutor;
use crate::models::ModelInput;
use crate::query_base::QueryBase;
use crate::Result;

const NAMES_SQL: &str = r#"
    SELECT team_id, team_name
      FROM team
     ORDER BY team_id
"#;

const USERNAME_SQL: &str = r#"
    SELECT team_name
      FROM team
     WHERE team_id = ?
"#;

// One row per team member. Members without events come back with NULL sums.
const MODEL_DATA_SQL: &str = r#"
    SELECT positive_events, negative_events FROM (
        SELECT employee.employee_id,
               SUM(employee_events.positive_events) AS positive_events,
               SUM(employee_events.negative_events) AS negative_events
          FROM employee
          LEFT JOIN employee_events
            ON employee_events.employee_id = employee.employee_id
         WHERE employee.team_id = ?
         GROUP BY employee.employee_id
         ORDER BY employee.employee_id
    )
"#;

#[derive(Debug, Clone)]
pub struct Team {
    executor: QueryExecutor,
}

impl Team {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl QueryBase for Team {
    fn entity(&self) -> Option<Entity> {
        Some(Entity::Team)
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
