//! Shared query interface for report models
//!
//! [`QueryBase`] carries the templated queries every entity shares
//! (`event_counts`, `notes`); the entity types add `names`, `username` and
//! `model_data`. [`Unbound`] is the model used before any entity is
//! selected: every query on it yields an empty result.

use async_trait::async_trait;

use crate::entity::{Entity, EntityId};
use crate::executor::QueryExecutor;
use crate::models::{EventCount, ModelInput, Note, Table};
use crate::Result;

#[async_trait]
pub trait QueryBase: Send + Sync {
    /// Entity the queries are bound to, `None` when unbound
    fn entity(&self) -> Option<Entity>;

    fn executor(&self) -> &QueryExecutor;

    /// Primary table name, empty when unbound
    fn name(&self) -> &'static str {
        self.entity().map(Entity::table).unwrap_or("")
    }

    /// `(id, display name)` for every entity of this kind
    async fn names(&self) -> Result<Vec<(i64, String)>> {
        Ok(Vec::new())
    }

    /// Display name for one entity
    async fn username(&self, _id: &EntityId) -> Result<Option<String>> {
        Ok(None)
    }

    /// Classifier input rows for one entity
    async fn model_data(&self, _id: &EntityId) -> Result<Vec<ModelInput>> {
        Ok(Vec::new())
    }

    /// Positive/negative sums per event date, ascending by date
    async fn event_counts(&self, id: &EntityId) -> Result<Vec<EventCount>> {
        match self.entity() {
            Some(entity) => {
                self.executor()
                    .run_query(entity.event_counts_sql(), Some(id))
                    .await
            }
            None => Ok(Vec::new()),
        }
    }

    /// `(note_date, note)` rows for one entity
    async fn notes(&self, id: &EntityId) -> Result<Vec<Note>> {
        match self.entity() {
            Some(entity) => self.executor().run_query(entity.notes_sql(), Some(id)).await,
            None => Ok(Vec::new()),
        }
    }

    /// Notes as a [`Table`] with the statement's column names
    async fn notes_table(&self, id: &EntityId) -> Result<Table> {
        match self.entity() {
            Some(entity) => {
                self.executor()
                    .run_query_table(entity.notes_sql(), Some(id))
                    .await
            }
            None => Ok(Table::default()),
        }
    }
}

/// Model with no entity bound (the dashboard landing page)
#[derive(Debug, Clone)]
pub struct Unbound {
    executor: QueryExecutor,
}

impl Unbound {
    pub fn new(executor: QueryExecutor) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl QueryBase for Unbound {
    fn entity(&self) -> Option<Entity> {
        None
    }

    fn executor(&self) -> &QueryExecutor {
        &self.executor
    }
}

/// Boxed model for the given entity, or [`Unbound`] for `None`
pub fn model_for(entity: Option<Entity>, executor: QueryExecutor) -> Box<dyn QueryBase> {
    match entity {
        Some(Entity::Employee) => Box::new(crate::Employee::new(executor)),
        Some(Entity::Team) => Box::new(crate::Team::new(executor)),
        None => Box::new(Unbound::new(executor)),
    }
}
