//! Entity identifiers and the shared query templates bound to them
//!
//! Table and column names only ever come from [`Entity`]; they are never
//! built from request input. Entity ids travel as [`EntityId`] and are always
//! bound as statement parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;

/// The closed set of entities a report can be scoped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Employee,
    Team,
}

impl Entity {
    pub const ALL: [Entity; 2] = [Entity::Employee, Entity::Team];

    /// Primary table name (also the `name` shown in the report header)
    pub fn table(self) -> &'static str {
        match self {
            Entity::Employee => "employee",
            Entity::Team => "team",
        }
    }

    /// Key column shared by the entity table, `employee_events` and `notes`
    pub fn id_column(self) -> &'static str {
        match self {
            Entity::Employee => "employee_id",
            Entity::Team => "team_id",
        }
    }

    /// Value used for the `profile_type` form field
    pub fn label(self) -> &'static str {
        match self {
            Entity::Employee => "Employee",
            Entity::Team => "Team",
        }
    }

    /// Dashboard path for one entity, e.g. `/team/3`
    pub fn path(self, id: &EntityId) -> String {
        format!("/{}/{}", self.table(), id)
    }

    /// Per-date positive/negative sums, ascending by date
    pub(crate) fn event_counts_sql(self) -> &'static str {
        match self {
            Entity::Employee => {
                r#"
                SELECT event_date,
                       SUM(positive_events) AS positive_events,
                       SUM(negative_events) AS negative_events
                  FROM employee
                  JOIN employee_events
                    ON employee.employee_id = employee_events.employee_id
                 WHERE employee.employee_id = ?
                 GROUP BY event_date
                 ORDER BY event_date
                "#
            }
            Entity::Team => {
                r#"
                SELECT event_date,
                       SUM(positive_events) AS positive_events,
                       SUM(negative_events) AS negative_events
                  FROM team
                  JOIN employee_events
                    ON team.team_id = employee_events.team_id
                 WHERE team.team_id = ?
                 GROUP BY event_date
                 ORDER BY event_date
                "#
            }
        }
    }

    /// Notes attached to the entity, oldest first
    pub(crate) fn notes_sql(self) -> &'static str {
        match self {
            Entity::Employee => {
                r#"
                SELECT note_date, note
                  FROM notes
                  JOIN employee
                    ON employee.employee_id = notes.employee_id
                 WHERE employee.employee_id = ?
                 ORDER BY note_date
                "#
            }
            Entity::Team => {
                r#"
                SELECT note_date, note
                  FROM notes
                  JOIN team
                    ON team.team_id = notes.team_id
                 WHERE team.team_id = ?
                 ORDER BY note_date
                "#
            }
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Entity {
    type Err = Error;

    /// Parse a `profile_type` value (`Employee` or `Team`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Entity::ALL
            .into_iter()
            .find(|entity| entity.label() == s)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown profile type: {s:?}")))
    }
}

/// Entity id as received from a route or form
///
/// Ids that parse as integers are bound as integers. Anything else matches
/// no entity, so queries given such an id yield empty results.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// `None` for blank input (no entity selected)
    pub fn parse_optional(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|id| !id.is_empty())
            .map(Self::new)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_integer(&self) -> Option<i64> {
        self.0.trim().parse().ok()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<i64> for EntityId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}
