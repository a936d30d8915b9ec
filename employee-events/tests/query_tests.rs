//! Integration tests for the employee and team queries
//!
//! Tests cover:
//! - Unbound model yields empty results
//! - Employee / team `names`, `username`, `event_counts`, `notes`
//! - `model_data` row shapes (one row per employee, one per team member)
//! - Bound-parameter handling of hostile ids

use employee_events::transform::{cumulative_counts, recruitment_risk};
use employee_events::{
    model_for, Employee, Entity, EntityId, ModelInput, QueryBase, Team, Unbound,
};
use employee_events::test_support::create_test_db;

// =============================================================================
// Fixture
// =============================================================================

#[tokio::test]
async fn test_fixture_seed() {
    let db = create_test_db().await.unwrap();
    assert!(db.path.starts_with(db.dir.path()));

    let employees = Employee::new(db.executor()).names().await.unwrap();
    let teams = Team::new(db.executor()).names().await.unwrap();
    assert_eq!((employees.len(), teams.len()), (4, 3));
}

// =============================================================================
// Unbound model
// =============================================================================

#[tokio::test]
async fn test_unbound_returns_empty() {
    let db = create_test_db().await.unwrap();
    let model = Unbound::new(db.executor());
    let id = EntityId::from(1);

    assert_eq!(model.name(), "");
    assert!(model.names().await.unwrap().is_empty());
    assert!(model.event_counts(&id).await.unwrap().is_empty());
    assert!(model.notes(&id).await.unwrap().is_empty());
    assert!(model.notes_table(&id).await.unwrap().is_empty());
    assert!(model.model_data(&id).await.unwrap().is_empty());
    assert_eq!(model.username(&id).await.unwrap(), None);
}

#[tokio::test]
async fn test_unbound_never_touches_database() {
    // No file at all: an unbound model must still answer with empty results
    let dir = tempfile::TempDir::new().unwrap();
    let model = Unbound::new(employee_events::QueryExecutor::new(dir.path().join("missing.db")));

    assert!(model.names().await.unwrap().is_empty());
    assert!(model.event_counts(&EntityId::from(1)).await.unwrap().is_empty());
}

// =============================================================================
// Employee
// =============================================================================

#[tokio::test]
async fn test_employee_names() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    assert_eq!(model.name(), "employee");
    let names = model.names().await.unwrap();
    assert_eq!(
        names,
        vec![
            (1, "Ada Lovelace".to_string()),
            (2, "Grace Hopper".to_string()),
            (3, "Alan Turing".to_string()),
            (4, "Edsger Dijkstra".to_string()),
        ]
    );

    // Stable across calls
    assert_eq!(model.names().await.unwrap(), names);
}

#[tokio::test]
async fn test_employee_username() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    assert_eq!(
        model.username(&EntityId::from(2)).await.unwrap().as_deref(),
        Some("Grace Hopper")
    );
    assert_eq!(model.username(&EntityId::from(42)).await.unwrap(), None);
}

#[tokio::test]
async fn test_employee_event_counts_cumulative() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    let counts = model.event_counts(&EntityId::from(1)).await.unwrap();
    let dates: Vec<&str> = counts.iter().map(|c| c.event_date.as_str()).collect();
    assert_eq!(dates, vec!["2024-01-01", "2024-01-02"]);

    let cumulative = cumulative_counts(&counts);
    let totals: Vec<(i64, i64)> = cumulative.iter().map(|c| (c.positive, c.negative)).collect();
    assert_eq!(totals, vec![(3, 1), (5, 1)]);
}

#[tokio::test]
async fn test_employee_event_counts_unknown_id() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    assert!(model.event_counts(&EntityId::from(999)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_employee_notes_ordered() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    let notes = model.notes(&EntityId::from(1)).await.unwrap();
    let text: Vec<&str> = notes.iter().map(|n| n.note.as_str()).collect();
    assert_eq!(text, vec!["Asked about promotion", "Strong quarter"]);

    let table = model.notes_table(&EntityId::from(1)).await.unwrap();
    assert_eq!(table.columns, vec!["note_date", "note"]);
    assert_eq!(table.len(), 2);
}

#[tokio::test]
async fn test_employee_model_data_single_row() {
    let db = create_test_db().await.unwrap();
    let model = Employee::new(db.executor());

    for id in 1..=4 {
        let rows = model.model_data(&EntityId::from(id)).await.unwrap();
        assert_eq!(rows.len(), 1, "employee {id} should yield exactly one row");
        let [positive, negative] = rows[0].features();
        assert!(positive >= 0.0 && negative >= 0.0);
    }

    let rows = model.model_data(&EntityId::from(1)).await.unwrap();
    assert_eq!(
        rows,
        vec![ModelInput {
            positive_events: Some(5),
            negative_events: Some(1),
        }]
    );

    // No events: NULL sums, filled with zero downstream
    let rows = model.model_data(&EntityId::from(4)).await.unwrap();
    assert_eq!(rows[0].features(), [0.0, 0.0]);

    // Unknown employee: nothing to score
    assert!(model.model_data(&EntityId::from(999)).await.unwrap().is_empty());
}

// =============================================================================
// Team
// =============================================================================

#[tokio::test]
async fn test_team_names_and_username() {
    let db = create_test_db().await.unwrap();
    let model = Team::new(db.executor());

    assert_eq!(model.name(), "team");
    assert_eq!(
        model.names().await.unwrap(),
        vec![
            (1, "Alpha".to_string()),
            (2, "Bravo".to_string()),
            (3, "Charlie".to_string()),
        ]
    );
    assert_eq!(
        model.username(&EntityId::from(2)).await.unwrap().as_deref(),
        Some("Bravo")
    );
}

#[tokio::test]
async fn test_team_event_counts() {
    let db = create_test_db().await.unwrap();
    let model = Team::new(db.executor());

    let counts = model.event_counts(&EntityId::from(1)).await.unwrap();
    let rows: Vec<(&str, Option<i64>, Option<i64>)> = counts
        .iter()
        .map(|c| (c.event_date.as_str(), c.positive_events, c.negative_events))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("2024-01-01", Some(4), Some(3)),
            ("2024-01-02", Some(2), Some(0)),
            ("2024-01-03", Some(4), Some(1)),
        ]
    );
}

#[tokio::test]
async fn test_team_notes() {
    let db = create_test_db().await.unwrap();
    let model = Team::new(db.executor());

    assert_eq!(model.notes(&EntityId::from(1)).await.unwrap().len(), 2);
    assert_eq!(model.notes(&EntityId::from(3)).await.unwrap().len(), 0);
}

#[tokio::test]
async fn test_team_model_data_one_row_per_member() {
    let db = create_test_db().await.unwrap();
    let model = Team::new(db.executor());

    let rows = model.model_data(&EntityId::from(1)).await.unwrap();
    assert_eq!(rows.len(), 3, "Alpha has three members");
    let features: Vec<[f64; 2]> = rows.iter().map(ModelInput::features).collect();
    assert_eq!(features, vec![[5.0, 1.0], [5.0, 3.0], [0.0, 0.0]]);

    assert_eq!(model.model_data(&EntityId::from(2)).await.unwrap().len(), 1);
    assert!(model.model_data(&EntityId::from(3)).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_team_risk_is_mean_of_members() {
    let probabilities = [0.1, 0.3, 0.8];
    let risk = recruitment_risk(Entity::Team, &probabilities).unwrap();
    assert!((risk - 0.4).abs() < 1e-12);
}

// =============================================================================
// Injection safety
// =============================================================================

#[tokio::test]
async fn test_hostile_id_is_a_non_matching_literal() {
    let db = create_test_db().await.unwrap();
    let hostile = EntityId::new("1; DROP TABLE employee");

    for entity in Entity::ALL {
        let model = model_for(Some(entity), db.executor());
        assert!(model.event_counts(&hostile).await.unwrap().is_empty());
        assert!(model.notes(&hostile).await.unwrap().is_empty());
        assert_eq!(model.username(&hostile).await.unwrap(), None);
    }

    let hostile = EntityId::new("1 OR 1=1");
    let model = Employee::new(db.executor());
    assert!(model.event_counts(&hostile).await.unwrap().is_empty());

    // Table is still there
    assert_eq!(model.names().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_numeric_text_id_matches_nothing() {
    let db = create_test_db().await.unwrap();

    for raw in ["1.0", "1e0", "1.", " 1.00"] {
        let id = EntityId::new(raw);
        for entity in Entity::ALL {
            let model = model_for(Some(entity), db.executor());
            assert_eq!(model.username(&id).await.unwrap(), None, "{entity} {raw:?}");
            assert!(model.event_counts(&id).await.unwrap().is_empty(), "{entity} {raw:?}");
            assert!(model.notes(&id).await.unwrap().is_empty(), "{entity} {raw:?}");
            assert!(model.notes_table(&id).await.unwrap().is_empty(), "{entity} {raw:?}");
            assert!(model.model_data(&id).await.unwrap().is_empty(), "{entity} {raw:?}");
        }
    }

    // The same entity by its integer id
    let model = Employee::new(db.executor());
    assert_eq!(
        model.username(&EntityId::new("1")).await.unwrap().as_deref(),
        Some("Ada Lovelace")
    );
}

#[tokio::test]
async fn test_model_for_selects_entity() {
    let db = create_test_db().await.unwrap();

    assert_eq!(model_for(None, db.executor()).name(), "");
    assert_eq!(model_for(Some(Entity::Employee), db.executor()).name(), "employee");
    assert_eq!(model_for(Some(Entity::Team), db.executor()).name(), "team");
}
