//! Dashboard pages
//!
//! `/` renders the report with no entity bound; `/employee/:id` and
//! `/team/:id` bind the report to one entity.

use axum::{
    extract::{Path, State},
    response::Html,
};
use employee_events::{model_for, Entity, EntityId};
use tracing::info;

use crate::components::RenderContext;
use crate::error::ReportError;
use crate::AppState;

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>, ReportError> {
    render_dashboard(&state, None, None).await
}

/// GET /employee/:id
pub async fn employee_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ReportError> {
    render_dashboard(&state, Some(Entity::Employee), EntityId::parse_optional(Some(&id))).await
}

/// GET /team/:id
pub async fn team_dashboard(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ReportError> {
    render_dashboard(&state, Some(Entity::Team), EntityId::parse_optional(Some(&id))).await
}

async fn render_dashboard(
    state: &AppState,
    entity: Option<Entity>,
    id: Option<EntityId>,
) -> Result<Html<String>, ReportError> {
    let model = model_for(entity, state.executor.clone());
    let ctx = RenderContext {
        entity_id: id.as_ref(),
        model: model.as_ref(),
        classifier: state.classifier.as_ref(),
    };

    let page = state.report.render(&ctx).await?;
    info!(
        entity = entity.map(Entity::label).unwrap_or("none"),
        id = id.as_ref().map(EntityId::as_str).unwrap_or(""),
        "Rendered dashboard"
    );
    Ok(Html(page))
}
