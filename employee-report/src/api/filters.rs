//! Filter form endpoints
//!
//! `GET /update_dropdown` re-renders the entity selector for a profile type
//! (requested by htmx when the radio changes). `POST /update_data` turns
//! the submitted form into a redirect to the selected dashboard.
//!
//! Missing or malformed fields are rejected with 400.

use axum::{
    extract::{Query, State},
    response::{Html, Redirect},
    Form,
};
use employee_events::{model_for, Entity, EntityId};
use serde::Deserialize;
use tracing::debug;

use crate::components::RenderContext;
use crate::error::ReportError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct DropdownQuery {
    pub profile_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SelectionForm {
    pub profile_type: Option<String>,
    #[serde(rename = "user-selection")]
    pub user_selection: Option<String>,
}

fn parse_profile_type(raw: Option<&str>) -> Result<Entity, ReportError> {
    let raw = raw.ok_or_else(|| ReportError::BadRequest("Missing profile_type".to_string()))?;
    Ok(raw.parse::<Entity>()?)
}

/// GET /update_dropdown?profile_type={Employee|Team}
pub async fn update_dropdown(
    State(state): State<AppState>,
    Query(query): Query<DropdownQuery>,
) -> Result<Html<String>, ReportError> {
    let entity = parse_profile_type(query.profile_type.as_deref())?;
    let selector = state
        .report
        .selector()
        .ok_or_else(|| ReportError::Config("Report has no entity selector".to_string()))?;

    let model = model_for(Some(entity), state.executor.clone());
    let ctx = RenderContext {
        entity_id: None,
        model: model.as_ref(),
        classifier: state.classifier.as_ref(),
    };

    debug!(profile_type = %entity, "Updating dropdown");
    Ok(Html(selector.render(&ctx).await?))
}

/// POST /update_data (form: profile_type, user-selection) → 303
pub async fn update_data(Form(form): Form<SelectionForm>) -> Result<Redirect, ReportError> {
    let entity = parse_profile_type(form.profile_type.as_deref())?;
    let id = EntityId::parse_optional(form.user_selection.as_deref())
        .ok_or_else(|| ReportError::BadRequest("Missing user-selection".to_string()))?;

    // Selector options are integer ids; anything else never came from the form
    let id = id
        .as_integer()
        .map(EntityId::from)
        .ok_or_else(|| ReportError::BadRequest(format!("Invalid user-selection: {:?}", id.as_str())))?;

    let target = entity.path(&id);
    debug!("Redirecting to {}", target);
    Ok(Redirect::to(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile_type() {
        assert_eq!(parse_profile_type(Some("Team")).unwrap(), Entity::Team);
        assert_eq!(parse_profile_type(Some("Employee")).unwrap(), Entity::Employee);
        assert!(matches!(parse_profile_type(None), Err(ReportError::BadRequest(_))));
        assert!(matches!(
            parse_profile_type(Some("Manager")),
            Err(ReportError::BadRequest(_))
        ));
    }
}
