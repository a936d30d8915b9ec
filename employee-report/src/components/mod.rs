//! Dashboard component tree
//!
//! A [`Report`] is an ordered list of [`Component`]s. Each component renders
//! an HTML fragment from the selected entity id and the bound query model,
//! calling at most one query on the model. Visualizations render an empty
//! placeholder when no entity is selected.

pub mod chart;
pub mod html;

use employee_events::transform::{cumulative_counts, recruitment_risk};
use employee_events::{Entity, EntityId, QueryBase, Table};
use tracing::debug;

use crate::classifier::{positive_class, Classifier};
use crate::error::ReportError;
use chart::{line_chart_svg, risk_bar_svg, Series};
use html::escape;

const POSITIVE_COLOR: &str = "#1f77b4";
const NEGATIVE_COLOR: &str = "#ff7f0e";

/// Everything a component may read while rendering
pub struct RenderContext<'a> {
    pub entity_id: Option<&'a EntityId>,
    pub model: &'a dyn QueryBase,
    pub classifier: &'a dyn Classifier,
}

/// Entity selector populated from `names()`
#[derive(Debug, Clone)]
pub struct Dropdown {
    pub id: &'static str,
    pub name: &'static str,
}

impl Dropdown {
    pub async fn render(&self, ctx: &RenderContext<'_>) -> Result<String, ReportError> {
        let names = ctx.model.names().await?;
        let selected = ctx.entity_id.and_then(EntityId::as_integer);

        let options: String = names
            .iter()
            .map(|(id, name)| {
                format!(
                    r#"<option value="{id}"{selected}>{name}</option>"#,
                    id = id,
                    selected = if Some(*id) == selected { " selected" } else { "" },
                    name = escape(name),
                )
            })
            .collect();

        Ok(format!(
            r#"<div id="{id}"><label for="{id}-select">{label}</label><br><select id="{id}-select" name="{name}">{options}</select></div>"#,
            id = self.id,
            label = escape(ctx.model.name()),
            name = self.name,
            options = options,
        ))
    }
}

/// Form controls hosted by a [`Component::FormGroup`]
#[derive(Debug, Clone)]
pub enum Control {
    /// Profile type switch; re-fetches the dropdown on change
    Radio {
        name: &'static str,
        values: Vec<Entity>,
        hx_get: &'static str,
        hx_target: &'static str,
    },
    Dropdown(Dropdown),
}

impl Control {
    async fn render(&self, ctx: &RenderContext<'_>) -> Result<String, ReportError> {
        match self {
            Control::Radio {
                name,
                values,
                hx_get,
                hx_target,
            } => {
                let current = ctx.model.entity();
                let buttons: String = values
                    .iter()
                    .map(|entity| {
                        format!(
                            r#"<label><input type="radio" name="{name}" value="{value}" hx-get="{hx_get}" hx-target="{hx_target}" hx-swap="outerHTML"{checked}> {value}</label> "#,
                            value = entity.label(),
                            checked = if current == Some(*entity) { " checked" } else { "" },
                        )
                    })
                    .collect();
                Ok(format!("<fieldset>{}</fieldset>", buttons))
            }
            Control::Dropdown(dropdown) => dropdown.render(ctx).await,
        }
    }
}

/// Node kinds of the dashboard
#[derive(Debug, Clone)]
pub enum Component {
    /// `<h1>` with the model name, plus the entity's display name
    Header,
    FormGroup {
        id: &'static str,
        action: &'static str,
        method: &'static str,
        children: Vec<Control>,
    },
    /// Cumulative positive/negative events over time
    LineChart,
    /// Classifier risk for the entity
    BarChart,
    /// Notes for the entity
    NotesTable,
}

impl Component {
    pub async fn render(&self, ctx: &RenderContext<'_>) -> Result<String, ReportError> {
        match self {
            Component::Header => render_header(ctx).await,
            Component::FormGroup {
                id,
                action,
                method,
                children,
            } => {
                let mut inner = String::new();
                for child in children {
                    inner.push_str(&child.render(ctx).await?);
                }
                Ok(format!(
                    r#"<form id="{id}" action="{action}" method="{method}">{inner}<button type="submit">Submit</button></form>"#
                ))
            }
            Component::LineChart => render_line_chart(ctx).await,
            Component::BarChart => render_bar_chart(ctx).await,
            Component::NotesTable => render_notes_table(ctx).await,
        }
    }
}

async fn render_header(ctx: &RenderContext<'_>) -> Result<String, ReportError> {
    let mut header = format!("<h1>{}</h1>", escape(ctx.model.name()));
    if let Some(id) = ctx.entity_id {
        if let Some(display_name) = ctx.model.username(id).await? {
            header.push_str(&format!(r#"<p class="subtitle">{}</p>"#, escape(&display_name)));
        }
    }
    Ok(header)
}

async fn render_line_chart(ctx: &RenderContext<'_>) -> Result<String, ReportError> {
    let Some(id) = ctx.entity_id else {
        return Ok(placeholder("line-chart"));
    };

    let cumulative = cumulative_counts(&ctx.model.event_counts(id).await?);
    let dates: Vec<String> = cumulative.iter().map(|c| c.event_date.clone()).collect();
    let series = [
        Series {
            name: "Positive",
            color: POSITIVE_COLOR,
            values: cumulative.iter().map(|c| c.positive).collect(),
        },
        Series {
            name: "Negative",
            color: NEGATIVE_COLOR,
            values: cumulative.iter().map(|c| c.negative).collect(),
        },
    ];

    Ok(format!(
        r#"<div class="chart" id="line-chart">{}</div>"#,
        line_chart_svg("Event Counts", "Date", "Events", &dates, &series)
    ))
}

async fn render_bar_chart(ctx: &RenderContext<'_>) -> Result<String, ReportError> {
    let (Some(id), Some(entity)) = (ctx.entity_id, ctx.model.entity()) else {
        return Ok(placeholder("bar-chart"));
    };

    let data = ctx.model.model_data(id).await?;
    let probabilities = positive_class(ctx.classifier, &data);
    let risk = recruitment_risk(entity, &probabilities);
    debug!(entity = %entity, id = %id, rows = data.len(), ?risk, "Scored recruitment risk");

    Ok(format!(
        r#"<div class="chart" id="bar-chart">{}</div>"#,
        risk_bar_svg("Predicted Recruitment Risk", risk)
    ))
}

async fn render_notes_table(ctx: &RenderContext<'_>) -> Result<String, ReportError> {
    let Some(id) = ctx.entity_id else {
        return Ok(placeholder("notes"));
    };
    let table = ctx.model.notes_table(id).await?;
    Ok(data_table("notes", &table))
}

/// Render a [`Table`] with its column names as the header row
pub fn data_table(id: &str, table: &Table) -> String {
    let header: String = table
        .columns
        .iter()
        .map(|c| format!("<th>{}</th>", escape(c)))
        .collect();
    let rows: String = table
        .rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| {
                    let text = match cell {
                        serde_json::Value::Null => String::new(),
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    format!("<td>{}</td>", escape(&text))
                })
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();

    format!(
        r#"<table class="data-table" id="{}"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>"#,
        escape(id),
        header,
        rows
    )
}

/// Empty container rendered in place of a visualization
fn placeholder(id: &str) -> String {
    format!(r#"<div class="chart" id="{}"></div>"#, escape(id))
}

/// The dashboard: header, filters, charts, notes
#[derive(Debug, Clone)]
pub struct Report {
    pub title: &'static str,
    pub children: Vec<Component>,
}

impl Report {
    pub fn dashboard() -> Self {
        Self {
            title: "Employee Events Report",
            children: vec![
                Component::Header,
                Component::FormGroup {
                    id: "top-filters",
                    action: "/update_data",
                    method: "POST",
                    children: vec![
                        Control::Radio {
                            name: "profile_type",
                            values: Entity::ALL.to_vec(),
                            hx_get: "/update_dropdown",
                            hx_target: "#selector",
                        },
                        Control::Dropdown(Dropdown {
                            id: "selector",
                            name: "user-selection",
                        }),
                    ],
                },
                Component::LineChart,
                Component::BarChart,
                Component::NotesTable,
            ],
        }
    }

    /// The entity selector inside the filter form
    pub fn selector(&self) -> Option<&Dropdown> {
        self.children.iter().find_map(|component| match component {
            Component::FormGroup { children, .. } => children.iter().find_map(|control| match control {
                Control::Dropdown(dropdown) => Some(dropdown),
                _ => None,
            }),
            _ => None,
        })
    }

    /// Render every component, in order, into a full page
    pub async fn render(&self, ctx: &RenderContext<'_>) -> Result<String, ReportError> {
        let mut body = String::new();
        for component in &self.children {
            body.push_str(&component.render(ctx).await?);
            body.push('\n');
        }
        Ok(html::page(self.title, &body))
    }
}
