//! Inline SVG charts
//!
//! Charts are rendered server-side as SVG markup embedded in the page, so
//! the browser needs no plotting library.

use chrono::NaiveDate;

use super::html::escape;

const LINE_WIDTH: f64 = 640.0;
const LINE_HEIGHT: f64 = 360.0;
const MARGIN_LEFT: f64 = 60.0;
const MARGIN_RIGHT: f64 = 110.0;
const MARGIN_TOP: f64 = 40.0;
const MARGIN_BOTTOM: f64 = 60.0;

const BAR_WIDTH: f64 = 640.0;
const BAR_HEIGHT: f64 = 170.0;
const BAR_MARGIN_X: f64 = 40.0;
const BAR_MARGIN_TOP: f64 = 55.0;
const BAR_THICKNESS: f64 = 50.0;

/// One plotted line
#[derive(Debug, Clone)]
pub struct Series<'a> {
    pub name: &'a str,
    pub color: &'a str,
    pub values: Vec<i64>,
}

/// Line chart over dated points; every series has one value per date
pub fn line_chart_svg(
    title: &str,
    x_label: &str,
    y_label: &str,
    dates: &[String],
    series: &[Series<'_>],
) -> String {
    let plot_w = LINE_WIDTH - MARGIN_LEFT - MARGIN_RIGHT;
    let plot_h = LINE_HEIGHT - MARGIN_TOP - MARGIN_BOTTOM;
    let bottom = MARGIN_TOP + plot_h;

    let xs = x_positions(dates, plot_w);
    let y_max = series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let y_of = |v: i64| bottom - (v as f64 / y_max) * plot_h;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{title}">"#,
        w = LINE_WIDTH,
        h = LINE_HEIGHT,
        title = escape(title),
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="24" text-anchor="middle" font-size="16">{}</text>"#,
        MARGIN_LEFT + plot_w / 2.0,
        escape(title)
    ));

    // Axes
    svg.push_str(&format!(
        r##"<line x1="{l}" y1="{t}" x2="{l}" y2="{b}" stroke="#333"/><line x1="{l}" y1="{b}" x2="{r}" y2="{b}" stroke="#333"/>"##,
        l = MARGIN_LEFT,
        t = MARGIN_TOP,
        b = bottom,
        r = MARGIN_LEFT + plot_w,
    ));

    // Y ticks: 0, half, max
    for tick in [0.0, y_max / 2.0, y_max] {
        let y = bottom - (tick / y_max) * plot_h;
        svg.push_str(&format!(
            r##"<line x1="{x1}" y1="{y:.1}" x2="{l}" y2="{y:.1}" stroke="#333"/><text x="{tx}" y="{ty:.1}" text-anchor="end" font-size="11">{label}</text>"##,
            x1 = MARGIN_LEFT - 4.0,
            l = MARGIN_LEFT,
            tx = MARGIN_LEFT - 7.0,
            ty = y + 4.0,
            label = format_tick(tick),
        ));
    }

    // X ticks: first and last date
    let mut ticked: Vec<usize> = Vec::new();
    if !dates.is_empty() {
        ticked.push(0);
        if dates.len() > 1 {
            ticked.push(dates.len() - 1);
        }
    }
    for i in ticked {
        svg.push_str(&format!(
            r#"<text x="{x:.1}" y="{y}" text-anchor="middle" font-size="11">{label}</text>"#,
            x = MARGIN_LEFT + xs[i],
            y = bottom + 16.0,
            label = escape(&dates[i]),
        ));
    }

    // Axis labels
    svg.push_str(&format!(
        r#"<text x="{x}" y="{y}" text-anchor="middle" font-size="13">{label}</text>"#,
        x = MARGIN_LEFT + plot_w / 2.0,
        y = LINE_HEIGHT - 18.0,
        label = escape(x_label),
    ));
    svg.push_str(&format!(
        r#"<text x="16" y="{y}" text-anchor="middle" font-size="13" transform="rotate(-90 16 {y})">{label}</text>"#,
        y = MARGIN_TOP + plot_h / 2.0,
        label = escape(y_label),
    ));

    for (index, s) in series.iter().enumerate() {
        let points: Vec<String> = s
            .values
            .iter()
            .zip(&xs)
            .map(|(&v, &x)| format!("{:.1},{:.1}", MARGIN_LEFT + x, y_of(v)))
            .collect();
        if !points.is_empty() {
            svg.push_str(&format!(
                r#"<polyline fill="none" stroke="{color}" stroke-width="2" points="{points}"><title>{name}</title></polyline>"#,
                color = s.color,
                points = points.join(" "),
                name = escape(s.name),
            ));
        }

        // Legend
        let ly = MARGIN_TOP + 10.0 + index as f64 * 20.0;
        let lx = MARGIN_LEFT + plot_w + 14.0;
        svg.push_str(&format!(
            r#"<line x1="{lx}" y1="{ly}" x2="{lx2}" y2="{ly}" stroke="{color}" stroke-width="2"/><text x="{tx}" y="{ty}" font-size="12">{name}</text>"#,
            lx = lx,
            lx2 = lx + 20.0,
            ly = ly,
            color = s.color,
            tx = lx + 26.0,
            ty = ly + 4.0,
            name = escape(s.name),
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Horizontal bar on a fixed [0, 1] axis; `None` draws the empty axis
pub fn risk_bar_svg(title: &str, value: Option<f64>) -> String {
    let plot_w = BAR_WIDTH - 2.0 * BAR_MARGIN_X;
    let bar_y = BAR_MARGIN_TOP;
    let axis_y = bar_y + BAR_THICKNESS;

    let mut svg = format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{title}">"#,
        w = BAR_WIDTH,
        h = BAR_HEIGHT,
        title = escape(title),
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="32" text-anchor="middle" font-size="20">{}</text>"#,
        BAR_WIDTH / 2.0,
        escape(title)
    ));

    if let Some(value) = value {
        let clamped = value.clamp(0.0, 1.0);
        svg.push_str(&format!(
            r##"<rect x="{x}" y="{y}" width="{width:.1}" height="{height}" fill="#1f77b4" data-value="{value:.4}"><title>{label}</title></rect>"##,
            x = BAR_MARGIN_X,
            y = bar_y,
            width = clamped * plot_w,
            height = BAR_THICKNESS,
            value = clamped,
            label = format!("{:.1}%", clamped * 100.0),
        ));
    }

    svg.push_str(&format!(
        r##"<line x1="{l}" y1="{y}" x2="{r}" y2="{y}" stroke="#333"/>"##,
        l = BAR_MARGIN_X,
        r = BAR_MARGIN_X + plot_w,
        y = axis_y,
    ));
    for step in 0..=5 {
        let tick = step as f64 * 0.2;
        let x = BAR_MARGIN_X + tick * plot_w;
        svg.push_str(&format!(
            r##"<line x1="{x:.1}" y1="{y1}" x2="{x:.1}" y2="{y2}" stroke="#333"/><text x="{x:.1}" y="{ty}" text-anchor="middle" font-size="11">{tick:.1}</text>"##,
            y1 = axis_y,
            y2 = axis_y + 4.0,
            ty = axis_y + 18.0,
        ));
    }

    svg.push_str("</svg>");
    svg
}

/// Horizontal offsets within the plot area
///
/// Dates that all parse as `YYYY-MM-DD` are spaced by calendar distance;
/// otherwise points are spaced evenly.
fn x_positions(dates: &[String], plot_w: f64) -> Vec<f64> {
    match dates.len() {
        0 => return Vec::new(),
        1 => return vec![plot_w / 2.0],
        _ => {}
    }

    let parsed: Option<Vec<NaiveDate>> = dates
        .iter()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
        .collect();

    if let Some(parsed) = parsed {
        let first = parsed[0];
        let span = (parsed[parsed.len() - 1] - first).num_days();
        if span > 0 {
            return parsed
                .iter()
                .map(|d| (*d - first).num_days() as f64 / span as f64 * plot_w)
                .collect();
        }
    }

    let last = (dates.len() - 1) as f64;
    (0..dates.len()).map(|i| i as f64 / last * plot_w).collect()
}

fn format_tick(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.1}", value)
    }
}
