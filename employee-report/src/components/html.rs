//! HTML helpers and the page shell

/// Escape HTML special characters
pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Wrap rendered components in a full document
pub fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <script src="https://unpkg.com/htmx.org@1.9.12"></script>
    <style>{css}</style>
</head>
<body>
<main class="container">
{body}
</main>
</body>
</html>"#,
        title = escape(title),
        css = inline_css(),
        body = body,
    )
}

fn inline_css() -> &'static str {
    r#"
        * { box-sizing: border-box; }
        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #fafafa;
            color: #222;
            line-height: 1.5;
            margin: 0;
        }
        .container { max-width: 960px; margin: 0 auto; padding: 20px; }
        h1 { color: #1f4e79; margin-bottom: 0; text-transform: capitalize; }
        .subtitle { color: #666; margin-top: 4px; }
        form#top-filters {
            display: flex;
            gap: 24px;
            align-items: flex-end;
            padding: 12px 0;
            border-bottom: 1px solid #ddd;
        }
        fieldset { border: none; padding: 0; margin: 0; }
        select { min-width: 220px; padding: 4px; }
        button { padding: 6px 16px; }
        .chart { margin: 20px 0; }
        .chart svg { background: #fff; border: 1px solid #e0e0e0; }
        table.data-table { border-collapse: collapse; width: 100%; margin: 20px 0; }
        table.data-table th, table.data-table td {
            border: 1px solid #ddd;
            padding: 6px 10px;
            text-align: left;
        }
        table.data-table th { background: #f0f0f0; }
        .error { color: #a11; }
    "#
}
