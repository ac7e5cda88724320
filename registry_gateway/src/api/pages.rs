//! Server-rendered HTML for the index, upload and dashboard pages

use crate::dashboard::{DashboardState, EmptyReason};
use crate::explorer::ExplorerLink;
use crate::submission;
use crate::upload::DEFAULT_PROJECT_TYPE;

const STYLE: &str = r#"
    body { font-family: Arial, sans-serif; margin: 0; background: #f3f4f6; color: #1f2937; }
    .container { max-width: 960px; margin: 0 auto; padding: 32px; }
    .card { background: white; padding: 24px; border-radius: 8px; box-shadow: 0 2px 10px rgba(0,0,0,0.1); }
    .narrow { max-width: 448px; margin: 48px auto; }
    label { display: block; font-weight: 600; margin-bottom: 8px; }
    input { width: 100%; box-sizing: border-box; padding: 8px 12px; border: 1px solid #d1d5db; border-radius: 8px; margin-bottom: 16px; }
    button { width: 100%; background: #2563eb; color: white; font-weight: bold; padding: 12px; border: 0; border-radius: 8px; cursor: pointer; }
    button:hover { background: #1d4ed8; }
    .status { margin-top: 16px; text-align: center; font-size: 14px; color: #4b5563; }
    .kpis { display: grid; grid-template-columns: repeat(auto-fit, minmax(200px, 1fr)); gap: 24px; margin-bottom: 32px; }
    .kpi-value { font-size: 36px; font-weight: bold; margin: 8px 0 0; }
    .kpi-blue { color: #2563eb; }
    .kpi-green { color: #16a34a; }
    ul { list-style: none; padding: 0; margin: 0; }
    li { border-bottom: 1px solid #e5e7eb; padding: 12px 0; }
    .project-name { font-weight: bold; font-size: 18px; margin: 0; }
    .project-meta { font-size: 14px; color: #6b7280; margin: 4px 0 0; }
    .notice { color: #6b7280; font-size: 14px; }
"#;

const UPLOAD_SCRIPT: &str = r#"
    const form = document.getElementById('project-form');
    const statusBox = document.getElementById('status');
    const explorerTemplate = __EXPLORER_TEMPLATE__;

    function explorerLink(hash) {
        return explorerTemplate.includes('{hash}')
            ? explorerTemplate.replace('{hash}', hash)
            : explorerTemplate + hash;
    }

    function showStatus(text, link) {
        statusBox.textContent = text;
        if (link) {
            const anchor = document.createElement('a');
            anchor.href = link;
            anchor.target = '_blank';
            anchor.rel = 'noopener noreferrer';
            anchor.textContent = 'View transaction';
            statusBox.append(' ', anchor);
        }
    }

    form.addEventListener('submit', async (event) => {
        event.preventDefault();
        showStatus('Submitting to the blockchain... Please wait.');

        try {
            const response = await fetch('__SUBMIT_PATH__', {
                method: 'POST',
                body: new FormData(form),
            });
            const result = await response.json();

            if (result.status === 'success') {
                showStatus('Success!', explorerLink(result.transactionHash));
            } else {
                showStatus('Error: ' + result.message);
            }
        } catch (error) {
            showStatus('Submission failed: ' + error.message);
        }
    });
"#;

/// (name, label, input type, default value)
const UPLOAD_INPUTS: [(&str, &str, &str, &str); 6] = [
    (submission::PROJECT_NAME, "Project Name", "text", ""),
    (submission::LOCATION, "Location (State)", "text", ""),
    (submission::IMPLEMENTING_BODY, "Implementing Body", "text", ""),
    (submission::AREA_HECTARES, "Area (Hectares)", "number", ""),
    (submission::START_DATE, "Start Date", "date", ""),
    (submission::PROJECT_TYPE, "Project Type", "text", DEFAULT_PROJECT_TYPE),
];

/// Escape text for HTML element content and quoted attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// JSON string literal safe to embed inside a `<script>` block
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace('<', "\\u003c")
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>{title}</title>
    <style>{style}</style>
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        style = STYLE,
        body = body,
    )
}

pub fn render_index() -> String {
    layout(
        "AquaCred",
        r#"<div class="container">
    <div class="card narrow">
        <h1>AquaCred</h1>
        <p>Blue carbon project registry.</p>
        <ul>
            <li><a href="/upload">Register a new project</a></li>
            <li><a href="/dashboard">View the project dashboard</a></li>
        </ul>
    </div>
</div>"#,
    )
}

pub fn render_upload_page(explorer: &ExplorerLink, submit_path: &str) -> String {
    let inputs: String = UPLOAD_INPUTS
        .iter()
        .map(|(name, label, kind, default)| {
            let value = if default.is_empty() {
                String::new()
            } else {
                format!(r#" value="{}""#, escape_html(default))
            };
            format!(
                r#"            <div>
                <label for="{name}">{label}</label>
                <input type="{kind}" id="{name}" name="{name}"{value} required>
            </div>
"#,
                name = name,
                label = escape_html(label),
                kind = kind,
                value = value,
            )
        })
        .collect();

    let script = UPLOAD_SCRIPT
        .replace("__EXPLORER_TEMPLATE__", &js_string(explorer.template()))
        .replace("__SUBMIT_PATH__", submit_path);

    layout(
        "Register New Project",
        &format!(
            r#"<div class="container">
    <div class="card narrow">
        <h1>Register New Project</h1>
        <form id="project-form">
{inputs}            <button type="submit">Submit to Ledger</button>
        </form>
        <div id="status" class="status"></div>
    </div>
</div>
<script>{script}</script>"#,
            inputs = inputs,
            script = script,
        ),
    )
}

pub fn render_dashboard(state: &DashboardState) -> String {
    let view = state.view();

    let notice = match state {
        DashboardState::Empty(EmptyReason::NoProvider) => {
            r#"<p class="notice">No blockchain provider is configured.</p>"#
        }
        DashboardState::Empty(EmptyReason::FetchFailed) => {
            r#"<p class="notice">Project data could not be loaded from the blockchain.</p>"#
        }
        DashboardState::Loaded(_) => "",
    };

    let items: String = view
        .projects
        .iter()
        .map(|project| {
            format!(
                r#"            <li>
                <p class="project-name">{name}</p>
                <p class="project-meta">{location} - {hectares} Hectares</p>
            </li>
"#,
                name = escape_html(&project.name),
                location = escape_html(&project.location),
                hectares = project.hectares,
            )
        })
        .collect();

    layout(
        "AquaCred Dashboard",
        &format!(
            r#"<div class="container">
    <h1>AquaCred Dashboard</h1>
    <p>Your Blue Carbon, Verified.</p>
    {notice}
    <div class="kpis">
        <div class="card">
            <h3>Total Projects Registered</h3>
            <p class="kpi-value kpi-blue" id="total-projects">{total_projects}</p>
        </div>
        <div class="card">
            <h3>Total Hectares</h3>
            <p class="kpi-value kpi-green" id="total-hectares">{total_hectares}</p>
        </div>
    </div>
    <div class="card">
        <h2>Project Registry</h2>
        <ul id="project-list">
{items}        </ul>
    </div>
</div>"#,
            notice = notice,
            total_projects = view.total_projects,
            total_hectares = view.total_hectares,
            items = items,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::{DashboardView, ProjectSummary};

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_js_string_cannot_close_script() {
        assert_eq!(js_string("</script>"), r#""\u003c/script>""#);
    }

    #[test]
    fn test_upload_inputs_are_all_required() {
        let html = render_upload_page(&ExplorerLink::default(), "/api/submit-project");
        for name in submission::FORM_FIELDS {
            let tag_start = html
                .find(&format!(r#"name="{}""#, name))
                .unwrap_or_else(|| panic!("input {} missing", name));
            let tag_end = tag_start + html[tag_start..].find('>').unwrap();
            assert!(
                html[tag_start..tag_end].contains("required"),
                "input {} is not required",
                name
            );
        }
        assert!(html.contains(r#"value="Mangrove Afforestation""#));
        assert!(html.contains(r#"type="number" id="areaHectares""#));
        assert!(html.contains(r#"type="date" id="startDate""#));
        assert!(html.contains("https://sepolia.etherscan.io/tx/{hash}"));
        assert!(!html.contains("__SUBMIT_PATH__"));
    }

    #[test]
    fn test_upload_link_text_follows_configured_explorer() {
        let explorer = ExplorerLink::new("https://blockscout.example/tx/{hash}");
        let html = render_upload_page(&explorer, "/api/submit-project");
        assert!(html.contains("https://blockscout.example/tx/{hash}"));
        assert!(html.contains("'View transaction'"));
        assert!(!html.contains("Etherscan"));
    }

    #[test]
    fn test_dashboard_escapes_project_text() {
        let state = DashboardState::Loaded(DashboardView::new(vec![ProjectSummary {
            id: 1,
            name: "<script>alert(1)</script>".to_string(),
            location: "Kerala".to_string(),
            hectares: 12,
        }]));
        let html = render_dashboard(&state);
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("Kerala - 12 Hectares"));
        assert!(html.contains(r#"id="total-hectares">12<"#));
    }

    #[test]
    fn test_empty_dashboard_renders_zero_kpis() {
        let html = render_dashboard(&DashboardState::Empty(EmptyReason::NoProvider));
        assert!(html.contains(r#"id="total-projects">0<"#));
        assert!(html.contains(r#"id="total-hectares">0<"#));
        assert!(html.contains("No blockchain provider is configured."));
        assert!(!html.contains("<li>"));
    }
}
