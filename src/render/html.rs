//! Standalone HTML page generation for webview hosts
//!
//! Produces a self-contained page: header, backend-connection section, the
//! grouped parameter form, action buttons, loading and result sections, and
//! the interaction script. The script exposes `submit()`, `loadFile()` and
//! `saveFile()` entry points that the host wires to its call bridge, and
//! embeds the collection-mapping JS so submitted values match the generated
//! backend stub's expectations.

use std::fmt::Write as _;

use super::collect::collection_mapping;
use super::layout::{group_fields, FieldGroup, GroupLayout};
use crate::core::{Analysis, Parameter, ParameterKind};

/// Generate the complete HTML page for one analysis
pub fn generate_page(analysis: &Analysis) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{css}
    </style>
</head>
<body>
    <div class="container">
        <header class="header">
            <h1>{title}</h1>
            {description}
            <div class="model-badge">{badge}</div>
        </header>

        <section class="section">
            <h2>Backend Connection</h2>
            <div class="connection-row">
                <input type="text" id="backend-url" class="input-field"
                    placeholder="https://xxxx.ngrok-free.app">
                <button onclick="checkBackend()" class="btn btn-secondary">Connect</button>
            </div>
            <div id="connection-status"></div>
        </section>

        <section class="section">
            <h2>Settings</h2>
            <form id="params-form">
{fields}
            </form>
        </section>

        <section class="section button-section">
            <button onclick="submit()" class="btn btn-primary" id="submit-btn">Generate</button>
            <button onclick="loadFile()" class="btn btn-secondary">Load</button>
            <button onclick="saveFile()" class="btn btn-secondary">Save</button>
        </section>

        <div id="loading" class="loading hidden">
            <div class="spinner"></div>
            <p>Generating...</p>
        </div>

        <section class="section">
            <h2>Result</h2>
            <div id="result-container" class="result-container">
                <p class="placeholder">The generated result appears here</p>
            </div>
            <div id="result-status"></div>
        </section>
    </div>

    <script>
{script}
    </script>
</body>
</html>"#,
        title = escape(&analysis.title),
        description = if analysis.description.is_empty() {
            String::new()
        } else {
            format!(
                "<p class=\"description\">{}</p>",
                escape(&analysis.description)
            )
        },
        badge = analysis.model_family.badge(),
        css = base_css(),
        fields = render_fields(&group_fields(&analysis.parameters)),
        script = interaction_script(analysis),
    )
}

fn render_fields(groups: &[FieldGroup]) -> String {
    let mut out = String::new();
    for group in groups {
        match group.layout {
            GroupLayout::FullWidth => {
                for field in &group.fields {
                    out.push_str(&render_field(field));
                }
            }
            GroupLayout::TwoColumn | GroupLayout::ThreeColumn => {
                let class = if group.layout == GroupLayout::TwoColumn {
                    "grid-2"
                } else {
                    "grid-3"
                };
                let _ = writeln!(out, "<div class=\"{class}\">");
                for field in &group.fields {
                    out.push_str(&render_field(field));
                }
                out.push_str("</div>\n");
            }
        }
    }
    out
}

fn render_field(param: &Parameter) -> String {
    match param.kind {
        ParameterKind::Text => text_field(param, false),
        ParameterKind::MultilineText => text_field(param, true),
        ParameterKind::Range => slider_field(param),
        ParameterKind::Number => number_field(param),
        ParameterKind::Boolean => checkbox_field(param),
        ParameterKind::Choice => dropdown_field(param),
        ParameterKind::Image => image_field(param),
        ParameterKind::File => file_field(param),
    }
}

fn text_field(param: &Parameter, multiline: bool) -> String {
    let (required_mark, required_attr) = if param.required {
        (" <span class=\"required\">*</span>", " required")
    } else {
        ("", "")
    };
    let placeholder = if param.description.is_empty() {
        format!("Enter {}...", param.label.to_lowercase())
    } else {
        param.description.clone()
    };
    let default = param
        .default
        .as_ref()
        .and_then(|v| v.as_str())
        .unwrap_or("");

    if multiline {
        format!(
            r#"<div class="form-group">
    <label for="{name}">{label}{required_mark}</label>
    <textarea id="{name}" name="{name}" placeholder="{placeholder}"{required_attr}>{default}</textarea>
</div>
"#,
            name = param.name,
            label = escape(&param.label),
            placeholder = escape(&placeholder),
            default = escape(default),
        )
    } else {
        format!(
            r#"<div class="form-group">
    <label for="{name}">{label}{required_mark}</label>
    <input type="text" id="{name}" name="{name}" class="input-field" value="{default}" placeholder="{placeholder}"{required_attr}>
</div>
"#,
            name = param.name,
            label = escape(&param.label),
            placeholder = escape(&placeholder),
            default = escape(default),
        )
    }
}

fn slider_field(param: &Parameter) -> String {
    let min = param.min.unwrap_or(0.0);
    let max = param.max.unwrap_or(100.0);
    let step = param.step.unwrap_or(1.0);
    let default = param
        .default
        .as_ref()
        .and_then(|v| v.as_f64())
        .unwrap_or(min);

    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <div class="slider-container">
        <input type="range" id="{name}" name="{name}" min="{min}" max="{max}" step="{step}" value="{default}"
            oninput="document.getElementById('{name}_value').textContent = this.value">
        <span id="{name}_value" class="slider-value">{default}</span>
    </div>
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn number_field(param: &Parameter) -> String {
    let default = param
        .default
        .as_ref()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <input type="number" id="{name}" name="{name}" class="input-field" value="{default}">
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn checkbox_field(param: &Parameter) -> String {
    let checked = if param.default.as_ref().and_then(|v| v.as_bool()) == Some(true) {
        " checked"
    } else {
        ""
    };
    format!(
        r#"<div class="form-group">
    <label class="checkbox-label">
        <input type="checkbox" id="{name}" name="{name}"{checked}>
        <span>{label}</span>
    </label>
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn dropdown_field(param: &Parameter) -> String {
    let default = param.default.as_ref().and_then(|v| v.as_str());
    let options: String = param
        .choices
        .iter()
        .map(|opt| {
            let selected = if default == Some(opt.as_str()) {
                " selected"
            } else {
                ""
            };
            format!(
                "        <option value=\"{0}\"{selected}>{0}</option>\n",
                escape(opt)
            )
        })
        .collect();
    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <select id="{name}" name="{name}" class="input-field">
{options}    </select>
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn image_field(param: &Parameter) -> String {
    format!(
        r#"<div class="form-group">
    <label>{label}</label>
    <div class="image-upload" onclick="document.getElementById('{name}_input').click()">
        <p>Click to upload an image</p>
        <input type="file" id="{name}_input" accept="image/*"
            onchange="previewImage(this, '{name}_preview')">
        <img id="{name}_preview" style="display:none;">
    </div>
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn file_field(param: &Parameter) -> String {
    format!(
        r#"<div class="form-group">
    <label for="{name}">{label}</label>
    <input type="file" id="{name}" name="{name}" class="input-field">
</div>
"#,
        name = param.name,
        label = escape(&param.label),
    )
}

fn interaction_script(analysis: &Analysis) -> String {
    let collection_lines: String = collection_mapping(&analysis.parameters)
        .iter()
        .map(|entry| format!("            {}\n", entry.rule.js_line(&entry.name)))
        .collect();

    format!(
        r#"        let lastResultData = null;
        let isGenerating = false;

        async function checkBackend() {{
            const url = document.getElementById('backend-url').value.trim().replace(/\/$/, '');
            if (!url) {{
                showStatus('connection-status', 'Please enter a URL', 'error');
                return;
            }}
            showStatus('connection-status', 'Connecting...', 'loading');
            try {{
                await bridge.set_backend_url(url);
                const check = await bridge.check_health();
                showStatus('connection-status', check.message, check.success ? 'success' : 'error');
            }} catch (error) {{
                showStatus('connection-status', 'Error: ' + error, 'error');
            }}
        }}

        async function submit() {{
            if (isGenerating) return;

            const params = {{}};
{collection_lines}
            isGenerating = true;
            document.getElementById('submit-btn').disabled = true;
            document.getElementById('loading').classList.remove('hidden');
            document.getElementById('result-container').innerHTML = '';

            try {{
                const result = await bridge.generate(params);
                if (result.success) {{
                    lastResultData = result.image;
                    document.getElementById('result-container').innerHTML =
                        '<img src="data:image/png;base64,' + result.image + '" alt="Result">';
                    showStatus('result-status', result.message || 'Done', 'success');
                }} else {{
                    showStatus('result-status', result.message, 'error');
                }}
            }} catch (error) {{
                showStatus('result-status', 'Error: ' + error, 'error');
            }} finally {{
                isGenerating = false;
                document.getElementById('submit-btn').disabled = false;
                document.getElementById('loading').classList.add('hidden');
            }}
        }}

        async function loadFile() {{
            try {{
                const result = await bridge.load_file();
                if (result.success) {{
                    lastResultData = result.image;
                    document.getElementById('result-container').innerHTML =
                        '<img src="data:image/png;base64,' + result.image + '" alt="Loaded">';
                    showStatus('result-status', 'Loaded: ' + result.filename, 'success');
                }}
            }} catch (error) {{
                showStatus('result-status', 'Error: ' + error, 'error');
            }}
        }}

        async function saveFile() {{
            if (!lastResultData) {{
                showStatus('result-status', 'Nothing to save yet', 'error');
                return;
            }}
            try {{
                const result = await bridge.save_file();
                showStatus('result-status', result.message, result.success ? 'success' : 'error');
            }} catch (error) {{
                showStatus('result-status', 'Error: ' + error, 'error');
            }}
        }}

        function previewImage(input, previewId) {{
            const preview = document.getElementById(previewId);
            if (input.files && input.files[0]) {{
                const reader = new FileReader();
                reader.onload = (e) => {{
                    preview.src = e.target.result;
                    preview.style.display = 'block';
                }};
                reader.readAsDataURL(input.files[0]);
            }}
        }}

        async function encodeImageBase64(inputId) {{
            const input = document.getElementById(inputId);
            if (!input || !input.files || !input.files[0]) return null;
            return new Promise((resolve) => {{
                const reader = new FileReader();
                reader.onload = (e) => resolve(e.target.result.split(',')[1]);
                reader.readAsDataURL(input.files[0]);
            }});
        }}

        function showStatus(elementId, message, type) {{
            const el = document.getElementById(elementId);
            el.innerHTML = message
                ? '<div class="status ' + type + '">' + message + '</div>'
                : '';
        }}

        document.addEventListener('keydown', (e) => {{
            if (e.ctrlKey && e.key === 'Enter') {{
                e.preventDefault();
                submit();
            }}
            if (e.ctrlKey && e.key === 's') {{
                e.preventDefault();
                saveFile();
            }}
        }});"#
    )
}

fn base_css() -> &'static str {
    r#"        :root {
            --bg-primary: #1a1a2e;
            --bg-secondary: #16213e;
            --text-primary: #ffffff;
            --text-secondary: #e0e0e0;
            --accent: #00d4ff;
            --border: #444444;
            --error: #ff5a5a;
            --success: #3ddc84;
        }
        * { box-sizing: border-box; margin: 0; }
        body {
            background: var(--bg-primary);
            color: var(--text-primary);
            font-family: system-ui, sans-serif;
            padding: 20px;
        }
        .container { max-width: 760px; margin: 0 auto; }
        .header { text-align: center; margin-bottom: 25px; }
        .header h1 { color: var(--accent); margin-bottom: 10px; }
        .description { color: var(--text-secondary); margin-bottom: 15px; }
        .model-badge {
            display: inline-block;
            background: var(--accent);
            color: #000;
            padding: 4px 12px;
            border-radius: 20px;
            font-size: 0.85em;
            font-weight: 600;
        }
        .section {
            background: var(--bg-secondary);
            border-radius: 10px;
            padding: 20px;
            margin-bottom: 20px;
        }
        .section h2 { font-size: 1.1em; margin-bottom: 12px; }
        .connection-row { display: flex; gap: 10px; }
        .connection-row .input-field { flex: 1; }
        .form-group { margin-bottom: 16px; }
        .form-group label { display: block; margin-bottom: 6px; color: var(--text-secondary); }
        .required { color: var(--error); }
        .input-field, textarea, select {
            width: 100%;
            padding: 10px;
            border: 1px solid var(--border);
            border-radius: 6px;
            background: rgba(0, 0, 0, 0.3);
            color: var(--text-primary);
        }
        textarea { min-height: 70px; resize: vertical; }
        .grid-2 { display: grid; grid-template-columns: 1fr 1fr; gap: 12px; }
        .grid-3 { display: grid; grid-template-columns: 1fr 1fr 1fr; gap: 12px; }
        .slider-container { display: flex; align-items: center; gap: 10px; }
        .slider-container input[type="range"] { flex: 1; }
        .slider-value { min-width: 3em; text-align: right; }
        .checkbox-label { display: flex; align-items: center; gap: 8px; }
        .image-upload {
            border: 2px dashed var(--border);
            border-radius: 10px;
            padding: 25px;
            text-align: center;
            cursor: pointer;
        }
        .image-upload input[type="file"] { display: none; }
        .image-upload img { max-width: 100%; max-height: 150px; margin-top: 12px; }
        .button-section { display: flex; gap: 12px; }
        .btn {
            padding: 12px 24px;
            border: none;
            border-radius: 6px;
            cursor: pointer;
            font-size: 14px;
        }
        .btn-primary { background: var(--accent); color: #000; flex: 1; }
        .btn-secondary { background: var(--border); color: var(--text-primary); }
        .btn:disabled { opacity: 0.5; cursor: default; }
        .loading { text-align: center; padding: 20px; }
        .hidden { display: none; }
        .spinner {
            width: 32px;
            height: 32px;
            margin: 0 auto 10px;
            border: 3px solid var(--border);
            border-top-color: var(--accent);
            border-radius: 50%;
            animation: spin 0.8s linear infinite;
        }
        @keyframes spin { to { transform: rotate(360deg); } }
        .result-container { text-align: center; min-height: 120px; }
        .result-container img { max-width: 100%; border-radius: 8px; }
        .placeholder { color: var(--text-secondary); padding: 40px 0; }
        .status { margin-top: 10px; padding: 8px 12px; border-radius: 6px; }
        .status.success { color: var(--success); }
        .status.error { color: var(--error); }
        .status.loading { color: var(--text-secondary); }"#
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
