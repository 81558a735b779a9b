//! Backend-stub generation
//!
//! Emits a Flask-style server skeleton matching the detected parameter
//! schema: a health route plus a generation route that extracts every
//! parameter from the request body with its detected default as fallback.
//! The stub is a textual artifact for the notebook side; it is never
//! executed here.

use serde_json::Value;
use std::fmt::Write as _;

use crate::core::{ModelFamily, Output, Parameter};

/// Generate the backend stub for a finished parameter/output schema
pub fn generate_stub(parameters: &[Parameter], outputs: &[Output], family: ModelFamily) -> String {
    let mut code = String::from(
        r#"# === AUTO-GENERATED API CODE ===
# Add this cell to your notebook and run it last.

from flask import Flask, request, jsonify
from flask_cors import CORS
from pyngrok import ngrok
import base64
import io

app = Flask(__name__)
CORS(app)

@app.route('/health', methods=['GET'])
def health():
    return jsonify({'status': 'online'})

@app.route('/generate', methods=['POST'])
def generate():
    try:
        data = request.json

        # Extract parameters
"#,
    );

    for param in parameters {
        let default = python_literal(&param.effective_default());
        let _ = writeln!(
            code,
            "        {} = data.get('{}', {})",
            param.name, param.name, default
        );
    }

    let _ = writeln!(code, "\n        # === INSERT YOUR {} GENERATION LOGIC HERE ===", family.badge().to_uppercase());
    let _ = writeln!(code, "        # result_image = your_model.generate(...)");
    for output in outputs {
        let _ = writeln!(
            code,
            "        # expected output: {} ({})",
            output.name,
            output.kind.display_name()
        );
    }

    code.push_str(
        r#"
        # Encode the result image as base64
        buffer = io.BytesIO()
        result_image.save(buffer, format='PNG')
        image_base64 = base64.b64encode(buffer.getvalue()).decode('utf-8')

        return jsonify({
            'success': True,
            'image': image_base64
        })

    except Exception as e:
        return jsonify({'success': False, 'error': str(e)}), 500

# Start the server behind an ngrok tunnel
public_url = ngrok.connect(5000)
print(f"API URL: {public_url}")
app.run(port=5000)
"#,
    );

    code
}

/// Append the stub as a new code cell to a notebook JSON value
pub fn inject_stub(mut notebook: Value, stub: &str) -> Value {
    let cell = serde_json::json!({
        "cell_type": "code",
        "execution_count": null,
        "metadata": {},
        "outputs": [],
        "source": stub.split('\n').map(|l| format!("{l}\n")).collect::<Vec<_>>(),
    });

    if let Some(cells) = notebook.get_mut("cells").and_then(Value::as_array_mut) {
        cells.push(cell);
    }

    notebook
}

/// Render a JSON default as the equivalent Python literal
fn python_literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'")),
        other => format!("'{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{OutputKind, ParameterKind};
    use serde_json::json;

    fn sample_params() -> Vec<Parameter> {
        vec![
            Parameter::new("prompt", ParameterKind::MultilineText)
                .with_default(json!("a sunset")),
            Parameter::new("width", ParameterKind::Range).with_default(json!(512)),
            Parameter::new("tile", ParameterKind::Boolean).with_default(json!(true)),
        ]
    }

    #[test]
    fn stub_extracts_each_parameter_with_default() {
        let outputs = vec![Output::default_image()];
        let stub = generate_stub(&sample_params(), &outputs, ModelFamily::Sdxl);
        assert!(stub.contains("prompt = data.get('prompt', 'a sunset')"));
        assert!(stub.contains("width = data.get('width', 512)"));
        assert!(stub.contains("tile = data.get('tile', True)"));
        assert!(stub.contains("@app.route('/health', methods=['GET'])"));
        assert!(stub.contains("'success': True"));
        assert!(stub.contains("SDXL GENERATION LOGIC"));
    }

    #[test]
    fn missing_default_falls_back_by_kind() {
        let params = vec![Parameter::new("seed", ParameterKind::Number)];
        let stub = generate_stub(&params, &[Output::default_image()], ModelFamily::Unknown);
        assert!(stub.contains("seed = data.get('seed', 0)"));
    }

    #[test]
    fn python_literal_escapes_quotes() {
        assert_eq!(python_literal(&json!("it's")), "'it\\'s'");
        assert_eq!(python_literal(&json!(null)), "None");
        assert_eq!(python_literal(&json!(7.5)), "7.5");
    }

    #[test]
    fn inject_appends_a_code_cell() {
        let notebook = json!({"cells": [{"cell_type": "code", "source": "x = 1"}]});
        let out = inject_stub(notebook, "a\nb");
        let cells = out["cells"].as_array().unwrap();
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[1]["cell_type"], "code");
        assert_eq!(cells[1]["source"][0], "a\n");
    }

    #[test]
    fn outputs_are_documented_in_stub() {
        let outputs = vec![Output::new("generated_audio", OutputKind::Audio, "")];
        let stub = generate_stub(&[], &outputs, ModelFamily::Unknown);
        assert!(stub.contains("# expected output: generated_audio (audio)"));
    }
}
