//! Notebook analysis engine
//!
//! Two passes over an ordered cell list: a metadata pass over markdown cells
//! (title, description) and a code pass over the concatenated code blob
//! (parameters, outputs, packages, framework flags, model family), followed
//! by backend-stub generation. No step fails: a detection family that
//! matches nothing contributes nothing, and fallbacks guarantee a usable
//! schema even for an empty notebook.

pub mod model;
pub mod outputs;
pub mod packages;
pub mod patterns;
pub mod standard;
pub mod widgets;

use log::debug;
use std::collections::HashSet;

use crate::codegen;
use crate::core::{title_case, Analysis, Parameter};
use crate::io::notebook::{Cell, CellKind};

pub use model::classify_model_family;
pub use outputs::detect_outputs;
pub use packages::detect_packages;
pub use standard::{default_parameters, detect_standard_parameters};
pub use widgets::{detect_gradio_parameters, detect_widget_parameters, sanitize_name};

/// Analyze a notebook's cells into a typed parameter/output schema.
///
/// `source_name` seeds the title when no markdown heading is present.
pub fn analyze(cells: &[Cell], source_name: &str) -> Analysis {
    let code = code_blob(cells);

    let (title, description) = extract_metadata(cells, source_name);

    let parameters = detect_parameters(&code);
    let outputs = detect_outputs(&code);
    let packages = detect_packages(&code);
    let model_family = classify_model_family(&code);

    let code_lower = code.to_lowercase();
    let has_gradio = code_lower.contains("gradio") || code.contains("import gr");
    let has_flask = code_lower.contains("flask");
    let has_fastapi = code_lower.contains("fastapi");

    debug!(
        "analyzed '{title}': {} parameters, {} outputs, {} packages, family {model_family:?}",
        parameters.len(),
        outputs.len(),
        packages.len()
    );

    let stub = codegen::generate_stub(&parameters, &outputs, model_family);

    Analysis {
        title,
        description,
        parameters,
        outputs,
        packages,
        has_gradio,
        has_flask,
        has_fastapi,
        model_family,
        cells: cells.to_vec(),
        stub,
    }
}

/// Concatenate all code cells, in order, into one text blob
pub fn code_blob(cells: &[Cell]) -> String {
    cells
        .iter()
        .filter(|c| c.kind == CellKind::Code)
        .map(|c| c.text.as_str())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fold the detector families in precedence order, discarding any parameter
/// whose name was already claimed. First detection wins.
fn detect_parameters(code: &str) -> Vec<Parameter> {
    let detected = [
        detect_standard_parameters(code),
        detect_gradio_parameters(code),
        detect_widget_parameters(code),
    ];

    let mut seen: HashSet<String> = HashSet::new();
    let mut parameters = Vec::new();
    for param in detected.into_iter().flatten() {
        if param.name.is_empty() {
            debug!("dropping parameter with unusable label {:?}", param.label);
            continue;
        }
        if seen.insert(param.name.clone()) {
            parameters.push(param);
        } else {
            debug!("dropping duplicate parameter '{}'", param.name);
        }
    }

    if parameters.is_empty() {
        debug!("no parameters detected, installing the default set");
        parameters = default_parameters();
    }

    parameters
}

/// Title from the first markdown heading, description from the first
/// non-heading prose block; both are first-match-wins across cells in order.
fn extract_metadata(cells: &[Cell], source_name: &str) -> (String, String) {
    let mut title = None;
    let mut description = None;

    for cell in cells.iter().filter(|c| c.kind == CellKind::Markdown) {
        if title.is_none() {
            title = patterns::H1_HEADING
                .captures(&cell.text)
                .map(|caps| caps[1].trim().to_string())
                .filter(|t| !t.is_empty());
        }

        if description.is_none() {
            let prose = cell
                .text
                .lines()
                .filter(|line| !line.trim_start().starts_with('#'))
                .collect::<Vec<_>>()
                .join("\n")
                .trim()
                .to_string();
            if !prose.is_empty() {
                description = Some(prose.chars().take(500).collect());
            }
        }

        if title.is_some() && description.is_some() {
            break;
        }
    }

    let title = title.unwrap_or_else(|| fallback_title(source_name));
    (title, description.unwrap_or_default())
}

/// Normalize a file name into a display title: extension stripped,
/// separators replaced with spaces, title-cased.
fn fallback_title(source_name: &str) -> String {
    let stem = match source_name.rsplit_once('.') {
        Some((stem, _ext)) if !stem.is_empty() => stem,
        _ => source_name,
    };
    let title = title_case(stem);
    if title.is_empty() {
        "Notebook".to_string()
    } else {
        title
    }
}
