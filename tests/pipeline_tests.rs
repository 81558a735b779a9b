use std::fs;

use nbforge::{analyze, inject_stub, Cell, CellKind, Notebook};
use pretty_assertions::assert_eq;
use serde_json::json;

fn write_notebook(dir: &tempfile::TempDir, name: &str, value: serde_json::Value) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

#[test]
fn file_to_stub_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_notebook(
        &dir,
        "demo.ipynb",
        json!({
            "nbformat": 4,
            "metadata": {"kernelspec": {"name": "python3"}},
            "cells": [
                {"cell_type": "markdown", "source": ["# Dream Booth\n", "\n", "Fine-tune and sample."]},
                {"cell_type": "code", "source": ["!pip install diffusers transformers\n"]},
                {"cell_type": "code", "source": ["prompt = 'castle'\n", "width = 640\n", "height = 640\n"]},
            ]
        }),
    );

    let notebook = Notebook::from_file(&path).unwrap();
    let analysis = analyze(&notebook.cells(), "demo.ipynb");

    assert_eq!(analysis.title, "Dream Booth");
    assert_eq!(analysis.description, "Fine-tune and sample.");
    assert!(analysis.packages.contains("diffusers"));
    assert_eq!(
        analysis.parameter("width").unwrap().default,
        Some(json!(640))
    );
    assert!(analysis.stub.contains("width = data.get('width', 640)"));
}

#[test]
fn injected_stub_round_trips_through_the_format() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_notebook(
        &dir,
        "inject.ipynb",
        json!({
            "nbformat": 4,
            "metadata": {"language_info": {"name": "python"}},
            "cells": [{"cell_type": "code", "source": "prompt = 'x'"}]
        }),
    );

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    let analysis = analyze(&Notebook::from_value(raw.clone()).unwrap().cells(), "inject.ipynb");
    let updated = inject_stub(raw, &analysis.stub);

    // notebook-level metadata must survive injection untouched
    assert_eq!(updated["metadata"]["language_info"]["name"], "python");
    assert_eq!(updated["nbformat"], 4);

    let out = dir.path().join("out.ipynb");
    fs::write(&out, serde_json::to_string_pretty(&updated).unwrap()).unwrap();

    let reread = Notebook::from_file(&out).unwrap();
    let cells = reread.cells();
    assert_eq!(cells.len(), 2);
    assert_eq!(cells[1].kind, CellKind::Code);
    assert!(cells[1].text.contains("@app.route('/generate', methods=['POST'])"));
    assert!(cells[1].text.contains("prompt = data.get('prompt', '')"));
}

#[test]
fn unreadable_path_is_an_ingestion_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = Notebook::from_file(&dir.path().join("missing.ipynb")).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("cannot read notebook"), "got: {message}");
}

#[test]
fn structurally_invalid_file_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.ipynb");
    fs::write(&path, r#"{"worksheets": []}"#).unwrap();

    let err = Notebook::from_file(&path).unwrap_err();
    assert!(err.to_string().contains("invalid notebook structure"));
    match err {
        nbforge::Error::Ingestion { path: Some(p), .. } => {
            assert!(p.ends_with("broken.ipynb"))
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn markdown_only_notebook_still_yields_defaults() {
    let cells = vec![Cell::markdown("# Gallery\n\nNo code at all.")];
    let analysis = analyze(&cells, "gallery.ipynb");
    assert_eq!(analysis.title, "Gallery");
    assert_eq!(analysis.parameters.len(), 5);
    assert!(analysis.stub.contains("from flask import Flask"));
}
