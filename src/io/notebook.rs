//! Ingestion boundary for .ipynb notebook structures
//!
//! A notebook is an ordered list of cells; each cell carries a type tag and
//! its source text, which the format stores either as a single string or as a
//! list of line strings. Missing or structurally invalid `cells` is a hard
//! error surfaced to the caller; everything past this boundary is best-effort.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::core::errors::{Error, Result};

/// Cell source as stored in the notebook format
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceText {
    Joined(String),
    Lines(Vec<String>),
}

impl SourceText {
    /// Concatenate into one text blob
    pub fn join(&self) -> String {
        match self {
            SourceText::Joined(s) => s.clone(),
            SourceText::Lines(lines) => lines.concat(),
        }
    }
}

impl Default for SourceText {
    fn default() -> Self {
        SourceText::Joined(String::new())
    }
}

/// One raw notebook cell as ingested
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCell {
    pub cell_type: String,
    #[serde(default)]
    pub source: SourceText,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notebook {
    pub cells: Vec<RawCell>,
}

/// Classification of a cell for the analysis passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CellKind {
    Code,
    Markdown,
    /// Unknown cell types (e.g. `raw`) are retained but ignored by analysis
    Other,
}

/// One materialized cell: type tag plus joined source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub kind: CellKind,
    pub text: String,
}

impl Cell {
    pub fn code(text: impl Into<String>) -> Self {
        Cell {
            kind: CellKind::Code,
            text: text.into(),
        }
    }

    pub fn markdown(text: impl Into<String>) -> Self {
        Cell {
            kind: CellKind::Markdown,
            text: text.into(),
        }
    }
}

impl Notebook {
    /// Parse a notebook from its JSON text
    pub fn parse_str(json: &str) -> Result<Notebook> {
        serde_json::from_str(json)
            .map_err(|e| Error::ingestion(format!("invalid notebook structure: {e}")))
    }

    /// Parse a notebook from an already-decoded JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Notebook> {
        serde_json::from_value(value)
            .map_err(|e| Error::ingestion(format!("invalid notebook structure: {e}")))
    }

    /// Read and parse a notebook file
    pub fn from_file(path: &Path) -> Result<Notebook> {
        let text = fs::read_to_string(path).map_err(|e| {
            Error::ingestion_at(format!("cannot read notebook: {e}"), path.to_path_buf())
        })?;
        Notebook::parse_str(&text).map_err(|e| match e {
            Error::Ingestion { message, .. } => Error::ingestion_at(message, path.to_path_buf()),
            other => other,
        })
    }

    /// Materialize cells for analysis, joining multi-line sources
    pub fn cells(&self) -> Vec<Cell> {
        self.cells
            .iter()
            .map(|raw| {
                let kind = match raw.cell_type.as_str() {
                    "code" => CellKind::Code,
                    "markdown" => CellKind::Markdown,
                    _ => CellKind::Other,
                };
                Cell {
                    kind,
                    text: raw.source.join(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_and_string_sources() {
        let json = r##"{"cells": [
            {"cell_type": "markdown", "source": ["# Title\n", "body"]},
            {"cell_type": "code", "source": "x = 1"}
        ]}"##;
        let nb = Notebook::parse_str(json).unwrap();
        let cells = nb.cells();
        assert_eq!(cells[0], Cell::markdown("# Title\nbody"));
        assert_eq!(cells[1], Cell::code("x = 1"));
    }

    #[test]
    fn missing_cells_is_hard_error() {
        let err = Notebook::parse_str(r#"{"metadata": {}}"#).unwrap_err();
        assert!(err.to_string().contains("invalid notebook structure"));
    }

    #[test]
    fn unknown_cell_type_is_tolerated() {
        let json = r#"{"cells": [{"cell_type": "raw", "source": "%%raw"}]}"#;
        let cells = Notebook::parse_str(json).unwrap().cells();
        assert_eq!(cells[0].kind, CellKind::Other);
    }

    #[test]
    fn cell_without_source_defaults_empty() {
        let json = r#"{"cells": [{"cell_type": "code"}]}"#;
        let cells = Notebook::parse_str(json).unwrap().cells();
        assert_eq!(cells[0].text, "");
    }
}
