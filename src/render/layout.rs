//! Grouped field layout
//!
//! Parameters are grouped by kind rather than declaration position: free-text
//! fields come first at full width (they carry the primary prompt), uploads
//! follow, then dense numeric controls in multi-column rows, then dropdowns
//! and checkboxes. Declaration order is preserved inside every group.

use serde::{Deserialize, Serialize};

use crate::core::{Parameter, ParameterKind};

/// How a group's fields are arranged by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupLayout {
    /// One field per row
    FullWidth,
    /// Sliders, two per row
    TwoColumn,
    /// Numeric fields, three per row
    ThreeColumn,
}

/// One ordered block of same-kind fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldGroup {
    pub layout: GroupLayout,
    pub fields: Vec<Parameter>,
}

/// Build the grouped layout from a parameter list
pub fn group_fields(parameters: &[Parameter]) -> Vec<FieldGroup> {
    let of_kind = |pred: fn(ParameterKind) -> bool| -> Vec<Parameter> {
        parameters
            .iter()
            .filter(|p| pred(p.kind))
            .cloned()
            .collect()
    };

    let blocks = [
        (
            GroupLayout::FullWidth,
            of_kind(|k| matches!(k, ParameterKind::Text | ParameterKind::MultilineText)),
        ),
        (GroupLayout::FullWidth, of_kind(|k| k == ParameterKind::Image)),
        (GroupLayout::FullWidth, of_kind(|k| k == ParameterKind::File)),
        (GroupLayout::TwoColumn, of_kind(|k| k == ParameterKind::Range)),
        (
            GroupLayout::ThreeColumn,
            of_kind(|k| k == ParameterKind::Number),
        ),
        (GroupLayout::FullWidth, of_kind(|k| k == ParameterKind::Choice)),
        (
            GroupLayout::FullWidth,
            of_kind(|k| k == ParameterKind::Boolean),
        ),
    ];

    blocks
        .into_iter()
        .filter(|(_, fields)| !fields.is_empty())
        .map(|(layout, fields)| FieldGroup { layout, fields })
        .collect()
}
