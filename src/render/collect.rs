//! Per-kind value-collection rules
//!
//! The authoritative contract between the rendered interface and the
//! generated backend stub: for every parameter, how the host must read the
//! control's value before submission. One rule per parameter kind; the
//! match in `CollectionRule::for_kind` is the single place a new kind has
//! to be wired in.

use serde::{Deserialize, Serialize};

use crate::core::{Parameter, ParameterKind};

/// How a control's value is extracted on submit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionRule {
    /// Checked state; false when the control is absent
    Checked,
    /// Parsed float; 0 when empty or absent
    Float,
    /// Awaited base64 encoding of the selected upload
    ImageBase64,
    /// Trimmed string; empty when absent
    Text,
}

impl CollectionRule {
    pub fn for_kind(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Boolean => CollectionRule::Checked,
            ParameterKind::Number | ParameterKind::Range => CollectionRule::Float,
            ParameterKind::Image => CollectionRule::ImageBase64,
            ParameterKind::Text
            | ParameterKind::MultilineText
            | ParameterKind::Choice
            | ParameterKind::File => CollectionRule::Text,
        }
    }

    /// The generated JS statement implementing this rule for one field
    pub fn js_line(&self, name: &str) -> String {
        match self {
            CollectionRule::Checked => format!(
                "params['{name}'] = document.getElementById('{name}')?.checked || false;"
            ),
            CollectionRule::Float => format!(
                "params['{name}'] = parseFloat(document.getElementById('{name}')?.value || 0);"
            ),
            CollectionRule::ImageBase64 => {
                format!("params['{name}'] = await encodeImageBase64('{name}_input');")
            }
            CollectionRule::Text => format!(
                "params['{name}'] = (document.getElementById('{name}')?.value || '').trim();"
            ),
        }
    }
}

/// One entry of the collection-mapping table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionEntry {
    pub name: String,
    pub rule: CollectionRule,
}

/// Build the ordered collection mapping for a parameter list
pub fn collection_mapping(parameters: &[Parameter]) -> Vec<CollectionEntry> {
    parameters
        .iter()
        .map(|p| CollectionEntry {
            name: p.name.clone(),
            rule: CollectionRule::for_kind(p.kind),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_rule() {
        assert_eq!(
            CollectionRule::for_kind(ParameterKind::Boolean),
            CollectionRule::Checked
        );
        assert_eq!(
            CollectionRule::for_kind(ParameterKind::Range),
            CollectionRule::Float
        );
        assert_eq!(
            CollectionRule::for_kind(ParameterKind::Image),
            CollectionRule::ImageBase64
        );
        assert_eq!(
            CollectionRule::for_kind(ParameterKind::Choice),
            CollectionRule::Text
        );
    }

    #[test]
    fn checked_rule_defaults_false_when_control_absent() {
        let js = CollectionRule::Checked.js_line("tile");
        assert!(js.contains("?.checked || false"));
    }

    #[test]
    fn float_rule_defaults_zero_on_empty() {
        let js = CollectionRule::Float.js_line("width");
        assert!(js.contains("parseFloat"));
        assert!(js.contains("|| 0"));
    }

    #[test]
    fn image_rule_awaits_the_upload_input() {
        let js = CollectionRule::ImageBase64.js_line("input_image");
        assert!(js.starts_with("params['input_image'] = await "));
        assert!(js.contains("'input_image_input'"));
    }

    #[test]
    fn mapping_preserves_declaration_order() {
        let params = vec![
            Parameter::new("prompt", ParameterKind::MultilineText),
            Parameter::new("width", ParameterKind::Range),
        ];
        let mapping = collection_mapping(&params);
        assert_eq!(mapping[0].name, "prompt");
        assert_eq!(mapping[1].rule, CollectionRule::Float);
    }
}
