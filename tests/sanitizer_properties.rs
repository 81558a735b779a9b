//! Property-based tests for name sanitization and parameter detection
//!
//! These tests verify invariants that should hold for all inputs:
//! - Sanitized names only ever contain `[a-z0-9_]`
//! - Sanitization is idempotent
//! - Detection never emits duplicate parameter names
//! - Detection order is deterministic

use nbforge::{analyze, sanitize_name, Cell};
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    /// Property: every sanitized name is drawn from the identifier alphabet,
    /// with no leading or trailing underscore
    #[test]
    fn prop_sanitized_names_use_identifier_alphabet(label in ".{0,40}") {
        let name = sanitize_name(&label);
        prop_assert!(name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_'));
        prop_assert!(!name.starts_with('_'));
        prop_assert!(!name.ends_with('_'));
    }

    /// Property: sanitizing an already-sanitized name changes nothing
    #[test]
    fn prop_sanitization_is_idempotent(label in ".{0,40}") {
        let once = sanitize_name(&label);
        prop_assert_eq!(sanitize_name(&once), once);
    }

    /// Property: no run of underscores survives collapsing
    #[test]
    fn prop_no_consecutive_underscores(label in "[ _\\-a-zA-Z0-9]{0,40}") {
        let name = sanitize_name(&label);
        prop_assert!(!name.contains("__"), "got {:?}", name);
    }

    /// Property: parameter names are unique within one analysis, whatever
    /// mix of assignments and widget constructors the code contains
    #[test]
    fn prop_detected_names_are_unique(
        labels in proptest::collection::vec("[a-zA-Z ]{1,12}", 0..6),
        body in "[a-z_ =0-9\\n]{0,80}",
    ) {
        let mut code = body;
        for label in &labels {
            code.push_str(&format!("\ngr.Textbox(label=\"{label}\")"));
        }
        let analysis = analyze(&[Cell::code(code)], "prop.ipynb");

        let mut seen = HashSet::new();
        for param in &analysis.parameters {
            prop_assert!(seen.insert(param.name.clone()), "duplicate {:?}", param.name);
            prop_assert!(!param.name.is_empty());
        }
    }

    /// Property: the same cells always produce the same schema
    #[test]
    fn prop_analysis_is_deterministic(code in "[a-z_ =0-9'\\n]{0,120}") {
        let cells = [Cell::code(code)];
        let first = analyze(&cells, "det.ipynb");
        let second = analyze(&cells, "det.ipynb");
        prop_assert_eq!(
            serde_json::to_string(&first.parameters).unwrap(),
            serde_json::to_string(&second.parameters).unwrap()
        );
        prop_assert_eq!(first.stub, second.stub);
    }
}
