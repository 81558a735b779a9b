//! Required-package detection from install directives and imports

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

use super::patterns;

/// Collect package names from `!pip install` lines and top-level imports.
/// Version qualifiers are stripped; flag tokens are skipped.
pub fn detect_packages(code: &str) -> BTreeSet<String> {
    static VERSION_QUALIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(r"[<>=!].*").unwrap());

    let mut packages = BTreeSet::new();

    for caps in patterns::PIP_INSTALL.captures_iter(code) {
        for token in caps[1].split_whitespace() {
            let pkg = VERSION_QUALIFIER.replace(token, "").trim().to_string();
            if !pkg.is_empty() && !pkg.starts_with('-') {
                packages.insert(pkg);
            }
        }
    }

    for caps in patterns::IMPORT_STMT.captures_iter(code) {
        if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
            packages.insert(m.as_str().to_string());
        }
    }

    packages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pip_line_strips_versions_and_flags() {
        let pkgs = detect_packages("!pip install diffusers==0.27 -q transformers>=4.0");
        assert!(pkgs.contains("diffusers"));
        assert!(pkgs.contains("transformers"));
        assert!(!pkgs.iter().any(|p| p.starts_with('-')));
    }

    #[test]
    fn imports_contribute_module_names() {
        let pkgs = detect_packages("import torch\nfrom PIL import Image");
        assert!(pkgs.contains("torch"));
        assert!(pkgs.contains("PIL"));
    }

    #[test]
    fn duplicates_collapse() {
        let pkgs = detect_packages("!pip install torch\nimport torch");
        assert_eq!(pkgs.iter().filter(|p| *p == "torch").count(), 1);
    }
}
