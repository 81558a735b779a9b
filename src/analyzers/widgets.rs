//! Widget-constructor detection (Gradio components and ipywidgets)
//!
//! Every labelled constructor call yields one parameter; the field name is
//! the sanitized label. Runs independently of the standard checklist and is
//! de-duplicated against it by the engine.

use once_cell::sync::Lazy;
use regex::Regex;

use super::patterns;
use crate::core::{Parameter, ParameterKind};

/// Detect Gradio component constructors
pub fn detect_gradio_parameters(code: &str) -> Vec<Parameter> {
    let mut params = Vec::new();

    for caps in patterns::GRADIO_TEXTBOX.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::Text));
    }

    for caps in patterns::GRADIO_SLIDER.captures_iter(code) {
        let mut p = labelled(&caps[3], ParameterKind::Range);
        if let (Ok(min), Ok(max)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            p.min = Some(min);
            p.max = Some(max);
        }
        params.push(p);
    }

    for caps in patterns::GRADIO_NUMBER.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::Number));
    }

    for caps in patterns::GRADIO_CHECKBOX.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::Boolean));
    }

    for caps in patterns::GRADIO_DROPDOWN.captures_iter(code) {
        params.push(labelled(&caps[2], ParameterKind::Choice).with_choices(parse_options(&caps[1])));
    }

    for caps in patterns::GRADIO_IMAGE.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::Image));
    }

    for caps in patterns::GRADIO_FILE.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::File));
    }

    params
}

/// Detect ipywidgets constructors
pub fn detect_widget_parameters(code: &str) -> Vec<Parameter> {
    let mut params = Vec::new();

    for caps in patterns::WIDGET_TEXT.captures_iter(code) {
        params.push(labelled(&caps[1], ParameterKind::Text));
    }

    for caps in patterns::WIDGET_SLIDER.captures_iter(code) {
        let mut p = labelled(&caps[3], ParameterKind::Range);
        if let (Ok(min), Ok(max)) = (caps[1].parse::<f64>(), caps[2].parse::<f64>()) {
            p.min = Some(min);
            p.max = Some(max);
        }
        params.push(p);
    }

    for caps in patterns::WIDGET_DROPDOWN.captures_iter(code) {
        params.push(labelled(&caps[2], ParameterKind::Choice).with_choices(parse_options(&caps[1])));
    }

    params
}

fn labelled(label: &str, kind: ParameterKind) -> Parameter {
    Parameter::new(sanitize_name(label), kind).with_label(label)
}

/// Turn a display label into a stable field identifier: lowercase, map
/// anything outside `[a-z0-9_]` to `_`, collapse runs, trim the edges.
/// Idempotent: sanitizing a sanitized name is a no-op.
pub fn sanitize_name(label: &str) -> String {
    static INVALID: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_]").unwrap());
    static COLLAPSE: Lazy<Regex> = Lazy::new(|| Regex::new(r"_+").unwrap());

    let lowered = label.to_lowercase();
    let replaced = INVALID.replace_all(&lowered, "_");
    let collapsed = COLLAPSE.replace_all(&replaced, "_");
    collapsed.trim_matches('_').to_string()
}

/// Split a literal option list (`'a', 'b', "c"`) into its string items
fn parse_options(list: &str) -> Vec<String> {
    list.split(',')
        .map(|item| item.trim().trim_matches(|c| c == '\'' || c == '"').to_string())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_lowercases_and_collapses() {
        assert_eq!(sanitize_name("Denoise Level"), "denoise_level");
        assert_eq!(sanitize_name("CFG  Scale!"), "cfg_scale");
        assert_eq!(sanitize_name("__already_clean__"), "already_clean");
    }

    #[test]
    fn sanitize_is_idempotent() {
        let once = sanitize_name("Größe (px)");
        assert_eq!(sanitize_name(&once), once);
    }

    #[test]
    fn gradio_textbox_yields_text_parameter() {
        let params = detect_gradio_parameters(r#"gr.Textbox(label="Style Preset")"#);
        assert_eq!(params.len(), 1);
        assert_eq!(params[0].name, "style_preset");
        assert_eq!(params[0].kind, ParameterKind::Text);
        assert_eq!(params[0].label, "Style Preset");
    }

    #[test]
    fn gradio_slider_carries_bounds() {
        let params =
            detect_gradio_parameters(r#"gr.Slider(minimum=1, maximum=30, label="Batch Size")"#);
        assert_eq!(params[0].kind, ParameterKind::Range);
        assert_eq!(params[0].min, Some(1.0));
        assert_eq!(params[0].max, Some(30.0));
    }

    #[test]
    fn gradio_dropdown_parses_choices() {
        let params = detect_gradio_parameters(
            r#"gr.Dropdown(choices=['euler', 'ddim', "dpm++"], label="Sampler")"#,
        );
        assert_eq!(params[0].kind, ParameterKind::Choice);
        assert_eq!(params[0].choices, ["euler", "ddim", "dpm++"]);
    }

    #[test]
    fn widget_slider_yields_range() {
        let params = detect_widget_parameters(
            r#"widgets.IntSlider(min=0, max=10, description="Noise Level")"#,
        );
        assert_eq!(params[0].name, "noise_level");
        assert_eq!(params[0].max, Some(10.0));
    }
}
