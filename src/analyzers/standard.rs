//! Standard-parameter checklist for image-generation notebooks
//!
//! Each detector is a pure `fn(&str) -> Option<Parameter>` over the code
//! blob. Keyword presence alone is enough to trigger a control; an explicit
//! `name = literal` assignment seeds the default instead of the fixed
//! fallback. This looseness is deliberate: the checklist is a best-effort
//! convention scan, and an unrelated word containing a keyword will still
//! produce its control.

use serde_json::Value;

use super::patterns;
use crate::core::{Parameter, ParameterKind};

type Detector = fn(&str) -> Option<Parameter>;

/// Checklist order is fixed; it is also the de-duplication precedence order.
const DETECTORS: &[Detector] = &[
    detect_prompt,
    detect_negative_prompt,
    detect_width,
    detect_height,
    detect_steps,
    detect_cfg_scale,
    detect_seed,
    detect_strength,
    detect_input_image,
];

/// Run the full checklist against the code blob
pub fn detect_standard_parameters(code: &str) -> Vec<Parameter> {
    DETECTORS.iter().filter_map(|detect| detect(code)).collect()
}

fn detect_prompt(code: &str) -> Option<Parameter> {
    patterns::PROMPT_KW.is_match(code).then(|| {
        Parameter::new("prompt", ParameterKind::MultilineText)
            .with_default(Value::String(String::new()))
            .with_description("Description of the desired image")
    })
}

fn detect_negative_prompt(code: &str) -> Option<Parameter> {
    patterns::NEGATIVE_PROMPT_KW.is_match(code).then(|| {
        Parameter::new("negative_prompt", ParameterKind::MultilineText)
            .with_default(Value::String(String::new()))
            .with_description("What should NOT appear in the image")
            .optional()
    })
}

fn detect_width(code: &str) -> Option<Parameter> {
    let assigned = capture_u64(&patterns::WIDTH_VAR, code);
    (assigned.is_some() || patterns::WIDTH_KW.is_match(code)).then(|| {
        Parameter::new("width", ParameterKind::Range)
            .with_default(Value::from(assigned.unwrap_or(512)))
            .with_bounds(256.0, 1024.0, 64.0)
            .with_description("Image width in pixels")
    })
}

fn detect_height(code: &str) -> Option<Parameter> {
    let assigned = capture_u64(&patterns::HEIGHT_VAR, code);
    (assigned.is_some() || patterns::HEIGHT_KW.is_match(code)).then(|| {
        Parameter::new("height", ParameterKind::Range)
            .with_default(Value::from(assigned.unwrap_or(512)))
            .with_bounds(256.0, 1024.0, 64.0)
            .with_description("Image height in pixels")
    })
}

fn detect_steps(code: &str) -> Option<Parameter> {
    let assigned = capture_u64(&patterns::STEPS_VAR, code);
    (assigned.is_some() || patterns::STEPS_KW.is_match(code)).then(|| {
        Parameter::new("steps", ParameterKind::Range)
            .with_default(Value::from(assigned.unwrap_or(50)))
            .with_bounds(10.0, 150.0, 1.0)
            .with_description("Number of inference steps")
    })
}

fn detect_cfg_scale(code: &str) -> Option<Parameter> {
    let assigned = capture_f64(&patterns::CFG_VAR, code);
    (assigned.is_some() || patterns::CFG_KW.is_match(code)).then(|| {
        Parameter::new("cfg_scale", ParameterKind::Range)
            .with_label("CFG Scale")
            .with_default(Value::from(assigned.unwrap_or(7.5)))
            .with_bounds(1.0, 20.0, 0.5)
            .with_description("How closely the prompt is followed")
    })
}

fn detect_seed(code: &str) -> Option<Parameter> {
    let assigned = capture_i64(&patterns::SEED_VAR, code);
    (assigned.is_some() || patterns::SEED_KW.is_match(code)).then(|| {
        Parameter::new("seed", ParameterKind::Number)
            .with_default(Value::from(assigned.unwrap_or(-1)))
            .with_description("Random seed for reproducibility (-1 = random)")
    })
}

fn detect_strength(code: &str) -> Option<Parameter> {
    let assigned = capture_f64(&patterns::STRENGTH_VAR, code);
    (assigned.is_some() || patterns::STRENGTH_KW.is_match(code)).then(|| {
        Parameter::new("strength", ParameterKind::Range)
            .with_default(Value::from(assigned.unwrap_or(0.75)))
            .with_bounds(0.0, 1.0, 0.05)
            .with_description("Strength of the image transformation")
    })
}

fn detect_input_image(code: &str) -> Option<Parameter> {
    patterns::INPUT_IMAGE_KW.is_match(code).then(|| {
        Parameter::new("input_image", ParameterKind::Image)
            .with_description("Image for img2img editing")
            .optional()
    })
}

/// The fixed set installed when no detection family produced any parameter
pub fn default_parameters() -> Vec<Parameter> {
    vec![
        Parameter::new("prompt", ParameterKind::MultilineText)
            .with_default(Value::String(String::new()))
            .with_description("Description of the desired image"),
        Parameter::new("negative_prompt", ParameterKind::MultilineText)
            .with_default(Value::String(String::new()))
            .with_description("What should NOT appear in the image")
            .optional(),
        Parameter::new("width", ParameterKind::Range)
            .with_default(Value::from(512))
            .with_bounds(256.0, 1024.0, 64.0),
        Parameter::new("height", ParameterKind::Range)
            .with_default(Value::from(512))
            .with_bounds(256.0, 1024.0, 64.0),
        Parameter::new("steps", ParameterKind::Range)
            .with_default(Value::from(50))
            .with_bounds(10.0, 150.0, 1.0),
    ]
}

fn capture_u64(re: &regex::Regex, code: &str) -> Option<u64> {
    re.captures(code)?.get(1)?.as_str().parse().ok()
}

fn capture_i64(re: &regex::Regex, code: &str) -> Option<i64> {
    re.captures(code)?.get(1)?.as_str().parse().ok()
}

fn capture_f64(re: &regex::Regex, code: &str) -> Option<f64> {
    re.captures(code)?.get(1)?.as_str().parse().ok()
}
