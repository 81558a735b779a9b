//! Notebook Pattern Library
//!
//! Pre-compiled detection rules applied to the concatenated code blob:
//! - Widget constructor calls (Gradio components, ipywidgets)
//! - Conventional variable assignments (prompt, width, steps, ...)
//! - Package install directives and imports
//! - Model-family keywords
//!
//! These are intentionally loose textual patterns, not language parsing; a
//! keyword appearing anywhere in the blob is enough to trigger its rule.

use once_cell::sync::Lazy;
use regex::Regex;

// Markdown metadata
pub static H1_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^#\s+(.+)$").unwrap());

// Gradio components
pub static GRADIO_TEXTBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gr\.Textbox\s*\([^)]*label\s*=\s*["']([^"']+)["']"#).unwrap());
pub static GRADIO_SLIDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"gr\.Slider\s*\([^)]*minimum\s*=\s*(\d+)[^)]*maximum\s*=\s*(\d+)[^)]*label\s*=\s*["']([^"']+)["']"#,
    )
    .unwrap()
});
pub static GRADIO_NUMBER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gr\.Number\s*\([^)]*label\s*=\s*["']([^"']+)["']"#).unwrap());
pub static GRADIO_CHECKBOX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gr\.Checkbox\s*\([^)]*label\s*=\s*["']([^"']+)["']"#).unwrap());
pub static GRADIO_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"gr\.Dropdown\s*\([^)]*choices\s*=\s*\[([^\]]+)\][^)]*label\s*=\s*["']([^"']+)["']"#)
        .unwrap()
});
pub static GRADIO_IMAGE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gr\.Image\s*\([^)]*label\s*=\s*["']([^"']+)["']"#).unwrap());
pub static GRADIO_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"gr\.File\s*\([^)]*label\s*=\s*["']([^"']+)["']"#).unwrap());

// ipywidgets
pub static WIDGET_TEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"widgets\.Text\s*\([^)]*description\s*=\s*["']([^"']+)["']"#).unwrap());
pub static WIDGET_SLIDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"widgets\.(?:Int|Float)Slider\s*\([^)]*min\s*=\s*(\d+)[^)]*max\s*=\s*(\d+)[^)]*description\s*=\s*["']([^"']+)["']"#,
    )
    .unwrap()
});
pub static WIDGET_DROPDOWN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"widgets\.Dropdown\s*\([^)]*options\s*=\s*\[([^\]]+)\][^)]*description\s*=\s*["']([^"']+)["']"#,
    )
    .unwrap()
});

// Conventional variable assignments; the captured literal seeds the default
pub static WIDTH_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:width|w)\s*=\s*(\d+)").unwrap());
pub static HEIGHT_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:height|h)\s*=\s*(\d+)").unwrap());
pub static STEPS_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:steps|num_inference_steps|inference_steps)\s*=\s*(\d+)").unwrap());
pub static CFG_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:cfg_scale|guidance_scale|cfg)\s*=\s*([\d.]+)").unwrap());
pub static SEED_VAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"seed\s*=\s*(-?\d+)").unwrap());
pub static STRENGTH_VAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"strength\s*=\s*([\d.]+)").unwrap());

// Keyword presence checks for the standard checklist
pub static PROMPT_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)prompt").unwrap());
pub static NEGATIVE_PROMPT_KW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)negative_prompt").unwrap());
pub static WIDTH_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)width").unwrap());
pub static HEIGHT_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)height").unwrap());
pub static STEPS_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)steps|inference").unwrap());
pub static CFG_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)cfg|guidance").unwrap());
pub static SEED_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)seed").unwrap());
pub static STRENGTH_KW: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)img2img|strength").unwrap());
pub static INPUT_IMAGE_KW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)img2img|init_image|input_image").unwrap());

// Output channels
pub static IMAGE_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.save\(|Image\.|PIL|cv2|plt\.show|display\(").unwrap());
pub static AUDIO_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)audio|wav|mp3|tts|speech").unwrap());
pub static VIDEO_OUTPUT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)video|mp4|avi|animate").unwrap());

// Package installation and imports
pub static PIP_INSTALL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!pip3?\s+install\s+([^\n]+)").unwrap());
pub static IMPORT_STMT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^import\s+(\w+)|^from\s+(\w+)").unwrap());

// Model-family keywords, matched in ladder order (most specific first)
pub static FLUX: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)FLUX").unwrap());
pub static SDXL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)SDXL|stable-diffusion-xl").unwrap());
pub static CONTROLNET: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)ControlNet").unwrap());
pub static STABLE_DIFFUSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)StableDiffusion|stable-diffusion|runwayml|CompVis").unwrap());

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gradio_slider_captures_bounds_and_label() {
        let code = r#"gr.Slider(minimum=0, maximum=100, label="Denoise Level")"#;
        let caps = GRADIO_SLIDER.captures(code).unwrap();
        assert_eq!(&caps[1], "0");
        assert_eq!(&caps[2], "100");
        assert_eq!(&caps[3], "Denoise Level");
    }

    #[test]
    fn assignment_patterns_capture_literals() {
        assert_eq!(&WIDTH_VAR.captures("width = 768").unwrap()[1], "768");
        assert_eq!(&SEED_VAR.captures("seed = -1").unwrap()[1], "-1");
        assert_eq!(&CFG_VAR.captures("guidance_scale = 7.5").unwrap()[1], "7.5");
    }

    #[test]
    fn import_pattern_anchors_to_line_start() {
        assert!(IMPORT_STMT.is_match("import torch"));
        assert!(IMPORT_STMT.is_match("x = 1\nfrom diffusers import X"));
        assert!(!IMPORT_STMT.is_match("    import indented"));
    }
}
