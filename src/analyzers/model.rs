//! Model-family classification
//!
//! A fixed-priority keyword ladder, most specific family first. Total: any
//! input maps to exactly one family, `Unknown` when nothing matches.

use super::patterns;
use crate::core::ModelFamily;

pub fn classify_model_family(code: &str) -> ModelFamily {
    let code_lower = code.to_lowercase();

    if patterns::FLUX.is_match(code) {
        ModelFamily::Flux
    } else if patterns::SDXL.is_match(code) {
        ModelFamily::Sdxl
    } else if patterns::CONTROLNET.is_match(code) {
        ModelFamily::Controlnet
    } else if patterns::STABLE_DIFFUSION.is_match(code) {
        ModelFamily::StableDiffusion
    } else if code_lower.contains("diffusers") {
        ModelFamily::Diffusers
    } else if code_lower.contains("transformers") {
        ModelFamily::Transformers
    } else {
        ModelFamily::Unknown
    }
}
