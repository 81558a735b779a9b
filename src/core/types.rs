//! Schema model shared across the analysis engine, renderer, and codegen

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;

use crate::io::notebook::Cell;

/// Kinds of interface controls a detected parameter can map to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Text,
    MultilineText,
    Number,
    Range,
    Boolean,
    Choice,
    File,
    Image,
}

impl ParameterKind {
    /// Display name used in reports
    pub fn display_name(&self) -> &'static str {
        match self {
            ParameterKind::Text => "text",
            ParameterKind::MultilineText => "multiline text",
            ParameterKind::Number => "number",
            ParameterKind::Range => "range",
            ParameterKind::Boolean => "boolean",
            ParameterKind::Choice => "choice",
            ParameterKind::File => "file",
            ParameterKind::Image => "image",
        }
    }

    /// Whether this kind carries min/max/step bounds
    pub fn is_numeric(&self) -> bool {
        matches!(self, ParameterKind::Number | ParameterKind::Range)
    }
}

/// Kinds of result channels a notebook can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    Image,
    Text,
    File,
    Audio,
    Video,
}

impl OutputKind {
    pub fn display_name(&self) -> &'static str {
        match self {
            OutputKind::Image => "image",
            OutputKind::Text => "text",
            OutputKind::File => "file",
            OutputKind::Audio => "audio",
            OutputKind::Video => "video",
        }
    }
}

/// Coarse classification of the generative-model convention a notebook targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelFamily {
    StableDiffusion,
    Sdxl,
    Flux,
    Controlnet,
    Diffusers,
    Transformers,
    Unknown,
}

impl ModelFamily {
    /// Badge text shown in the rendered interface
    pub fn badge(&self) -> &'static str {
        match self {
            ModelFamily::StableDiffusion => "Stable Diffusion",
            ModelFamily::Sdxl => "SDXL",
            ModelFamily::Flux => "FLUX",
            ModelFamily::Controlnet => "ControlNet",
            ModelFamily::Diffusers => "Diffusers",
            ModelFamily::Transformers => "Transformers",
            ModelFamily::Unknown => "AI Model",
        }
    }
}

/// One detected or declared input field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Stable identifier, lowercase `[a-z0-9_]+`, unique within an analysis
    pub name: String,
    pub kind: ParameterKind,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub choices: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    pub required: bool,
}

impl Parameter {
    /// Create a parameter with a label derived from the name
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        let name = name.into();
        let label = title_case(&name);
        Self {
            name,
            kind,
            label,
            default: None,
            min: None,
            max: None,
            step: None,
            choices: Vec::new(),
            description: String::new(),
            required: true,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_default(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Set min/max/step bounds; only meaningful for numeric kinds
    pub fn with_bounds(mut self, min: f64, max: f64, step: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self.step = Some(step);
        self
    }

    pub fn with_choices(mut self, choices: Vec<String>) -> Self {
        self.choices = choices;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// The default serialized onto the wire when the user supplies nothing
    pub fn effective_default(&self) -> Value {
        match &self.default {
            Some(v) => v.clone(),
            None => match self.kind {
                ParameterKind::Boolean => Value::Bool(false),
                k if k.is_numeric() => Value::from(0),
                _ => Value::String(String::new()),
            },
        }
    }
}

/// One detected result channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Output {
    pub name: String,
    pub kind: OutputKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
}

impl Output {
    pub fn new(name: impl Into<String>, kind: OutputKind, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            description: description.into(),
        }
    }

    /// The output synthesized when detection finds no result channel
    pub fn default_image() -> Self {
        Output::new("generated_image", OutputKind::Image, "Generated image")
    }
}

/// Full result of analyzing one notebook
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Analysis {
    pub title: String,
    pub description: String,
    /// Insertion order is the canonical render order within each kind group
    pub parameters: Vec<Parameter>,
    pub outputs: Vec<Output>,
    pub packages: BTreeSet<String>,
    pub has_gradio: bool,
    pub has_flask: bool,
    pub has_fastapi: bool,
    pub model_family: ModelFamily,
    /// Original cell structure, retained for re-analysis and stub injection
    pub cells: Vec<Cell>,
    /// Generated backend-stub text matching the parameter schema
    pub stub: String,
}

impl Analysis {
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Title-case a snake_case or kebab-case identifier for display
pub fn title_case(name: &str) -> String {
    name.split(['_', '-', ' '])
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
