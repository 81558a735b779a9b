//! Enrichment adapter: optional analysis improvement via a text-generation
//! backend
//!
//! The heuristic analysis stands alone; everything here is strictly
//! additive. Any failure (no API key, network error, malformed response) is
//! recovered by leaving the analysis unchanged, and `apply` merges only the
//! fields the backend actually produced.

use log::{debug, warn};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;

use crate::config::EnrichmentConfig;
use crate::core::errors::{Error, Result};
use crate::core::{Analysis, ModelFamily};

/// Fields the enrichment backend may contribute
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Enrichment {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub model_family: Option<String>,
    #[serde(default)]
    pub suggested_parameters: Vec<serde_json::Value>,
}

impl Enrichment {
    /// Merge into an analysis in place. Only present, non-empty fields are
    /// taken, and the model family is replaced only when the heuristic
    /// ladder classified nothing.
    pub fn apply(&self, analysis: &mut Analysis) {
        if let Some(title) = self.title.as_deref().filter(|t| !t.trim().is_empty()) {
            analysis.title = title.trim().to_string();
        }
        if let Some(desc) = self.description.as_deref().filter(|d| !d.trim().is_empty()) {
            analysis.description = desc.trim().to_string();
        }
        if analysis.model_family == ModelFamily::Unknown {
            if let Some(family) = self.model_family.as_deref().and_then(parse_model_family) {
                analysis.model_family = family;
            }
        }
    }
}

fn parse_model_family(name: &str) -> Option<ModelFamily> {
    match name {
        "stable_diffusion" => Some(ModelFamily::StableDiffusion),
        "sdxl" => Some(ModelFamily::Sdxl),
        "flux" => Some(ModelFamily::Flux),
        "controlnet" => Some(ModelFamily::Controlnet),
        "diffusers" => Some(ModelFamily::Diffusers),
        "transformers" => Some(ModelFamily::Transformers),
        _ => None,
    }
}

pub struct EnrichmentClient {
    client: Client,
    api_key: Option<String>,
    endpoint: String,
    model: String,
    timeout: Duration,
    max_code_chars: usize,
}

impl EnrichmentClient {
    /// API key comes from `OPENAI_API_KEY`; without it the client reports
    /// unavailable and every call falls back locally.
    pub fn new(config: &EnrichmentConfig) -> Self {
        EnrichmentClient {
            client: Client::new(),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
            max_code_chars: config.max_code_chars,
        }
    }

    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the backend to improve the heuristic analysis of `code`
    pub fn analyze_code(&self, code: &str, existing: &Analysis) -> Result<Enrichment> {
        let truncated: String = code.chars().take(self.max_code_chars).collect();
        let schema = serde_json::to_string_pretty(&existing.parameters)
            .unwrap_or_else(|_| "[]".to_string());

        let prompt = format!(
            "Analyze this notebook code and extract interface metadata.\n\n\
             CODE:\n```python\n{truncated}\n```\n\n\
             ALREADY DETECTED PARAMETERS:\n{schema}\n\n\
             Answer with a JSON object: {{\"title\": string, \"description\": string \
             (max 100 words), \"model_family\": \"stable_diffusion|sdxl|flux|controlnet|\
             diffusers|transformers|unknown\", \"suggested_parameters\": []}}"
        );

        let content = self.chat(
            "You are an expert on generative models and computational notebooks. \
             Analyze code precisely and answer with structured JSON.",
            &prompt,
            0.3,
        )?;

        let payload = extract_json_block(&content);
        serde_json::from_str(payload)
            .map_err(|e| Error::Enrichment(format!("malformed enrichment response: {e}")))
    }

    /// Rewrite a user prompt for better generation results; returns the
    /// original on any failure.
    pub fn improve_prompt(&self, prompt: &str, family: ModelFamily) -> String {
        if prompt.trim().is_empty() {
            return prompt.to_string();
        }
        let system = format!(
            "You are an expert on {} prompts. Improve prompts for detailed, \
             high-quality results.",
            family.badge()
        );
        let user = format!(
            "Improve this prompt for better image generation. Answer ONLY with \
             the improved prompt:\n\n{prompt}"
        );
        match self.chat(&system, &user, 0.7) {
            Ok(improved) => strip_quotes(&improved),
            Err(e) => {
                warn!("prompt improvement unavailable: {e}");
                prompt.to_string()
            }
        }
    }

    /// Derive a negative prompt; fixed fallback when the backend is out
    pub fn generate_negative_prompt(&self, prompt: &str) -> String {
        const FALLBACK: &str = "ugly, blurry, low quality, distorted, deformed";
        let user = format!(
            "Create a negative prompt for this prompt. Answer ONLY with the \
             negative prompt:\n\n{prompt}"
        );
        match self.chat(
            "You are an expert on image generation. Create fitting negative prompts.",
            &user,
            0.5,
        ) {
            Ok(negative) => strip_quotes(&negative),
            Err(e) => {
                warn!("negative prompt generation unavailable: {e}");
                FALLBACK.to_string()
            }
        }
    }

    fn chat(&self, system: &str, user: &str, temperature: f64) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| Error::Enrichment("no API key configured".to_string()))?;

        debug!("enrichment call to {} ({})", self.endpoint, self.model);
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .timeout(self.timeout)
            .json(&json!({
                "model": self.model,
                "messages": [
                    {"role": "system", "content": system},
                    {"role": "user", "content": user},
                ],
                "temperature": temperature,
            }))
            .send()
            .map_err(|e| Error::Enrichment(format!("request failed: {e}")))?;

        if !response.status().is_success() {
            return Err(Error::Enrichment(format!(
                "backend returned status {}",
                response.status()
            )));
        }

        let body: serde_json::Value = response
            .json()
            .map_err(|e| Error::Enrichment(format!("invalid response body: {e}")))?;
        body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::Enrichment("response carries no content".to_string()))
    }
}

/// Run the enrichment pass, keeping the heuristic analysis on any failure
pub fn enrich_in_place(client: &EnrichmentClient, code: &str, analysis: &mut Analysis) {
    if !client.is_available() {
        debug!("enrichment skipped: no API key");
        return;
    }
    match client.analyze_code(code, analysis) {
        Ok(enrichment) => enrichment.apply(analysis),
        Err(e) => warn!("enrichment failed, keeping heuristic analysis: {e}"),
    }
}

fn strip_quotes(text: &str) -> String {
    text.trim()
        .trim_matches(|c: char| c == '"' || c == '\'')
        .to_string()
}

/// Pull the JSON payload out of a possibly fenced model response
fn extract_json_block(text: &str) -> &str {
    if let Some(start) = text.find("```json") {
        let rest = &text[start + 7..];
        rest.split("```").next().unwrap_or(rest).trim()
    } else if let Some(start) = text.find("```") {
        let rest = &text[start + 3..];
        rest.split("```").next().unwrap_or(rest).trim()
    } else {
        text.trim()
    }
}
