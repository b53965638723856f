//! Gemini-backed implementation of the language model seam.

use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::errors::{FinanceError, Result};

use super::LanguageModel;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub struct GeminiClient {
    client: reqwest::blocking::Client,
    model: String,
    api_key: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

impl GeminiClient {
    /// Builds a client from the configuration; fails when the configured API
    /// key variable is unset so the error surfaces before any network call.
    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = std::env::var(&config.assistant_api_key_env).map_err(|_| {
            FinanceError::ConfigError(format!(
                "assistant API key not set (expected in ${})",
                config.assistant_api_key_env
            ))
        })?;
        Ok(Self {
            client: reqwest::blocking::Client::new(),
            model: config.assistant_model.clone(),
            api_key,
        })
    }
}

impl LanguageModel for GeminiClient {
    fn generate(&self, system_prompt: &str, input: &str) -> Result<String> {
        let url = format!(
            "{API_BASE}/{model}:generateContent?key={key}",
            model = self.model,
            key = self.api_key
        );
        let body = json!({
            "system_instruction": { "parts": [{ "text": system_prompt }] },
            "contents": [{ "parts": [{ "text": input }] }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        tracing::debug!(model = %self.model, "Requesting assistant transcription.");
        let response = self.client.post(&url).json(&body).send()?;
        if !response.status().is_success() {
            return Err(FinanceError::AssistantError(format!(
                "model call failed with status {}",
                response.status()
            )));
        }
        let parsed: GenerateResponse = response.json()?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .unwrap_or_default();
        if text.is_empty() {
            return Err(FinanceError::AssistantError("no data returned".into()));
        }
        Ok(text)
    }
}
