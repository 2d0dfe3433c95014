use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::Provider;
use crate::errors::ForgeError;

pub struct Gemini {
    pub model: String,
    pub api_key: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl Gemini {
    pub fn new(model: String, api_key: String, api_base: String, timeout_secs: u64) -> Self {
        Self {
            model,
            api_key,
            api_base,
            timeout: Duration::from_secs(timeout_secs),
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl Provider for Gemini {
    async fn generate(&self, instruction: &str, debug: bool) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        );
        let client = Client::builder().timeout(self.timeout).build()?;
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: instruction }],
            }],
        };

        if debug {
            eprintln!("debug/gemini: POST {}", url);
        }

        let resp = client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .context("gemini request failed")?;

        let status = resp.status();
        let text = resp.text().await.context("gemini read body failed")?;
        if debug {
            eprintln!("debug/gemini: status {}", status);
            eprintln!("debug/gemini: raw body:\n{}\n", text);
        }

        if !status.is_success() {
            let lowered = text.to_lowercase();
            if status.as_u16() == 400 && lowered.contains("api key") {
                return Err(ForgeError::Configuration(
                    "gemini rejected the configured API key".into(),
                )
                .into());
            }
            if status.as_u16() == 429 || lowered.contains("quota") {
                return Err(ForgeError::Upstream(
                    "gemini quota exceeded or rate limited".into(),
                )
                .into());
            }
            if status.is_server_error() {
                return Err(ForgeError::Upstream(format!("gemini returned {status}")).into());
            }
            return Err(anyhow!("gemini API error ({}): {}", status, text));
        }

        let parsed: GenerateResponse = serde_json::from_str(&text)
            .map_err(|e| anyhow!("gemini response parse error: {}", e))?;

        let reply = parsed
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .filter(|t| !t.is_empty())
            .ok_or_else(|| anyhow!("gemini: empty candidate content"))?;

        Ok(reply)
    }
}
