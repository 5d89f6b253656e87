//! Generation content source: compose a prompt and call a completion backend.

use anyhow::{Context, Result};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;

use super::{ContentSource, FetchError, RawSegments};

/// Output-length budget for one completion.
const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Calls a completion backend once per identifier.
pub struct GenerationSource {
    endpoint: String,
    api_key: String,
    model: String,
    prompt: String,
    max_retries: usize,
}

impl GenerationSource {
    /// Build a source from file-or-literal inputs.
    ///
    /// The key, prompt prefix, and articulation each accept either a literal
    /// string or a path to a file holding one, so secrets and long prompts
    /// can stay out of the command line.
    pub fn new(
        endpoint: &str,
        api_key: &str,
        model: &str,
        prompt: &str,
        articulation: &str,
        max_retries: usize,
    ) -> Result<Self> {
        let prefix = load_content(prompt)?;
        let articulation = load_content(articulation)?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            api_key: load_content(api_key)?,
            model: model.to_string(),
            prompt: format!("{prefix}\n{articulation}"),
            max_retries,
        })
    }

    fn complete(&self, identifier: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "prompt": format!("{}: {identifier}.\n", self.prompt),
            "max_tokens": MAX_OUTPUT_TOKENS,
        });
        let mut response = ureq::post(self.endpoint.as_str())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send_json(&body)
            .context("call completion backend")?;
        let value: Value = response
            .body_mut()
            .read_json()
            .context("parse completion response")?;
        let text = value
            .get("choices")
            .and_then(|choices| choices.get(0))
            .and_then(|choice| choice.get("text"))
            .and_then(|text| text.as_str())
            .context("completion response missing choices[0].text")?;
        Ok(strip_blank_lines(text))
    }
}

impl ContentSource for GenerationSource {
    fn fetch(&self, identifier: &str) -> Result<RawSegments, FetchError> {
        let mut last_error = String::from("no attempts made");
        for attempt in 1..=self.max_retries {
            match self.complete(identifier) {
                Ok(text) => return Ok(vec![identifier.to_string(), text]),
                Err(err) => {
                    tracing::error!(
                        identifier,
                        attempt,
                        max_retries = self.max_retries,
                        error = %err,
                        "completion failed"
                    );
                    last_error = format!("{err:#}");
                }
            }
        }
        Err(FetchError {
            identifier: identifier.to_string(),
            attempts: self.max_retries,
            last_error,
        })
    }
}

/// Read a string from a file when the input names one, else use it verbatim.
///
/// Only short strings are probed as paths so prompt literals never hit the
/// filesystem by accident.
pub fn load_content(input: &str) -> Result<String> {
    if input.len() < 128 && Path::new(input).is_file() {
        let text =
            fs::read_to_string(input).with_context(|| format!("read content file {input}"))?;
        return Ok(text.trim().to_string());
    }
    Ok(input.to_string())
}

fn strip_blank_lines(text: &str) -> String {
    text.lines()
        .filter(|line| !line.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
