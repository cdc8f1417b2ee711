//! Client for the `/generate` route

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::io::HttpClient;
use crate::mode::SummaryMode;
use crate::SummarizerError;

const BLANK_NOTE: &str = "Please enter a clinical note first.";
const GENERIC_FAILURE: &str = "Something went wrong.";

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    mode: SummaryMode,
    note: &'a str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    output: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Sends notes to the summarization service
pub struct SummarizerClient {
    base_url: String,
    http: Arc<dyn HttpClient>,
}

impl std::fmt::Debug for SummarizerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummarizerClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl SummarizerClient {
    pub fn new(base_url: &str, http: Arc<dyn HttpClient>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        }
    }

    /// Rewrite `note` in the style of `mode`.
    ///
    /// A blank note is rejected without contacting the server.
    pub async fn generate(&self, mode: SummaryMode, note: &str) -> crate::Result<String> {
        if note.trim().is_empty() {
            return Err(SummarizerError::Validation(BLANK_NOTE.to_string()));
        }

        let url = format!("{}/generate", self.base_url);
        let body = serde_json::to_value(GenerateRequest { mode, note })?;
        tracing::info!("Requesting {} for a {} character note", mode, note.len());

        let response = self.http.post_json(&url, &body).await.map_err(|e| {
            tracing::warn!("Generate request failed: {}", e);
            match e {
                SummarizerError::Connection(_) => e,
                other => SummarizerError::Connection(other.to_string()),
            }
        })?;

        let parsed: GenerateResponse = serde_json::from_str(&response.body).map_err(|e| {
            tracing::warn!("Unreadable response from {}: {}", url, e);
            SummarizerError::Connection(format!("Decoding response from {}: {}", url, e))
        })?;

        if response.is_success() {
            Ok(parsed.output.unwrap_or_default())
        } else {
            let message = parsed
                .error
                .filter(|e| !e.is_empty())
                .unwrap_or_else(|| GENERIC_FAILURE.to_string());
            tracing::warn!("Server returned {}: {}", response.status, message);
            Err(SummarizerError::Api {
                status: response.status,
                message,
            })
        }
    }
}
