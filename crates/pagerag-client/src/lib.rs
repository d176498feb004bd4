//! HTTP client for the external RAG service: page delivery and question
//! forwarding. Transport failures are logged and swallowed — indexing must
//! never fail the caller.

use std::time::Duration;

use pagerag_common::config::RagConfig;
use pagerag_common::types::IndexableRecord;
use reqwest::Client;
use serde_json::json;
use uuid::Uuid;

#[derive(Clone)]
pub struct RagClient {
    http: Client,
    base_url: String,
    api_version: String,
}

impl RagClient {
    /// Build a client from settings. The configured timeout applies to every
    /// request.
    pub fn new(config: &RagConfig) -> Result<Self, RagClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_version: config.api_version.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/api/{}/{}", self.base_url, self.api_version, path)
    }

    /// Deliver one page record to the RAG service.
    ///
    /// Non-2xx responses and transport errors are logged at error level and
    /// swallowed; there is no retry.
    pub async fn index_page(&self, record: &IndexableRecord) {
        let url = self.endpoint("pages");
        match self.http.post(&url).json(record).send().await {
            Ok(response) if response.status().is_success() => {
                tracing::debug!(page_id = %record.id, "page delivered to rag service");
            }
            Ok(response) => {
                let status = response.status();
                let body = response.text().await.unwrap_or_default();
                tracing::error!(page_id = %record.id, %status, body = %body, "failed to index page");
            }
            Err(error) => {
                tracing::error!(page_id = %record.id, error = %error, "failed to index page");
            }
        }
    }

    /// Forward a user question to the RAG service.
    ///
    /// Returns the answer text, or `None` on any failure.
    pub async fn ask(&self, session_id: Option<Uuid>, text: &str) -> Option<String> {
        let url = self.endpoint("rag");
        let payload = json!({
            "role": "user",
            "session_id": session_id,
            "text": text,
        });

        let response = match self.http.post(&url).json(&payload).send().await {
            Ok(response) => response,
            Err(error) => {
                tracing::error!(error = %error, "failed to query rag service");
                return None;
            }
        };
        if !response.status().is_success() {
            tracing::error!(status = %response.status(), "rag service returned an error");
            return None;
        }
        let body: serde_json::Value = match response.json().await {
            Ok(body) => body,
            Err(error) => {
                tracing::error!(error = %error, "invalid response from rag service");
                return None;
            }
        };
        body["text"].as_str().map(String::from)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RagClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}
