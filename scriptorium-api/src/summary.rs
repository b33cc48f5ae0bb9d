//! Client for the hosted text generation endpoint that writes post summaries.

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Formatter};
use thiserror::Error;
use tracing::{debug, error};

pub const PLACEHOLDER_SUMMARY: &str =
    "This is a mock summary. Set up your Gemini API key to generate a real one.";
pub const SUMMARY_FAILED_MESSAGE: &str =
    "Failed to generate summary. Please check your API key and connection.";
pub const DEFAULT_SUMMARY_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_SUMMARY_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("Please write some content before generating a summary.")]
    EmptyContent,
    #[error("Could not build the HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("Summary request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Summary endpoint answered with {0}")]
    Status(StatusCode),
    #[error("Summary endpoint returned no text")]
    EmptyResponse,
}

#[derive(Clone, Eq, PartialEq, Hash)]
pub struct SummaryConfig {
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl SummaryConfig {
    /// A blank `api_key` counts as no key.
    #[must_use]
    pub fn new(api_key: Option<String>, model: String, base_url: String) -> Self {
        Self {
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            model,
            base_url,
        }
    }
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self::new(
            None,
            DEFAULT_SUMMARY_MODEL.to_owned(),
            DEFAULT_SUMMARY_BASE_URL.to_owned(),
        )
    }
}

impl Debug for SummaryConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SummaryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct SummaryClient {
    http: reqwest::Client,
    config: SummaryConfig,
}

impl SummaryClient {
    pub fn new(config: SummaryConfig) -> Result<Self, SummaryError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(SummaryError::Client)?;

        Ok(Self { http, config })
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub async fn generate(&self, content: &str) -> Result<String, SummaryError> {
        if content.trim().is_empty() {
            return Err(SummaryError::EmptyContent);
        }

        let Some(api_key) = self.config.api_key.as_deref() else {
            debug!("No summary API key configured, returning placeholder");
            return Ok(PLACEHOLDER_SUMMARY.to_owned());
        };

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let prompt = prompt(content);
        let request = GenerateContentRequest {
            contents: [RequestContent {
                parts: [RequestPart { text: &prompt }],
            }],
        };

        debug!(model = %self.config.model, content_len = content.len(), "Requesting summary");

        let response = self
            .http
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&request)
            .send()
            .await
            .inspect_err(|err| error!(error = %err, "Summary request failed"))?;

        let status = response.status();
        if !status.is_success() {
            error!(%status, "Summary endpoint returned an error");
            return Err(SummaryError::Status(status));
        }

        let response: GenerateContentResponse = response.json().await?;
        let summary = response.first_candidate_text();
        let summary = summary.trim();

        if summary.is_empty() {
            Err(SummaryError::EmptyResponse)
        } else {
            Ok(summary.to_owned())
        }
    }
}

fn prompt(content: &str) -> String {
    format!(
        "Please provide a concise, one-paragraph summary of the following blog post content. \
        The summary should capture the main points and be suitable for a preview card.\n\
        ---\n\
        {content}\n\
        ---\n\
        Summary:"
    )
}

#[derive(Serialize)]
struct GenerateContentRequest<'a> {
    contents: [RequestContent<'a>; 1],
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: [RequestPart<'a>; 1],
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    fn first_candidate_text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use crate::summary::{PLACEHOLDER_SUMMARY, SummaryClient, SummaryConfig, SummaryError};
    use reqwest::StatusCode;
    use serde_json::json;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_string_contains, header, method, path},
    };

    fn client(server: &MockServer) -> SummaryClient {
        SummaryClient::new(SummaryConfig::new(
            Some("test-key".to_owned()),
            "test-model".to_owned(),
            server.uri(),
        ))
        .unwrap()
    }

    #[tokio::test]
    async fn placeholder_without_api_key() {
        let client = SummaryClient::new(SummaryConfig::default()).unwrap();

        assert!(!client.is_configured());
        assert_eq!(
            client.generate("Some post content").await.unwrap(),
            PLACEHOLDER_SUMMARY
        );
        assert_eq!(
            PLACEHOLDER_SUMMARY,
            "This is a mock summary. Set up your Gemini API key to generate a real one."
        );
    }

    #[tokio::test]
    async fn blank_api_key_counts_as_missing() {
        let config = SummaryConfig::new(
            Some("  ".to_owned()),
            "test-model".to_owned(),
            "http://localhost".to_owned(),
        );
        let client = SummaryClient::new(config).unwrap();

        assert!(!client.is_configured());
    }

    #[tokio::test]
    async fn blank_content_is_rejected() {
        let client = SummaryClient::new(SummaryConfig::default()).unwrap();

        assert!(matches!(
            client.generate(" \n ").await,
            Err(SummaryError::EmptyContent)
        ));
    }

    #[tokio::test]
    async fn returns_trimmed_text_of_first_candidate() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/test-model:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_string_contains("Ferris the crab"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [
                    {"content": {"parts": [{"text": "  A post about "}, {"text": "Ferris.\n"}]}},
                    {"content": {"parts": [{"text": "Ignored."}]}}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let summary = client(&server)
            .generate("Ferris the crab is the Rust mascot.")
            .await
            .unwrap();

        assert_eq!(summary, "A post about Ferris.");
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let result = client(&server).generate("content").await;

        assert!(matches!(
            result,
            Err(SummaryError::Status(StatusCode::INTERNAL_SERVER_ERROR))
        ));
    }

    #[tokio::test]
    async fn missing_candidates_are_an_empty_response() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let result = client(&server).generate("content").await;

        assert!(matches!(result, Err(SummaryError::EmptyResponse)));
    }

    #[tokio::test]
    async fn malformed_body_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let result = client(&server).generate("content").await;

        assert!(matches!(result, Err(SummaryError::Transport(_))));
    }
}
