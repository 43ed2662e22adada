//! Generative weather-report provider client
//!
//! Issues the single outbound call per location query: one natural-language
//! instruction with web-search grounding enabled and a structured-output
//! directive naming the report schema. There is no caching, no retry and no
//! de-duplication; two immediate calls for the same location perform two full
//! round trips, and re-issuing after a failure is the caller's job.

use crate::models::WeatherReport;
use crate::report::{schema, sources};
use crate::{AeroCastError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fmt::Debug;
use tracing::{debug, instrument};

const GENERATE_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Abstraction over weather-report providers
#[async_trait]
pub trait ReportProvider: Send + Sync + Debug {
    /// Fetch a fresh report for a location name.
    ///
    /// The location is a non-empty trimmed string and is interpolated into
    /// the provider instruction as-is; no gazetteer or geocoding pass.
    async fn fetch_report(&self, location: &str) -> Result<WeatherReport>;
}

/// Client for the hosted generative-search endpoint
#[derive(Debug, Clone)]
pub struct GeminiReportClient {
    api_key: String,
    model: String,
    http: Client,
}

impl GeminiReportClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            http: Client::new(),
        }
    }

    fn build_instruction(location: &str) -> String {
        format!(
            "Retrieve absolute current, real-time weather and air quality analytics for {location}, India. \
             Include a detailed hourly forecast for the next 12 hours (e.g., \"1 PM\", \"2 PM\") and a daily forecast for the next 7 days. \
             Source data from IMD (India Meteorological Dept), CPCB, and reputable live news."
        )
    }

    fn request_body(location: &str) -> serde_json::Value {
        json!({
            "contents": [{ "parts": [{ "text": Self::build_instruction(location) }] }],
            "tools": [{ "googleSearch": {} }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": schema::response_schema(),
            }
        })
    }

    /// Turn a raw provider response into a validated report with sources
    /// attached.
    ///
    /// Malformed JSON, schema violations and missing mandatory fields all
    /// collapse into one acquisition error carrying the location name; the
    /// caller cannot act differently on the distinction.
    pub fn parse_report(location: &str, response: &GenerateContentResponse) -> Result<WeatherReport> {
        let raw = response.text();
        // A provider returning nothing rather than an error is still routed
        // through schema validation, as an empty object.
        let raw = if raw.trim().is_empty() {
            "{}".to_string()
        } else {
            raw
        };

        let value: serde_json::Value = serde_json::from_str(&raw)
            .map_err(|e| AeroCastError::acquisition(location, format!("malformed JSON: {e}")))?;

        schema::validate(&value).map_err(|e| AeroCastError::acquisition(location, e))?;

        let mut report: WeatherReport = serde_json::from_value(value)
            .map_err(|e| AeroCastError::acquisition(location, format!("schema mismatch: {e}")))?;

        report.sources = sources::extract_sources(response);
        Ok(report)
    }
}

#[async_trait]
impl ReportProvider for GeminiReportClient {
    #[instrument(skip(self))]
    async fn fetch_report(&self, location: &str) -> Result<WeatherReport> {
        let location = location.trim();
        if location.is_empty() {
            return Err(AeroCastError::validation("location must not be empty"));
        }

        let url = format!(
            "{GENERATE_ENDPOINT}/{}:generateContent?key={}",
            self.model, self.api_key
        );

        debug!("Requesting weather report for {location}");

        let res = self
            .http
            .post(&url)
            .json(&Self::request_body(location))
            .send()
            .await
            .map_err(|e| AeroCastError::acquisition(location, format!("request failed: {e}")))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| {
            AeroCastError::acquisition(location, format!("failed to read response body: {e}"))
        })?;

        if !status.is_success() {
            return Err(AeroCastError::acquisition(
                location,
                format!(
                    "provider returned status {}: {}",
                    status,
                    truncate_body(&body)
                ),
            ));
        }

        let response: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            AeroCastError::acquisition(location, format!("malformed provider envelope: {e}"))
        })?;

        Self::parse_report(location, &response)
    }
}

/// Provider response envelope for a generate-content call
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|candidate| candidate.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    pub(crate) content: Option<CandidateContent>,
    pub(crate) grounding_metadata: Option<GroundingMetadata>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CandidateContent {
    #[serde(default)]
    pub(crate) parts: Vec<ContentPart>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ContentPart {
    pub(crate) text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub(crate) grounding_chunks: Vec<GroundingChunk>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GroundingChunk {
    pub(crate) web: Option<WebReference>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WebReference {
    pub(crate) uri: String,
    pub(crate) title: Option<String>,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        format!("{}...", &body[..MAX])
    } else {
        body.to_string()
    }
}
