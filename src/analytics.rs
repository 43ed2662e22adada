//! Fire-and-forget analytics emission
//!
//! Events are named and carry a flat string payload. Emission is spawned and
//! never awaited; a failed send is logged at debug and otherwise ignored.
//! There is no retry.

use chrono::Utc;
use reqwest::Client;
use serde_json::{Map, Value, json};
use tracing::debug;

const ANALYTICS_ENDPOINT: &str = "https://www.google-analytics.com/mp/collect";
const MEASUREMENT_ID: &str = "G-2TPJXPZ3GB";
const CLIENT_ID: &str = "aerocast-service";

/// Emitter handle; cheap to clone, shares one HTTP client
#[derive(Debug, Clone)]
pub struct AnalyticsEmitter {
    http: Client,
}

impl Default for AnalyticsEmitter {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalyticsEmitter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            http: Client::new(),
        }
    }

    /// Emit a named event. Returns immediately; the send happens on a
    /// spawned task and its outcome is never surfaced to the caller.
    pub fn emit(&self, event: &str, params: &[(&str, &str)]) {
        let payload = event_payload(event, params);
        let http = self.http.clone();
        let event = event.to_string();

        tokio::spawn(async move {
            let url = format!("{ANALYTICS_ENDPOINT}?measurement_id={MEASUREMENT_ID}");
            match http.post(&url).json(&payload).send().await {
                Ok(res) if !res.status().is_success() => {
                    debug!("Analytics event '{event}' rejected with status {}", res.status());
                }
                Ok(_) => {}
                Err(e) => {
                    debug!("Analytics event '{event}' failed to send: {e}");
                }
            }
        });
    }
}

fn event_payload(event: &str, params: &[(&str, &str)]) -> Value {
    let mut flat = Map::new();
    for (key, value) in params {
        flat.insert((*key).to_string(), Value::String((*value).to_string()));
    }

    json!({
        "client_id": CLIENT_ID,
        "timestamp_micros": Utc::now().timestamp_micros(),
        "events": [{
            "name": event,
            "params": flat
        }]
    })
}
