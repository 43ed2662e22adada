//! Sensor-station directory mirrored from the hosted realtime store
//!
//! The store owns the collection; this wrapper reads snapshots, writes under
//! generated push-style keys, and seeds the fixed mock fleet exactly once if
//! the first observed snapshot is empty.

use crate::models::{SensorStation, StationStatus};
use crate::{AeroCastError, Result};
use rand::RngExt;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tokio::sync::{OnceCell, watch};
use tracing::{debug, info, instrument};

const STORE_ENDPOINT: &str = "https://weather-5f45a-default-rtdb.firebaseio.com";
const STATIONS_PATH: &str = "stations";

const PUSH_KEY_CHARS: &[u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";
const PUSH_KEY_SUFFIX_LEN: usize = 8;

/// Realtime-store wrapper for the station collection
#[derive(Debug)]
pub struct StationDirectory {
    http: Client,
    base_url: String,
    snapshot: watch::Sender<Vec<SensorStation>>,
    seeded: OnceCell<bool>,
}

impl Default for StationDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl StationDirectory {
    #[must_use]
    pub fn new() -> Self {
        Self::with_base_url(STORE_ENDPOINT)
    }

    #[must_use]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let (snapshot, _) = watch::channel(Vec::new());
        Self {
            http: Client::new(),
            base_url: base_url.into(),
            snapshot,
            seeded: OnceCell::new(),
        }
    }

    /// Subscribe to the station snapshot. Receivers see the value published
    /// by the most recent [`refresh`](Self::refresh).
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<SensorStation>> {
        self.snapshot.subscribe()
    }

    /// Fetch the collection's current snapshot, seed the mock fleet if this
    /// is the first observation and it came back empty, and publish the
    /// result to subscribers.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<Vec<SensorStation>> {
        let mut stations = self.fetch_snapshot().await?;

        // The seeding decision is taken once, on the first observed snapshot
        if self.seeded.get().is_none() {
            let observed_empty = stations.is_empty();
            let seeded = self
                .seeded
                .get_or_try_init(|| async {
                    if observed_empty {
                        info!("Station collection empty, seeding mock fleet");
                        for station in mock_stations() {
                            self.put(&station).await?;
                        }
                    }
                    Ok::<_, AeroCastError>(observed_empty)
                })
                .await?;

            if *seeded && observed_empty {
                stations = self.fetch_snapshot().await?;
            }
        }

        debug!("Publishing snapshot of {} stations", stations.len());
        self.snapshot.send_replace(stations.clone());
        Ok(stations)
    }

    /// Create-or-replace a station record under a generated key
    pub async fn put(&self, station: &SensorStation) -> Result<String> {
        let key = push_key();
        let url = format!("{}/{STATIONS_PATH}/{key}.json", self.base_url);

        let res = self
            .http
            .put(&url)
            .json(station)
            .send()
            .await
            .map_err(|e| AeroCastError::store(e.to_string()))?;

        if !res.status().is_success() {
            return Err(AeroCastError::store(format!(
                "store write failed with status {}",
                res.status()
            )));
        }

        Ok(key)
    }

    /// Append a station record, letting the store generate the key
    pub async fn append(&self, station: &SensorStation) -> Result<String> {
        let url = format!("{}/{STATIONS_PATH}.json", self.base_url);

        let res = self
            .http
            .post(&url)
            .json(station)
            .send()
            .await
            .map_err(|e| AeroCastError::store(e.to_string()))?;

        if !res.status().is_success() {
            return Err(AeroCastError::store(format!(
                "store append failed with status {}",
                res.status()
            )));
        }

        let created: AppendResponse = res
            .json()
            .await
            .map_err(|e| AeroCastError::store(e.to_string()))?;
        Ok(created.name)
    }

    async fn fetch_snapshot(&self) -> Result<Vec<SensorStation>> {
        let url = format!("{}/{STATIONS_PATH}.json", self.base_url);

        let res = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| AeroCastError::store(e.to_string()))?;

        if !res.status().is_success() {
            return Err(AeroCastError::store(format!(
                "store read failed with status {}",
                res.status()
            )));
        }

        let value: Value = res
            .json()
            .await
            .map_err(|e| AeroCastError::store(e.to_string()))?;

        parse_snapshot(value)
    }
}

#[derive(Debug, Deserialize)]
struct AppendResponse {
    name: String,
}

/// Station record as stored; the store key becomes the id on read
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredStation {
    location: String,
    status: StationStatus,
    last_ping: String,
    battery: u8,
}

/// Map the store's keyed-object snapshot (or null, when empty) to the
/// station list. The store key overrides whatever id the record carried.
fn parse_snapshot(value: Value) -> Result<Vec<SensorStation>> {
    let entries = match value {
        Value::Null => return Ok(Vec::new()),
        Value::Object(entries) => entries,
        other => {
            return Err(AeroCastError::store(format!(
                "unexpected station snapshot shape: {other}"
            )));
        }
    };

    let mut stations = Vec::with_capacity(entries.len());
    for (key, entry) in entries {
        let stored: StoredStation = serde_json::from_value(entry)
            .map_err(|e| AeroCastError::store(format!("bad station record under {key}: {e}")))?;
        stations.push(SensorStation {
            id: key,
            location: stored.location,
            status: stored.status,
            last_ping: stored.last_ping,
            battery: stored.battery,
        });
    }
    Ok(stations)
}

/// Generated store key: millisecond timestamp plus a random suffix, so keys
/// sort by creation time
fn push_key() -> String {
    let mut rng = rand::rng();
    let suffix: String = (0..PUSH_KEY_SUFFIX_LEN)
        .map(|_| PUSH_KEY_CHARS[rng.random_range(0..PUSH_KEY_CHARS.len())] as char)
        .collect();
    format!("{}-{}", chrono::Utc::now().timestamp_millis(), suffix)
}

/// The operator-seeded demo fleet
fn mock_stations() -> Vec<SensorStation> {
    vec![
        SensorStation {
            id: "ST-001".to_string(),
            location: "Downtown Manhattan".to_string(),
            status: StationStatus::Active,
            last_ping: "2 mins ago".to_string(),
            battery: 88,
        },
        SensorStation {
            id: "ST-002".to_string(),
            location: "Queens Airport".to_string(),
            status: StationStatus::Maintenance,
            last_ping: "1 hour ago".to_string(),
            battery: 42,
        },
        SensorStation {
            id: "ST-003".to_string(),
            location: "Central Park".to_string(),
            status: StationStatus::Active,
            last_ping: "5 mins ago".to_string(),
            battery: 95,
        },
        SensorStation {
            id: "ST-004".to_string(),
            location: "Brooklyn Harbor".to_string(),
            status: StationStatus::Offline,
            last_ping: "2 days ago".to_string(),
            battery: 0,
        },
    ]
}
