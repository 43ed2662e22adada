//! Sensor station records mirrored from the realtime store
//!
//! Stations are owned and mutated by the hosted store; the service only reads
//! snapshots and seeds the initial mock fleet.

use serde::{Deserialize, Serialize};

/// A monitoring station as stored in the realtime database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SensorStation {
    pub id: String,
    /// Human-readable placement label
    pub location: String,
    pub status: StationStatus,
    /// Relative last-seen label, e.g. "2 mins ago"
    pub last_ping: String,
    /// Battery charge percentage
    pub battery: u8,
}

/// Operational state of a station
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationStatus {
    Active,
    Maintenance,
    Offline,
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationStatus::Active => write!(f, "active"),
            StationStatus::Maintenance => write!(f, "maintenance"),
            StationStatus::Offline => write!(f, "offline"),
        }
    }
}
