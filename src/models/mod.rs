//! Data models for the AeroCast service
//!
//! This module contains the core domain models organized by concern:
//! - Report: the weather/air-quality report value object and its sub-records
//! - Station: sensor station bookkeeping mirrored from the realtime store

pub mod report;
pub mod station;

// Re-export all public types for convenient access
pub use report::{DailyForecast, HourlyForecast, PollutionLevels, SourceRef, WeatherReport};
pub use station::{SensorStation, StationStatus};
