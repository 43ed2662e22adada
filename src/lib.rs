//! `AeroCast` - Weather and air-quality intelligence dashboard backend
//!
//! This library provides the weather-report acquisition core (a schema-
//! constrained generative-search provider client with grounding-citation
//! extraction and presentation view-model derivation) plus the hosted
//! collaborator boundaries the dashboard depends on: identity, realtime
//! station store and analytics.

pub mod analytics;
pub mod api;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod models;
pub mod report;
pub mod session;
pub mod stations;
pub mod web;

// Re-export core types for public API
pub use analytics::AnalyticsEmitter;
pub use config::AeroCastConfig;
pub use dashboard::{Dashboard, DashboardView, ErrorBanner};
pub use error::AeroCastError;
pub use models::{SensorStation, StationStatus, WeatherReport};
pub use report::{
    AqiBand, GeminiReportClient, GenerateContentResponse, IconCategory, ReportProvider, ReportView,
};
pub use session::{AuthUser, IdentityClient, Role};
pub use stations::StationDirectory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, AeroCastError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
