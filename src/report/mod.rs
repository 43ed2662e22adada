//! Weather-report acquisition core
//!
//! The boundary between the dashboard and the generative-data provider:
//! the structured-output schema the provider is constrained to, the client
//! that issues the single outbound call, the grounding-citation extractor,
//! and the pure view-model derivation consumed by the UI.

pub mod provider;
pub mod schema;
pub mod sources;
pub mod view;

pub use provider::{GeminiReportClient, GenerateContentResponse, ReportProvider};
pub use sources::extract_sources;
pub use view::{AqiBand, IconCategory, PollutantSample, ReportView};
