//! Dashboard query orchestration and the latest-report cell
//!
//! Each location query is an independent outbound call; nothing is pooled,
//! de-duplicated or cancelled. The cell is generation-guarded: a completing
//! query's result is accepted only while its generation is still the latest
//! issued, so a slow early query can never overwrite a newer one.

use crate::analytics::AnalyticsEmitter;
use crate::report::{ReportProvider, ReportView};
use crate::{AeroCastError, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// View-local error state; "Reconnect" means re-invoking
/// [`Dashboard::sync`] with the same location
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBanner {
    pub location: String,
    pub message: String,
}

/// What the dashboard view renders
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    /// Generation of the most recently issued query
    pub generation: u64,
    pub report: Option<ReportView>,
    pub error: Option<ErrorBanner>,
}

#[derive(Default)]
struct ReportCell {
    latest_issued: u64,
    report: Option<ReportView>,
    error: Option<ErrorBanner>,
}

/// Owns the report cell and runs location queries against the provider
pub struct Dashboard {
    provider: Arc<dyn ReportProvider>,
    analytics: AnalyticsEmitter,
    next_generation: AtomicU64,
    cell: Mutex<ReportCell>,
}

impl Dashboard {
    #[must_use]
    pub fn new(provider: Arc<dyn ReportProvider>, analytics: AnalyticsEmitter) -> Self {
        Self {
            provider,
            analytics,
            next_generation: AtomicU64::new(0),
            cell: Mutex::new(ReportCell::default()),
        }
    }

    /// Issue a new query generation; the cell will only accept a completion
    /// carrying the generation that is latest at completion time.
    pub fn begin_query(&self) -> u64 {
        let generation = self.next_generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cell.lock().unwrap().latest_issued = generation;
        generation
    }

    /// Run one location query end to end and return the resulting view.
    ///
    /// Failures never propagate: they become the view-local error banner
    /// naming the location, and the dashboard stays interactive.
    #[instrument(skip(self))]
    pub async fn sync(&self, location: &str) -> DashboardView {
        let location = location.trim().to_string();
        let generation = self.begin_query();
        info!("Query generation {generation} issued for '{location}'");

        self.analytics.emit("search", &[("search_term", &location)]);

        let outcome = self
            .provider
            .fetch_report(&location)
            .await
            .map(|report| ReportView::derive(&report));

        if outcome.is_ok() {
            self.analytics.emit(
                "view_item",
                &[
                    ("item_id", location.as_str()),
                    ("item_name", "weather_report"),
                    ("location_id", location.as_str()),
                ],
            );
        }

        self.complete(generation, &location, outcome);
        self.view()
    }

    /// Current view snapshot
    #[must_use]
    pub fn view(&self) -> DashboardView {
        let cell = self.cell.lock().unwrap();
        DashboardView {
            generation: cell.latest_issued,
            report: cell.report.clone(),
            error: cell.error.clone(),
        }
    }

    /// Apply a completed query to the cell. Returns whether the completion
    /// was accepted; stale generations are discarded outright.
    fn complete(&self, generation: u64, location: &str, outcome: Result<ReportView>) -> bool {
        let mut cell = self.cell.lock().unwrap();
        if generation != cell.latest_issued {
            debug!(
                "Discarding stale completion for generation {generation}, latest is {}",
                cell.latest_issued
            );
            return false;
        }

        match outcome {
            Ok(view) => {
                cell.report = Some(view);
                cell.error = None;
            }
            Err(err) => {
                warn!("Query for '{location}' failed: {err}");
                cell.error = Some(ErrorBanner {
                    location: location.to_string(),
                    message: err.user_message(),
                });
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PollutionLevels, WeatherReport};
    use crate::report::ReportProvider;
    use async_trait::async_trait;

    fn sample_report(city: &str) -> WeatherReport {
        WeatherReport {
            city: city.to_string(),
            temperature: 29.0,
            humidity: 61.0,
            wind_speed: 14.0,
            visibility: 7.0,
            uv_index: 6.0,
            pressure: 1009.0,
            condition: "Partly Cloudy".to_string(),
            rain_probability: 20.0,
            air_density: 1.15,
            aqi: 140.0,
            pollution: PollutionLevels {
                pm25: 60.0,
                pm10: 110.0,
                no2: 30.0,
                o3: 25.0,
            },
            forecast: Vec::new(),
            hourly_forecast: Vec::new(),
            ai_insights: "Moderate haze through the afternoon.".to_string(),
            sources: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    #[derive(Debug)]
    struct StubProvider {
        fail: bool,
    }

    #[async_trait]
    impl ReportProvider for StubProvider {
        async fn fetch_report(&self, location: &str) -> Result<WeatherReport> {
            if self.fail {
                Err(AeroCastError::acquisition(location, "stubbed outage"))
            } else {
                Ok(sample_report(location))
            }
        }
    }

    fn dashboard(fail: bool) -> Dashboard {
        Dashboard::new(
            Arc::new(StubProvider { fail }),
            AnalyticsEmitter::new(),
        )
    }

    #[tokio::test]
    async fn successful_sync_fills_the_cell() {
        let dashboard = dashboard(false);
        let view = dashboard.sync("New Delhi").await;
        assert_eq!(view.generation, 1);
        assert!(view.error.is_none());
        assert_eq!(view.report.unwrap().report.city, "New Delhi");
    }

    #[tokio::test]
    async fn failure_becomes_a_banner_naming_the_location() {
        let dashboard = dashboard(true);
        let view = dashboard.sync("Varanasi").await;
        let banner = view.error.unwrap();
        assert_eq!(banner.location, "Varanasi");
        assert!(banner.message.contains("Varanasi"));
        assert!(view.report.is_none());
    }

    #[tokio::test]
    async fn reconnect_after_failure_clears_the_banner() {
        let dashboard = Dashboard::new(
            Arc::new(StubProvider { fail: false }),
            AnalyticsEmitter::new(),
        );
        // Seed a banner by hand, then re-sync the same location
        let generation = dashboard.begin_query();
        dashboard.complete(
            generation,
            "Varanasi",
            Err(AeroCastError::acquisition("Varanasi", "outage")),
        );
        assert!(dashboard.view().error.is_some());

        let view = dashboard.sync("Varanasi").await;
        assert!(view.error.is_none());
        assert!(view.report.is_some());
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let dashboard = dashboard(false);
        let first = dashboard.begin_query();
        let second = dashboard.begin_query();

        let stale = ReportView::derive(&sample_report("Old Query"));
        assert!(!dashboard.complete(first, "Old Query", Ok(stale)));

        let fresh = ReportView::derive(&sample_report("New Query"));
        assert!(dashboard.complete(second, "New Query", Ok(fresh)));

        let view = dashboard.view();
        assert_eq!(view.report.unwrap().report.city, "New Query");
    }

    #[tokio::test]
    async fn stale_failure_cannot_clobber_a_fresh_result() {
        let dashboard = dashboard(false);
        let first = dashboard.begin_query();
        let second = dashboard.begin_query();

        let fresh = ReportView::derive(&sample_report("Fresh"));
        assert!(dashboard.complete(second, "Fresh", Ok(fresh)));
        assert!(!dashboard.complete(
            first,
            "Stale",
            Err(AeroCastError::acquisition("Stale", "late timeout"))
        ));

        let view = dashboard.view();
        assert!(view.error.is_none());
        assert_eq!(view.report.unwrap().report.city, "Fresh");
    }
}
