//! Presentation-ready derivation over a validated report
//!
//! Pure, stateless mappings: AQI severity banding, condition-to-icon
//! resolution and pollutant series shaping. Each function is total over a
//! valid [`WeatherReport`], so deriving twice from the same report yields
//! identical output.

use crate::models::{PollutionLevels, WeatherReport};
use serde::Serialize;

/// AQI severity tier with a fixed display color
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiBand {
    Good,
    Moderate,
    Poor,
    Severe,
    Hazardous,
}

impl AqiBand {
    /// Band a numeric AQI. Boundary values land on the lower tier: exactly
    /// 50 is Good, exactly 100 is Moderate, and so on.
    #[must_use]
    pub fn from_aqi(aqi: f64) -> Self {
        match aqi {
            v if v <= 50.0 => AqiBand::Good,
            v if v <= 100.0 => AqiBand::Moderate,
            v if v <= 200.0 => AqiBand::Poor,
            v if v <= 300.0 => AqiBand::Severe,
            _ => AqiBand::Hazardous,
        }
    }

    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            AqiBand::Good => "good",
            AqiBand::Moderate => "moderate",
            AqiBand::Poor => "poor",
            AqiBand::Severe => "severe",
            AqiBand::Hazardous => "hazardous",
        }
    }

    #[must_use]
    pub fn color(&self) -> &'static str {
        match self {
            AqiBand::Good => "#10b981",
            AqiBand::Moderate => "#f59e0b",
            AqiBand::Poor => "#f97316",
            AqiBand::Severe => "#ef4444",
            AqiBand::Hazardous => "#7e22ce",
        }
    }
}

impl std::fmt::Display for AqiBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Icon family a condition phrase resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IconCategory {
    Rain,
    Cloud,
    Clear,
    Storm,
    Snow,
    Mist,
    PartlyCloudy,
}

/// Keyword groups checked in order; first match wins. A condition carrying
/// several keywords ("cloudy with thunderstorms") therefore resolves by list
/// position, not keyword specificity — intentional tie-break policy.
const ICON_KEYWORDS: &[(IconCategory, &[&str])] = &[
    (IconCategory::Rain, &["rain", "shower"]),
    (IconCategory::Cloud, &["cloud"]),
    (IconCategory::Clear, &["clear", "sun"]),
    (IconCategory::Storm, &["storm", "thunder"]),
    (IconCategory::Snow, &["snow"]),
    (IconCategory::Mist, &["mist", "fog", "haze"]),
];

impl IconCategory {
    /// Resolve a free-text condition phrase, case-insensitively.
    #[must_use]
    pub fn from_condition(condition: &str) -> Self {
        let lowered = condition.to_lowercase();
        for (category, keywords) in ICON_KEYWORDS {
            if keywords.iter().any(|keyword| lowered.contains(keyword)) {
                return *category;
            }
        }
        IconCategory::PartlyCloudy
    }

    /// Icon class rendered by the dashboard for this category
    #[must_use]
    pub fn css_class(&self) -> &'static str {
        match self {
            IconCategory::Rain => "fa-cloud-showers-heavy",
            IconCategory::Cloud => "fa-cloud",
            IconCategory::Clear => "fa-sun",
            IconCategory::Storm => "fa-cloud-bolt",
            IconCategory::Snow => "fa-snowflake",
            IconCategory::Mist => "fa-smog",
            IconCategory::PartlyCloudy => "fa-cloud-sun",
        }
    }
}

/// One (label, value) pair for the pollutant chart
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PollutantSample {
    pub label: &'static str,
    pub value: f64,
}

/// Shape the four pollutant scalars into chart order: PM2.5, PM10, NO2, O3.
/// The order is fixed regardless of magnitude.
#[must_use]
pub fn pollutant_series(pollution: &PollutionLevels) -> Vec<PollutantSample> {
    vec![
        PollutantSample {
            label: "PM2.5",
            value: pollution.pm25,
        },
        PollutantSample {
            label: "PM10",
            value: pollution.pm10,
        },
        PollutantSample {
            label: "NO2",
            value: pollution.no2,
        },
        PollutantSample {
            label: "O3",
            value: pollution.o3,
        },
    ]
}

/// Everything a dashboard needs to render one report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportView {
    pub report: WeatherReport,
    pub aqi_band: AqiBand,
    pub aqi_color: &'static str,
    pub icon: IconCategory,
    pub hourly_icons: Vec<IconCategory>,
    pub daily_icons: Vec<IconCategory>,
    pub pollutants: Vec<PollutantSample>,
}

impl ReportView {
    /// Derive the full presentation bundle from a validated report.
    #[must_use]
    pub fn derive(report: &WeatherReport) -> Self {
        let band = AqiBand::from_aqi(report.aqi);
        Self {
            aqi_band: band,
            aqi_color: band.color(),
            icon: IconCategory::from_condition(&report.condition),
            hourly_icons: report
                .hourly_forecast
                .iter()
                .map(|entry| IconCategory::from_condition(&entry.condition))
                .collect(),
            daily_icons: report
                .forecast
                .iter()
                .map(|entry| IconCategory::from_condition(&entry.condition))
                .collect(),
            pollutants: pollutant_series(&report.pollution),
            report: report.clone(),
        }
    }
}
