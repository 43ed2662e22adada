//! Weather report value object
//!
//! A [`WeatherReport`] is constructed fresh on every location query, never
//! mutated, and discarded when a newer query supersedes it. Field names on
//! the wire are camelCase to match the provider's structured output.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A complete weather and air-quality report for one location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Free-text label echoed from the provider, not validated against a
    /// gazetteer
    pub city: String,
    /// Temperature in degrees Celsius (provider-asserted)
    pub temperature: f64,
    /// Relative humidity percentage
    pub humidity: f64,
    /// Wind speed in km/h
    pub wind_speed: f64,
    /// Visibility in km
    pub visibility: f64,
    /// UV index
    pub uv_index: f64,
    /// Atmospheric pressure in hPa
    pub pressure: f64,
    /// Free-text short phrase, e.g. "Partly Cloudy"
    pub condition: String,
    /// Rain probability percentage
    pub rain_probability: f64,
    /// Air density in kg/m^3
    pub air_density: f64,
    /// Air quality index
    pub aqi: f64,
    /// Pollutant concentrations, all four mandatory
    pub pollution: PollutionLevels,
    /// Daily outlook entries, nominally 7 but provider-determined
    pub forecast: Vec<DailyForecast>,
    /// Hourly outlook entries, nominally 12 but provider-determined
    pub hourly_forecast: Vec<HourlyForecast>,
    /// Free-text narrative summary
    pub ai_insights: String,
    /// Citation records pulled from the grounding side-channel; derived
    /// after validation, absent when the provider returned no grounding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sources: Vec<SourceRef>,
    /// Unlisted provider fields are passed through untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Fixed record of pollutant concentrations in µg/m³
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollutionLevels {
    pub pm25: f64,
    pub pm10: f64,
    pub no2: f64,
    pub o3: f64,
}

/// One daily forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyForecast {
    /// Day label, e.g. "Monday"
    pub day: String,
    /// Temperature in degrees Celsius
    pub temp: f64,
    pub condition: String,
}

/// One hourly forecast entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HourlyForecast {
    /// Time label, e.g. "1 PM"
    pub time: String,
    /// Temperature in degrees Celsius
    pub temp: f64,
    pub condition: String,
}

/// A grounding citation: page title plus URI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceRef {
    pub title: String,
    pub uri: String,
}
