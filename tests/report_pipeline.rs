//! End-to-end acquisition pipeline tests over a synthetic provider response

use aerocast::{AeroCastError, GeminiReportClient, GenerateContentResponse};
use serde_json::json;

fn synthetic_response() -> GenerateContentResponse {
    let report = json!({
        "city": "New Delhi",
        "temperature": 31.0,
        "humidity": 58.0,
        "windSpeed": 12.0,
        "visibility": 4.5,
        "uvIndex": 7.0,
        "pressure": 1008.0,
        "condition": "Hazy Sunshine",
        "rainProbability": 10.0,
        "airDensity": 1.16,
        "aqi": 212.0,
        "pollution": { "pm25": 120.5, "pm10": 210.0, "no2": 40.2, "o3": 30.8 },
        "forecast": [
            { "day": "Monday", "temp": 32.0, "condition": "Hazy" },
            { "day": "Tuesday", "temp": 33.0, "condition": "Partly Cloudy" }
        ],
        "hourlyForecast": [
            { "time": "1 PM", "temp": 31.0, "condition": "Hazy" },
            { "time": "2 PM", "temp": 32.0, "condition": "Hazy" }
        ],
        "aiInsights": "Air quality is severe; sensitive groups should stay indoors.",
        "stationDensity": "sparse"
    });

    serde_json::from_value(json!({
        "candidates": [{
            "content": { "parts": [{ "text": report.to_string() }] },
            "groundingMetadata": {
                "groundingChunks": [
                    { "web": { "uri": "https://mausam.imd.gov.in/bulletin", "title": "IMD Bulletin" } },
                    { "retrievedContext": { "uri": "corpus://internal/doc-17", "title": "Model Memory" } },
                    { "web": { "uri": "https://cpcb.nic.in/aqi" } }
                ]
            }
        }]
    }))
    .unwrap()
}

#[test]
fn full_pipeline_keeps_every_mandatory_field_intact() {
    let response = synthetic_response();
    let report = GeminiReportClient::parse_report("New Delhi", &response).unwrap();

    assert_eq!(report.city, "New Delhi");
    assert_eq!(report.temperature, 31.0);
    assert_eq!(report.humidity, 58.0);
    assert_eq!(report.wind_speed, 12.0);
    assert_eq!(report.visibility, 4.5);
    assert_eq!(report.uv_index, 7.0);
    assert_eq!(report.pressure, 1008.0);
    assert_eq!(report.condition, "Hazy Sunshine");
    assert_eq!(report.rain_probability, 10.0);
    assert_eq!(report.air_density, 1.16);
    assert_eq!(report.aqi, 212.0);
    assert_eq!(report.pollution.pm25, 120.5);
    assert_eq!(report.pollution.pm10, 210.0);
    assert_eq!(report.pollution.no2, 40.2);
    assert_eq!(report.pollution.o3, 30.8);
    assert_eq!(report.forecast.len(), 2);
    assert_eq!(report.forecast[1].day, "Tuesday");
    assert_eq!(report.hourly_forecast.len(), 2);
    assert_eq!(report.hourly_forecast[0].time, "1 PM");
    assert!(report.ai_insights.contains("severe"));

    // unlisted provider fields pass through untouched
    assert_eq!(report.extra.get("stationDensity"), Some(&json!("sparse")));
}

#[test]
fn sources_reduce_to_web_referenced_chunks_only() {
    let response = synthetic_response();
    let report = GeminiReportClient::parse_report("New Delhi", &response).unwrap();

    assert_eq!(report.sources.len(), 2);
    assert_eq!(report.sources[0].title, "IMD Bulletin");
    assert_eq!(report.sources[0].uri, "https://mausam.imd.gov.in/bulletin");
    // missing page title falls back to the uri
    assert_eq!(report.sources[1].title, "https://cpcb.nic.in/aqi");
}

#[test]
fn empty_provider_body_fails_as_missing_fields_not_a_parse_crash() {
    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "content": { "parts": [{ "text": "" }] } }]
    }))
    .unwrap();

    let err = GeminiReportClient::parse_report("Agra", &response).unwrap_err();
    match err {
        AeroCastError::Acquisition { location, message } => {
            assert_eq!(location, "Agra");
            assert!(message.contains("missing required field"), "got: {message}");
        }
        other => panic!("expected acquisition failure, got {other:?}"),
    }
}

#[test]
fn wrong_typed_field_rejects_the_whole_report() {
    let mut report = json!({
        "city": "Agra",
        "temperature": 31.0,
        "humidity": 58.0,
        "windSpeed": 12.0,
        "visibility": 4.5,
        "uvIndex": 7.0,
        "pressure": 1008.0,
        "condition": "Hazy",
        "rainProbability": 10.0,
        "airDensity": 1.16,
        "aqi": 212.0,
        "pollution": { "pm25": 120.0, "pm10": 210.0, "no2": 40.0, "o3": 30.0 },
        "forecast": [],
        "hourlyForecast": [],
        "aiInsights": "ok"
    });
    report["humidity"] = json!("58 percent");

    let response: GenerateContentResponse = serde_json::from_value(json!({
        "candidates": [{ "content": { "parts": [{ "text": report.to_string() }] } }]
    }))
    .unwrap();

    let err = GeminiReportClient::parse_report("Agra", &response).unwrap_err();
    assert!(matches!(err, AeroCastError::Acquisition { .. }));
}
