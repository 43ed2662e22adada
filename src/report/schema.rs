//! Structured-output contract for weather reports
//!
//! One schema definition serves both halves of the contract: it is handed to
//! the provider so generation is constrained to valid JSON of this shape, and
//! it is what a deserialized response is checked against before anything
//! downstream trusts it. Sharing the definition keeps "ask" and "verify"
//! from drifting apart.

use serde_json::{Value, json};
use std::sync::LazyLock;

static RESPONSE_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "type": "OBJECT",
        "properties": {
            "city": { "type": "STRING" },
            "temperature": { "type": "NUMBER" },
            "humidity": { "type": "NUMBER" },
            "windSpeed": { "type": "NUMBER" },
            "visibility": { "type": "NUMBER" },
            "uvIndex": { "type": "NUMBER" },
            "pressure": { "type": "NUMBER" },
            "condition": { "type": "STRING" },
            "rainProbability": { "type": "NUMBER" },
            "airDensity": { "type": "NUMBER" },
            "aqi": { "type": "NUMBER" },
            "pollution": {
                "type": "OBJECT",
                "properties": {
                    "pm25": { "type": "NUMBER" },
                    "pm10": { "type": "NUMBER" },
                    "no2": { "type": "NUMBER" },
                    "o3": { "type": "NUMBER" }
                },
                "required": ["pm25", "pm10", "no2", "o3"]
            },
            "forecast": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "day": { "type": "STRING" },
                        "temp": { "type": "NUMBER" },
                        "condition": { "type": "STRING" }
                    },
                    "required": ["day", "temp", "condition"]
                }
            },
            "hourlyForecast": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "time": { "type": "STRING" },
                        "temp": { "type": "NUMBER" },
                        "condition": { "type": "STRING" }
                    },
                    "required": ["time", "temp", "condition"]
                }
            },
            "aiInsights": { "type": "STRING" }
        },
        "required": [
            "city", "temperature", "humidity", "windSpeed", "visibility",
            "uvIndex", "pressure", "condition", "rainProbability",
            "airDensity", "aqi", "pollution", "forecast", "hourlyForecast", "aiInsights"
        ]
    })
});

/// The schema handed to the provider as its structured-output directive
#[must_use]
pub fn response_schema() -> &'static Value {
    &RESPONSE_SCHEMA
}

/// Check a deserialized response against the response schema.
///
/// Every required field must be present with the declared JSON kind, and
/// sequence fields must be arrays (possibly empty). Fields the schema does
/// not list never fail validation; wrong-typed-but-present fields do.
pub fn validate(value: &Value) -> Result<(), String> {
    validate_against(response_schema(), value, "report")
}

fn validate_against(schema: &Value, value: &Value, path: &str) -> Result<(), String> {
    match schema["type"].as_str() {
        Some("OBJECT") => {
            let Some(object) = value.as_object() else {
                return Err(format!("`{path}` must be an object"));
            };

            if let Some(required) = schema["required"].as_array() {
                for name in required.iter().filter_map(Value::as_str) {
                    if !object.contains_key(name) {
                        return Err(format!("missing required field `{path}.{name}`"));
                    }
                }
            }

            if let Some(properties) = schema["properties"].as_object() {
                for (name, property_schema) in properties {
                    if let Some(field) = object.get(name) {
                        validate_against(property_schema, field, &format!("{path}.{name}"))?;
                    }
                }
            }

            Ok(())
        }
        Some("ARRAY") => {
            let Some(items) = value.as_array() else {
                return Err(format!("`{path}` must be an array"));
            };

            for (index, item) in items.iter().enumerate() {
                validate_against(&schema["items"], item, &format!("{path}[{index}]"))?;
            }

            Ok(())
        }
        Some("NUMBER") => {
            if value.is_number() {
                Ok(())
            } else {
                Err(format!("`{path}` must be a number"))
            }
        }
        Some("STRING") => {
            if value.is_string() {
                Ok(())
            } else {
                Err(format!("`{path}` must be a string"))
            }
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_report() -> Value {
        json!({
            "city": "New Delhi",
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
            "forecast": [
                { "day": "Monday", "temp": 32.0, "condition": "Hazy" }
            ],
            "hourlyForecast": [
                { "time": "1 PM", "temp": 31.0, "condition": "Hazy" }
            ],
            "aiInsights": "Sensitive groups should limit outdoor exposure."
        })
    }

    #[test]
    fn full_report_validates() {
        assert!(validate(&full_report()).is_ok());
    }

    #[test]
    fn missing_mandatory_field_names_the_field() {
        let mut report = full_report();
        report.as_object_mut().unwrap().remove("aqi");
        let err = validate(&report).unwrap_err();
        assert!(err.contains("report.aqi"), "unexpected error: {err}");
    }

    #[test]
    fn wrong_typed_field_is_rejected() {
        let mut report = full_report();
        report["temperature"] = json!("31 degrees");
        let err = validate(&report).unwrap_err();
        assert!(err.contains("report.temperature"));
        assert!(err.contains("must be a number"));
    }

    #[test]
    fn missing_pollutant_key_is_rejected() {
        let mut report = full_report();
        report["pollution"].as_object_mut().unwrap().remove("no2");
        let err = validate(&report).unwrap_err();
        assert!(err.contains("report.pollution.no2"));
    }

    #[test]
    fn empty_sequences_are_allowed() {
        let mut report = full_report();
        report["forecast"] = json!([]);
        report["hourlyForecast"] = json!([]);
        assert!(validate(&report).is_ok());
    }

    #[test]
    fn sequence_must_be_an_array_not_omitted_or_scalar() {
        let mut report = full_report();
        report["forecast"] = json!("none");
        let err = validate(&report).unwrap_err();
        assert!(err.contains("must be an array"));
    }

    #[test]
    fn malformed_forecast_entry_is_rejected() {
        let mut report = full_report();
        report["forecast"] = json!([{ "day": "Monday", "temp": "hot", "condition": "Hazy" }]);
        let err = validate(&report).unwrap_err();
        assert!(err.contains("forecast[0].temp"));
    }

    #[test]
    fn unknown_fields_never_fail_validation() {
        let mut report = full_report();
        report["dewPoint"] = json!(21.5);
        report["pollution"]["so2"] = json!(8.0);
        assert!(validate(&report).is_ok());
    }

    #[test]
    fn empty_object_reports_a_missing_field() {
        let err = validate(&json!({})).unwrap_err();
        assert!(err.contains("missing required field"));
    }
}
