use crate::error::ApiError;
use chrono::NaiveDate;
use core_types::Observation;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// FRED's marker for a period with no value.
const MISSING_VALUE: &str = ".";

/// The response from a successful `GET /series/observations` request.
#[derive(Debug, Clone, Deserialize)]
pub struct ObservationsResponse {
    pub observations: Vec<RawObservation>,
    // There are more fields (realtime_start, units, count, ...), but the
    // observations are all we need.
}

/// A single observation as FRED sends it: both fields are strings.
#[derive(Debug, Clone, Deserialize)]
pub struct RawObservation {
    pub date: String,
    pub value: String,
}

/// Represents an error response from the FRED API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error_code: u16,
    pub error_message: String,
}

impl ObservationsResponse {
    /// Converts the raw observations, dropping periods that have no usable value.
    pub fn into_observations(self) -> Result<Vec<Observation>, ApiError> {
        let mut observations = Vec::with_capacity(self.observations.len());

        for raw in self.observations {
            let date = NaiveDate::parse_from_str(&raw.date, "%Y-%m-%d").map_err(|e| {
                ApiError::InvalidData(format!("Invalid observation date '{}': {}", raw.date, e))
            })?;

            let value = raw.value.trim();
            if value.is_empty() || value == MISSING_VALUE {
                continue;
            }

            match Decimal::from_str(value).or_else(|_| Decimal::from_scientific(value)) {
                Ok(value) => observations.push(Observation::new(date, value)),
                Err(e) => {
                    tracing::warn!(%date, value, error = %e, "Dropping unparseable observation.");
                }
            }
        }

        Ok(observations)
    }
}

impl ApiErrorResponse {
    /// Maps a FRED error body onto our error taxonomy.
    pub fn into_api_error(self, series_id: &str) -> ApiError {
        if self
            .error_message
            .to_ascii_lowercase()
            .contains("series does not exist")
        {
            ApiError::UnknownSeriesId(series_id.to_string())
        } else {
            ApiError::ProviderUnavailable(format!(
                "FRED error {}: {}",
                self.error_code, self.error_message
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_are_dropped() {
        let body = r#"{
            "realtime_start": "2026-10-14",
            "count": 4,
            "observations": [
                {"realtime_start": "2026-10-14", "realtime_end": "2026-10-14", "date": "2024-01-01", "value": "308.417"},
                {"realtime_start": "2026-10-14", "realtime_end": "2026-10-14", "date": "2024-02-01", "value": "."},
                {"realtime_start": "2026-10-14", "realtime_end": "2026-10-14", "date": "2024-03-01", "value": "310.326"},
                {"realtime_start": "2026-10-14", "realtime_end": "2026-10-14", "date": "2024-04-01", "value": "n/a"}
            ]
        }"#;

        let response: ObservationsResponse = serde_json::from_str(body).unwrap();
        let observations = response.into_observations().unwrap();

        assert_eq!(observations.len(), 2);
        assert_eq!(observations[0].date.to_string(), "2024-01-01");
        assert_eq!(observations[0].value, Decimal::from_str("308.417").unwrap());
        assert_eq!(observations[1].date.to_string(), "2024-03-01");
    }

    #[test]
    fn malformed_dates_are_invalid_data() {
        let response = ObservationsResponse {
            observations: vec![RawObservation {
                date: "Jan 2024".to_string(),
                value: "1.0".to_string(),
            }],
        };
        assert!(matches!(
            response.into_observations(),
            Err(ApiError::InvalidData(_))
        ));
    }

    #[test]
    fn error_bodies_are_classified() {
        let unknown: ApiErrorResponse = serde_json::from_str(
            r#"{"error_code": 400, "error_message": "Bad Request.  The series does not exist."}"#,
        )
        .unwrap();
        assert_eq!(
            unknown.into_api_error("NOPE"),
            ApiError::UnknownSeriesId("NOPE".to_string())
        );

        let bad_key: ApiErrorResponse = serde_json::from_str(
            r#"{"error_code": 400, "error_message": "Bad Request.  The value for variable api_key is not registered."}"#,
        )
        .unwrap();
        assert!(matches!(
            bad_key.into_api_error("GDP"),
            ApiError::ProviderUnavailable(_)
        ));
    }
}
