//! Error types for the eLicznik collector.
//!
//! This module defines typed errors for the portal transport and for the
//! validation of what the portal returns, so callers can react to specific
//! failure causes instead of matching on strings.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias using our custom error types.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Top-level error type that encompasses all application errors.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("configuration error")]
    Config(#[from] ConfigError),

    /// Portal transport errors
    #[error("portal error")]
    Portal(#[from] PortalError),

    /// Response validation errors
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// Generic errors that don't fit other categories
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Configuration-related errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable parsing failed
    #[error("failed to parse environment variables: {0}")]
    EnvParse(String),

    /// Configuration value is invalid
    #[error("invalid configuration value for {field}: {message}")]
    Invalid { field: String, message: String },
}

/// Transport-level failures talking to the portal.
///
/// These are never retried; they propagate to the caller immediately.
/// Note that wrong credentials do NOT show up here — the login endpoint
/// answers 200 either way, and bad credentials only become visible as
/// [`ValidationError`]s on the responses that follow.
#[derive(Error, Debug)]
pub enum PortalError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status
    #[error("server error (status {status}): {message}")]
    ServerError { status: u16, message: String },
}

/// Failures validating a portal response against what was requested.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Expected field or pattern absent or malformed in a response
    #[error("failed to parse field '{field}': {message}")]
    ParseFailure { field: String, message: String },

    /// Consumption and production chart labels carry different dates
    #[error("consumption date {consumption} does not match production date {production}")]
    DateMismatch {
        consumption: NaiveDate,
        production: NaiveDate,
    },

    /// The portal has not finished recording the requested day
    #[error("day {date} is not complete yet")]
    IncompleteDay { date: NaiveDate },

    /// The portal silently answered with data for a different day
    #[error("server returned data for {actual}, expected {expected}")]
    StaleData {
        expected: NaiveDate,
        actual: NaiveDate,
    },
}

impl ConfigError {
    /// Creates a new environment parse error.
    pub fn env_parse(err: impl std::fmt::Display) -> Self {
        Self::EnvParse(err.to_string())
    }

    /// Creates a new invalid configuration error.
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl PortalError {
    /// Creates a server error from HTTP status and response body.
    pub fn server_error(status: reqwest::StatusCode, body: String) -> Self {
        Self::ServerError {
            status: status.as_u16(),
            message: body,
        }
    }
}

impl ValidationError {
    /// Creates a parse failure for a malformed field.
    pub fn parse_failure(field: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::ParseFailure {
            field: field.into(),
            message: err.to_string(),
        }
    }

    /// Creates a parse failure for a field the response did not carry.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::ParseFailure {
            field: field.into(),
            message: "field is missing".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    mod config_error {
        use super::*;

        #[test]
        fn test_env_parse_error() {
            let err = ConfigError::env_parse("invalid format");
            assert_eq!(
                err.to_string(),
                "failed to parse environment variables: invalid format"
            );
        }

        #[test]
        fn test_invalid_error() {
            let err = ConfigError::invalid("meter_id", "must be a number");
            assert_eq!(
                err.to_string(),
                "invalid configuration value for meter_id: must be a number"
            );
        }
    }

    mod portal_error {
        use super::*;

        #[test]
        fn test_server_error() {
            let err = PortalError::server_error(
                reqwest::StatusCode::SERVICE_UNAVAILABLE,
                "down for maintenance".to_string(),
            );
            assert_eq!(
                err.to_string(),
                "server error (status 503): down for maintenance"
            );
        }
    }

    mod validation_error {
        use super::*;

        #[test]
        fn test_parse_failure() {
            let err = ValidationError::parse_failure("sum", "not a number");
            assert_eq!(err.to_string(), "failed to parse field 'sum': not a number");
        }

        #[test]
        fn test_missing_field() {
            let err = ValidationError::missing_field("isFull");
            assert_eq!(
                err.to_string(),
                "failed to parse field 'isFull': field is missing"
            );
        }

        #[test]
        fn test_date_mismatch() {
            let err = ValidationError::DateMismatch {
                consumption: date(2023, 2, 1),
                production: date(2023, 2, 2),
            };
            assert_eq!(
                err.to_string(),
                "consumption date 2023-02-01 does not match production date 2023-02-02"
            );
        }

        #[test]
        fn test_incomplete_day() {
            let err = ValidationError::IncompleteDay {
                date: date(2023, 2, 1),
            };
            assert_eq!(err.to_string(), "day 2023-02-01 is not complete yet");
        }

        #[test]
        fn test_stale_data() {
            let err = ValidationError::StaleData {
                expected: date(2023, 2, 1),
                actual: date(2023, 1, 31),
            };
            assert_eq!(
                err.to_string(),
                "server returned data for 2023-01-31, expected 2023-02-01"
            );
        }
    }

    mod error_conversion {
        use super::*;

        #[test]
        fn test_config_error_conversion() {
            let config_err = ConfigError::env_parse("test");
            let err: Error = config_err.into();
            assert!(matches!(err, Error::Config(_)));
        }

        #[test]
        fn test_validation_error_conversion() {
            let validation_err = ValidationError::missing_field("name");
            let err: Error = validation_err.into();
            assert!(matches!(err, Error::Validation(_)));
        }

        #[test]
        fn test_anyhow_conversion() {
            let err = Error::Validation(ValidationError::missing_field("name"));
            let anyhow_err: anyhow::Error = err.into();
            assert!(anyhow_err.to_string().contains("validation error"));
        }
    }
}
