//! Helpers for the date formats the portal speaks.
//!
//! The portal uses two textual formats: plain `DD.MM.YYYY` dates in chart
//! request parameters and at the tail of chart labels, and
//! `DD.MM.YYYY (HH:MM:SS)` timestamps on the readings page.

use crate::error::ValidationError;
use chrono::{NaiveDate, NaiveDateTime};

/// Chart-day format, e.g. "01.02.2023".
pub const CHART_DATE_FORMAT: &str = "%d.%m.%Y";

/// Reading timestamp format, e.g. "01.02.2023 (10:00:00)".
pub const READING_TIMESTAMP_FORMAT: &str = "%d.%m.%Y (%H:%M:%S)";

/// Formats a date the way the chart endpoint expects it.
pub fn format_chart_date(date: NaiveDate) -> String {
    date.format(CHART_DATE_FORMAT).to_string()
}

/// Extracts the date from the trailing ten characters of a chart label.
///
/// Chart labels end in the chart day, e.g.
/// "Energia pobrana [kWh] - 01.02.2023". Labels are not guaranteed ASCII,
/// so the tail is cut on character boundaries.
///
/// # Arguments
///
/// * `field` - Name of the payload field, for the error message
/// * `label` - The label text as served
pub fn parse_label_date(field: &str, label: &str) -> Result<NaiveDate, ValidationError> {
    let start = label
        .char_indices()
        .rev()
        .nth(9)
        .map(|(i, _)| i)
        .ok_or_else(|| {
            ValidationError::parse_failure(field, format!("label '{}' too short to end in a date", label))
        })?;
    NaiveDate::parse_from_str(&label[start..], CHART_DATE_FORMAT)
        .map_err(|e| ValidationError::parse_failure(field, e))
}

/// Parses a readings-page timestamp, returning None for any other text.
pub fn parse_reading_timestamp(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, READING_TIMESTAMP_FORMAT).ok()
}
