//! Daily aggregate chart: request, raw payload, validation.

use crate::elicznik::client::Session;
use crate::elicznik::helper::{format_chart_date, parse_label_date};
use crate::error::{Result, ValidationError};
use crate::model::DailyStat;
use chrono::{Days, NaiveDate};
use serde_derive::Deserialize;

const CHART_PATH: &str = "/index/charts";

/// Chart payload as served, before any validation.
///
/// Every field is optional: the portal omits keys freely, and an absence
/// must become a typed failure during validation rather than a decode
/// error here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDailyChart {
    /// Consumption chart label, ending in the chart day
    pub name: Option<String>,
    /// Renewable-production chart label, ending in its chart day
    #[serde(rename = "OZEName")]
    pub oze_name: Option<String>,
    /// Total consumption for the day, kWh
    pub sum: Option<f64>,
    /// Total renewable production for the day, kWh
    #[serde(rename = "OZEValue")]
    pub oze_value: Option<f64>,
    /// Whether the portal considers the day fully recorded
    #[serde(rename = "isFull")]
    pub is_full: Option<bool>,
}

/// The day a chart request for `days_ago` refers to.
pub fn chart_day(today: NaiveDate, days_ago: u32) -> NaiveDate {
    today - Days::new(u64::from(days_ago))
}

/// Requests the daily chart for one day and decodes the payload.
///
/// Sends the same form the portal's own frontend submits: the chart day,
/// day-level aggregation, the meter number, and the flag asking for
/// renewable-production data alongside consumption.
pub async fn fetch_daily_chart(session: &Session, chart_day: NaiveDate) -> Result<RawDailyChart> {
    let form = [
        ("dane[chartDay]", format_chart_date(chart_day)),
        ("dane[paramType]", "day".to_string()),
        ("dane[smartNr]", session.meter_id().to_string()),
        ("dane[checkOZE]", "on".to_string()),
    ];
    let body = session.post_form(CHART_PATH, &form).await?;
    let raw = serde_json::from_str(&body)
        .map_err(|e| ValidationError::parse_failure("chart response body", e))?;
    Ok(raw)
}

/// Cross-checks a raw chart payload and normalizes it into a [`DailyStat`].
///
/// `today` is passed in rather than read from the clock so the staleness
/// check is deterministic under test.
///
/// Check order is fixed: missing or malformed fields fail first, then the
/// consumption/production date comparison, then completeness, then the
/// guard against the portal silently answering for the wrong day.
pub fn validate_daily_chart(
    raw: &RawDailyChart,
    days_ago: u32,
    today: NaiveDate,
) -> Result<DailyStat, ValidationError> {
    let consumption_label = raw
        .name
        .as_deref()
        .ok_or_else(|| ValidationError::missing_field("name"))?;
    let production_label = raw
        .oze_name
        .as_deref()
        .ok_or_else(|| ValidationError::missing_field("OZEName"))?;
    let consumption_date = parse_label_date("name", consumption_label)?;
    let production_date = parse_label_date("OZEName", production_label)?;
    let consumption_kwh = raw.sum.ok_or_else(|| ValidationError::missing_field("sum"))?;
    let production_kwh = raw
        .oze_value
        .ok_or_else(|| ValidationError::missing_field("OZEValue"))?;
    let is_full = raw
        .is_full
        .ok_or_else(|| ValidationError::missing_field("isFull"))?;

    if consumption_date != production_date {
        return Err(ValidationError::DateMismatch {
            consumption: consumption_date,
            production: production_date,
        });
    }
    if !is_full {
        return Err(ValidationError::IncompleteDay {
            date: consumption_date,
        });
    }
    let expected = chart_day(today, days_ago);
    if consumption_date != expected {
        return Err(ValidationError::StaleData {
            expected,
            actual: consumption_date,
        });
    }

    Ok(DailyStat {
        date: consumption_date,
        consumption_kwh,
        production_kwh,
        is_complete: true,
    })
}
