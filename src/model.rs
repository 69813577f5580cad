use chrono::{NaiveDate, NaiveDateTime};
use serde_derive::Serialize;
use std::fmt;

/// Meter channel a value belongs to.
///
/// The portal labels these "Pobór" (energy drawn from the grid) and
/// "Oddanie" (energy fed back into it).
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    /// Energy drawn from the grid
    Consumption,
    /// Energy fed back into the grid
    Production,
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Channel::Consumption => write!(f, "consumption"),
            Channel::Production => write!(f, "production"),
        }
    }
}

/// A single register reading reconstructed from the readings page.
///
/// The register value is the raw integer the meter displays, prior to any
/// unit conversion.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MeterReading {
    pub timestamp: NaiveDateTime,
    pub channel: Channel,
    pub register_value: u32,
}

/// Validated one-day aggregate for a meter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyStat {
    pub date: NaiveDate,
    pub consumption_kwh: f64,
    pub production_kwh: f64,
    pub is_complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_display() {
        assert_eq!(Channel::Consumption.to_string(), "consumption");
        assert_eq!(Channel::Production.to_string(), "production");
    }

    #[test]
    fn test_meter_reading_serializes_channel_lowercase() {
        let reading = MeterReading {
            timestamp: NaiveDate::from_ymd_opt(2023, 2, 1)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            channel: Channel::Production,
            register_value: 123456,
        };
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains(r#""channel":"production""#));
        assert!(json.contains(r#""register_value":123456"#));
    }
}
