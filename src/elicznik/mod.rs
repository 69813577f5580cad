mod client;
mod daily_chart;
mod helper;
mod readings;
mod transport;

pub use client::{Client, Session};
pub use daily_chart::{chart_day, fetch_daily_chart, validate_daily_chart, RawDailyChart};
pub use readings::{fetch_readings_page, parse_readings};
