//! eLicznik collector.
//!
//! Logs in to the Tauron eLicznik portal (which has no public API),
//! retrieves one day's aggregate consumption/production chart and the
//! meter readings log, validates both against what was requested, and
//! prints the results as JSON.
//!
//! One invocation is one run: authenticate, fetch, validate, print. The
//! portal is slow and flaky, so every response is cross-checked — the
//! server will happily answer with data for the wrong day — and all
//! failures are typed so a caller can decide to retry with a different
//! day offset.

mod config;
mod elicznik;
mod error;
mod model;

#[cfg(test)]
mod test_utils;

use crate::elicznik::{
    chart_day, fetch_daily_chart, fetch_readings_page, parse_readings, validate_daily_chart,
    Client,
};
use anyhow::Result;
use chrono::Local;

#[tokio::main]
async fn main() {
    let app_config = config::load_app_config().expect("Failed to load AppConfig");
    tracing_subscriber::fmt()
        .with_max_level(app_config.log_level())
        .init();

    let collector_config =
        config::load_collector_config().expect("Failed to load CollectorConfig");
    let elicznik_config = config::load_elicznik_config().expect("Failed to load ElicznikConfig");
    let client = Client::new(elicznik_config).expect("Failed to build portal client");

    let today = Local::now().date_naive();
    if let Err(e) = run(&client, collector_config.days_ago, today).await {
        tracing::error!("Collection run failed: {:?}", e);
        std::process::exit(1);
    }
}

/// One collection run: login, daily chart, readings log.
///
/// Strictly sequential; each call completes before the next starts, and
/// the session from the login is used for everything that follows.
async fn run(client: &Client, days_ago: u32, today: chrono::NaiveDate) -> Result<()> {
    let session = client.login().await?;
    tracing::info!("Logged in to the portal");

    let day = chart_day(today, days_ago);
    let raw = fetch_daily_chart(&session, day).await?;
    let stat = validate_daily_chart(&raw, days_ago, today)?;
    tracing::info!(
        "Daily chart for {}: consumption {} kWh, production {} kWh",
        stat.date,
        stat.consumption_kwh,
        stat.production_kwh
    );
    println!("{}", serde_json::to_string_pretty(&stat)?);

    let page = fetch_readings_page(&session).await?;
    let readings = parse_readings(&page);
    tracing::info!("Parsed {} register readings", readings.len());
    println!("{}", serde_json::to_string_pretty(&readings)?);

    Ok(())
}
