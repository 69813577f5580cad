use anyhow::{anyhow, Result};
use serde_derive::Deserialize;
use std::str::FromStr;

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl AppConfig {
    pub fn log_level(&self) -> tracing::Level {
        tracing::Level::from_str(self.log_level.as_str()).unwrap_or(tracing::Level::INFO)
    }
}

pub(crate) fn load_app_config() -> Result<AppConfig> {
    match envy::from_env::<AppConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load AppConfig: {}", err)),
    }
}

fn default_login_url() -> String {
    "https://logowanie.tauron-dystrybucja.pl/login".to_string()
}

fn default_service_url() -> String {
    "https://elicznik.tauron-dystrybucja.pl".to_string()
}

// The portal is slow; requests regularly take tens of seconds.
fn default_timeout_sec() -> u64 {
    60
}

#[derive(Deserialize, Debug, Clone)]
pub struct ElicznikConfig {
    pub username: String,
    pub password: String,
    pub meter_id: u64,
    #[serde(default = "default_login_url")]
    pub login_url: String,
    #[serde(default = "default_service_url")]
    pub service_url: String,
    #[serde(default = "default_timeout_sec")]
    pub timeout_sec: u64,
}

pub(crate) fn load_elicznik_config() -> Result<ElicznikConfig> {
    match envy::prefixed("ELICZNIK_").from_env::<ElicznikConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load ElicznikConfig: {}", err)),
    }
}

// 1 = yesterday, the most recent day the portal can have closed out.
fn default_days_ago() -> u32 {
    1
}

#[derive(Deserialize, Debug)]
pub struct CollectorConfig {
    #[serde(default = "default_days_ago")]
    pub days_ago: u32,
}

pub fn load_collector_config() -> Result<CollectorConfig> {
    match envy::prefixed("COLLECTOR_").from_env::<CollectorConfig>() {
        Ok(config) => Ok(config),
        Err(err) => Err(anyhow!("Failed to load CollectorConfig: {}", err)),
    }
}
