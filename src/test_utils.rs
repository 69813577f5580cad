//! Shared fixtures for unit tests.

use crate::config::ElicznikConfig;

/// Config pointing at a test server instead of the real portal.
pub fn test_config(login_url: String, service_url: String) -> ElicznikConfig {
    ElicznikConfig {
        username: "test_user".to_string(),
        password: "test_password".to_string(),
        meter_id: 123456789,
        login_url,
        service_url,
        timeout_sec: 5,
    }
}

/// Builder producing readings-page markup shaped like the portal output.
#[derive(Debug, Default)]
pub struct ReadingsPageBuilder {
    rows: Vec<String>,
}

impl ReadingsPageBuilder {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    /// Adds one complete reading row: label cell, timestamp cell, and the
    /// register value inside a span.
    pub fn add_reading(mut self, label: &str, timestamp: &str, value: &str) -> Self {
        self.rows.push(format!(
            r#"<tr><td>{}</td><td>{}</td><td><span>{}</span></td></tr>"#,
            label, timestamp, value
        ));
        self
    }

    /// Adds an arbitrary markup fragment verbatim.
    pub fn add_fragment(mut self, html: &str) -> Self {
        self.rows.push(html.to_string());
        self
    }

    pub fn build(self) -> String {
        format!(
            r#"<html><body><table>{}</table></body></html>"#,
            self.rows.concat()
        )
    }
}
