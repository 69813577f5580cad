use crate::config::ElicznikConfig;
use crate::elicznik::transport::legacy_tls_client;
use crate::error::PortalError;
use reqwest::Client as HttpClient;
use std::time::Duration;

pub struct Client {
    http_client: HttpClient,
    config: ElicznikConfig,
}

impl Client {
    pub fn new(config: ElicznikConfig) -> Result<Self, PortalError> {
        let http_client = legacy_tls_client(Duration::from_secs(config.timeout_sec))?;
        Ok(Self {
            http_client,
            config,
        })
    }

    /// Logs in to the portal and returns a session for subsequent requests.
    ///
    /// The login endpoint must be POSTed twice with the identical payload:
    /// the first submission only sets a pre-authentication cookie, and the
    /// session becomes usable after the second. A single submission does
    /// not authenticate.
    ///
    /// The portal reports nothing on wrong credentials — both submissions
    /// come back 200 regardless. Bad credentials surface later, when the
    /// chart or readings responses fail validation.
    pub async fn login(&self) -> Result<Session, PortalError> {
        self.submit_login().await?;
        self.submit_login().await?;

        Ok(Session {
            http_client: self.http_client.clone(),
            config: self.config.clone(),
        })
    }

    async fn submit_login(&self) -> Result<(), PortalError> {
        let payload = [
            ("username", self.config.username.as_str()),
            ("password", self.config.password.as_str()),
            ("service", self.config.service_url.as_str()),
        ];
        let response = self
            .http_client
            .post(&self.config.login_url)
            .form(&payload)
            .send()
            .await?;
        read_body(response).await.map(|_| ())
    }
}

/// Authenticated portal session, valid for one collection run.
///
/// The authentication state lives in the cookie store of the underlying
/// HTTP client; the portal communicates no expiry, so the session is
/// treated as valid until a request fails.
#[derive(Debug)]
pub struct Session {
    http_client: HttpClient,
    config: ElicznikConfig,
}

impl Session {
    pub(crate) async fn get(&self, path: &str) -> Result<String, PortalError> {
        let url = format!("{}{}", self.config.service_url, path);
        let response = self.http_client.get(&url).send().await?;
        read_body(response).await
    }

    pub(crate) async fn post_form(
        &self,
        path: &str,
        form: &[(&str, String)],
    ) -> Result<String, PortalError> {
        let url = format!("{}{}", self.config.service_url, path);
        let response = self.http_client.post(&url).form(form).send().await?;
        read_body(response).await
    }

    pub(crate) fn meter_id(&self) -> u64 {
        self.config.meter_id
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, PortalError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(PortalError::server_error(status, body))
    }
}
