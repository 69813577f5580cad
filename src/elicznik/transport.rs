//! HTTP transport shared by every portal request.

use crate::error::PortalError;
use reqwest::Client as HttpClient;
use std::time::Duration;

/// The portal serves a bot wall to unrecognized clients; this UA is known
/// to pass.
const USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 6.1; WOW64; rv:52.0) Gecko/20100101 Firefox/52.0";

/// Builds the HTTP client used for all portal traffic.
///
/// The login server terminates TLS on hardware that cannot complete a
/// handshake under current platform defaults, so the minimum accepted
/// protocol version is lowered here. This is the only place the downgrade
/// lives; deleting the `min_tls_version` line restores default negotiation
/// once the portal modernizes.
///
/// The cookie store carries the session across the two login submissions
/// and into the chart/readings requests. The timeout is caller-supplied
/// because the portal is known to be slow.
pub fn legacy_tls_client(timeout: Duration) -> Result<HttpClient, PortalError> {
    HttpClient::builder()
        .user_agent(USER_AGENT)
        .cookie_store(true)
        .timeout(timeout)
        .min_tls_version(reqwest::tls::Version::TLS_1_0)
        .build()
        .map_err(PortalError::Http)
}
