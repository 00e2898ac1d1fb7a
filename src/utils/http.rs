// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use url::Url;

use crate::error::Result;
use crate::models::ClientConfig;

/// Create a configured asynchronous HTTP client.
///
/// Without `timeout_secs` the client waits for the transport to finish or fail.
pub fn create_client(config: &ClientConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .cookie_store(config.send_cookies);
    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }
    Ok(builder.build()?)
}

/// Join an origin and an absolute path as `{origin}{path}`.
pub fn endpoint(origin: &Url, path: &str) -> Result<Url> {
    let base = origin.as_str().trim_end_matches('/');
    Ok(Url::parse(&format!("{base}{path}"))?)
}
