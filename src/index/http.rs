//! HTTP client used to fetch the index document

use crate::core::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use std::time::Duration;

/// Build a client with the given timeout that never serves a cached index.
///
/// Proxy environment variables (HTTP_PROXY, HTTPS_PROXY, NO_PROXY) are
/// honoured through reqwest's system proxy support.
pub fn client_with_timeout(timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache, no-store"));
    headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

    let client = Client::builder()
        .timeout(timeout)
        .default_headers(headers)
        .user_agent(concat!("dsfind/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
