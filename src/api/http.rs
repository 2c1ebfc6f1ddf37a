use crate::config::Config;
use crate::error::FedpackError;
use std::time::Duration;

const USER_AGENT: &str = concat!("fedpack/", env!("CARGO_PKG_VERSION"));

/// Shared outbound HTTP client for Ship24 and the translation endpoints.
pub fn build_client(cfg: &Config) -> Result<reqwest::Client, FedpackError> {
    let mut builder = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(Duration::from_secs(5));
    if let Some(proxy_url) = cfg.proxy.as_ref() {
        builder = builder.proxy(reqwest::Proxy::all(proxy_url.as_str())?);
    }
    Ok(builder.build()?)
}
