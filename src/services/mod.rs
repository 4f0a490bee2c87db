//! Clients for the remote translation and speech-synthesis endpoints.
//!
//! Both use a blocking `reqwest` client that is built lazily on first use,
//! so construction is safe from async code and requests run on the blocking
//! pool.

pub mod speech;
pub mod translate;

use crate::errors::ServiceError;
use once_cell::sync::OnceCell;
use reqwest::blocking::{Client, Response};
use std::time::Duration;

/// Lazily built blocking HTTP client with a fixed request timeout.
#[derive(Debug)]
pub(crate) struct LazyClient {
    timeout: Duration,
    client: OnceCell<Client>,
}

impl LazyClient {
    pub(crate) fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            client: OnceCell::new(),
        }
    }

    pub(crate) fn get(&self, url: url::Url) -> Result<Response, ServiceError> {
        let client = self.client.get_or_try_init(|| {
            Client::builder()
                .timeout(self.timeout)
                .user_agent(concat!("insight-mcp/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| ServiceError::Http(format!("build client: {e}")))
        })?;
        let host = url.host_str().unwrap_or("").to_string();
        let resp = client
            .get(url)
            .send()
            .map_err(|e| ServiceError::Http(format!("connect {host}: {e}")))?;
        if !resp.status().is_success() {
            return Err(ServiceError::Http(format!(
                "status {} from {host}",
                resp.status()
            )));
        }
        Ok(resp)
    }
}

/// Join `base` and `path`, then append the query pairs.
pub(crate) fn endpoint(
    base: &str,
    path: &str,
    params: &[(&str, &str)],
) -> Result<url::Url, ServiceError> {
    let raw = format!("{}/{}", base.trim_end_matches('/'), path);
    url::Url::parse_with_params(&raw, params)
        .map_err(|e| ServiceError::Http(format!("invalid url {raw}: {e}")))
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_encodes_query() {
        let url = endpoint("http://localhost:1/", "translate_a/single", &[("q", "a b&c")])
            .unwrap();
        assert_eq!(url.path(), "/translate_a/single");
        assert_eq!(url.query(), Some("q=a+b%26c"));
    }

    #[test]
    fn endpoint_rejects_garbage_base() {
        assert!(matches!(
            endpoint("not a url", "x", &[]),
            Err(ServiceError::Http(_))
        ));
    }
}
