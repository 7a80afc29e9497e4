// src/fetch.rs
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue},
    Client, Url,
};

use crate::error::FetchError;

/// Raw page body plus the (2xx) status it came with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedBody {
    pub text: String,
    pub status: u16,
}

pub type FetchResult = Result<FetchedBody, FetchError>;

/// One GET, one attempt. Implementations must return within `timeout`.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for Arc<T> {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        (**self).fetch(url, timeout).await
    }
}

/// reqwest-backed fetcher. Identity headers are fixed at construction and
/// reused for every source.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> anyhow::Result<Self> {
        Self::with_headers(user_agent, std::iter::empty::<(String, String)>())
    }

    pub fn with_headers<I, K, V>(user_agent: &str, extra: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut headers = HeaderMap::new();
        for (k, v) in extra {
            let name = HeaderName::from_bytes(k.as_ref().as_bytes())?;
            headers.insert(name, HeaderValue::from_str(v.as_ref())?);
        }
        let client = Client::builder()
            .user_agent(user_agent)
            .default_headers(headers)
            .build()?;
        Ok(Self { client })
    }

    async fn get_text(&self, url: Url) -> FetchResult {
        let resp = self.client.get(url).send().await.map_err(classify)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status.as_u16()));
        }
        let text = resp.text().await.map_err(classify)?;
        Ok(FetchedBody {
            text,
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, timeout: Duration) -> FetchResult {
        if timeout.is_zero() {
            return Err(FetchError::InvalidRequest("timeout must be > 0".into()));
        }
        let parsed = Url::parse(url).map_err(|e| FetchError::InvalidRequest(e.to_string()))?;

        tracing::debug!(url = %parsed, timeout_ms = timeout.as_millis() as u64, "GET");
        // Bound the whole exchange, body included.
        match tokio::time::timeout(timeout, self.get_text(parsed)).await {
            Ok(res) => res,
            Err(_) => Err(FetchError::Timeout),
        }
    }
}

fn classify(e: reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn rejects_zero_timeout_and_bad_urls_without_sending() {
        let f = HttpFetcher::new("test-agent").unwrap();

        let err = f
            .fetch("http://127.0.0.1:9/", Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));

        let err = f
            .fetch("not a url", Duration::from_secs(1))
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidRequest(_)));
    }

    #[test]
    fn bad_extra_header_is_a_construction_error() {
        let res = HttpFetcher::with_headers("ua", [("bad header", "x")]);
        assert!(res.is_err());
    }
}
