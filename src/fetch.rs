//! Response producers for the normalization core.
//!
//! The core only ever sees a response body; retries, auth and rate limiting
//! are not handled here.

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::config::HttpConfig;
use crate::error::{PitchsideError, Result};
use crate::providers::ProviderRequest;

/// Produces the raw body for a provider request
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<u8>>;
}

/// Live HTTP fetcher
#[derive(Clone)]
pub struct HttpFetcher {
    http: Client,
}

impl HttpFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()?;
        Ok(Self { http })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<u8>> {
        debug!(match_id = %request.match_id, url = %request.url, "fetching");
        let resp = self.http.get(request.url.clone()).send().await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(PitchsideError::HttpStatus {
                status: status.as_u16(),
                url: request.url.to_string(),
            });
        }

        let body = resp.bytes().await?;
        debug!(match_id = %request.match_id, bytes = body.len(), "fetched");
        Ok(body.to_vec())
    }
}

/// Reads saved responses from `<dir>/<provider>/match-<id>.<ext>`
#[derive(Debug, Clone)]
pub struct FixtureFetcher {
    dir: PathBuf,
}

impl FixtureFetcher {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, request: &ProviderRequest) -> PathBuf {
        self.dir.join(request.kind.as_str()).join(format!(
            "match-{}.{}",
            request.match_id,
            request.kind.fixture_extension()
        ))
    }
}

#[async_trait]
impl Fetcher for FixtureFetcher {
    async fn fetch(&self, request: &ProviderRequest) -> Result<Vec<u8>> {
        let path = self.path_for(request);
        debug!(match_id = %request.match_id, path = %path.display(), "reading fixture");
        let body = tokio::fs::read(&path)
            .await
            .with_context(|| format!("reading fixture {}", path.display()))?;
        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::ProviderKind;
    use url::Url;

    fn request(kind: ProviderKind, id: &str) -> ProviderRequest {
        ProviderRequest {
            kind,
            match_id: id.to_string(),
            url: Url::parse("https://example.invalid/").unwrap(),
        }
    }

    #[test]
    fn test_fixture_paths() {
        let fetcher = FixtureFetcher::new("tests/data");
        assert_eq!(
            fetcher.path_for(&request(ProviderKind::Understat, "22256")),
            PathBuf::from("tests/data/understat/match-22256.html")
        );
        assert_eq!(
            fetcher.path_for(&request(ProviderKind::Fotmob, "4193490")),
            PathBuf::from("tests/data/fotmob/match-4193490.json")
        );
    }

    #[tokio::test]
    async fn test_fixture_fetch_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("fotmob")).unwrap();
        std::fs::write(dir.path().join("fotmob/match-1.json"), b"{}").unwrap();

        let fetcher = FixtureFetcher::new(dir.path());
        let body = fetcher.fetch(&request(ProviderKind::Fotmob, "1")).await.unwrap();
        assert_eq!(body, b"{}");
    }

    #[tokio::test]
    async fn test_missing_fixture_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher = FixtureFetcher::new(dir.path());
        let err = fetcher
            .fetch(&request(ProviderKind::Understat, "404"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("match-404.html"));
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new(&HttpConfig::default()).is_ok());
    }
}
