//! Per-provider pipelines sharing one request/parse contract.

pub mod de;
pub mod fotmob;
pub mod understat;

pub use fotmob::Fotmob;
pub use understat::Understat;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::Game;
use crate::error::Result;
use crate::normalize::NormalizeOptions;

/// Supported data providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    Understat,
    Fotmob,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Understat => "understat",
            Self::Fotmob => "fotmob",
        }
    }

    /// Extension of saved fixture pages for this provider
    pub fn fixture_extension(&self) -> &'static str {
        match self {
            Self::Understat => "html",
            Self::Fotmob => "json",
        }
    }

    /// Build the pipeline for one match
    pub fn provider(
        &self,
        match_id: &str,
        base_url: &str,
        options: NormalizeOptions,
    ) -> Box<dyn Provider> {
        match self {
            Self::Understat => Box::new(Understat::new(match_id, options).with_base_url(base_url)),
            Self::Fotmob => Box::new(Fotmob::new(match_id, options).with_base_url(base_url)),
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The GET a fetcher has to issue for one match
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    pub kind: ProviderKind,
    pub match_id: String,
    pub url: Url,
}

impl ProviderRequest {
    pub fn method(&self) -> &'static str {
        "GET"
    }
}

/// One provider's extractor -> resolver -> normalizer -> assembler chain
pub trait Provider: Send + Sync {
    fn kind(&self) -> ProviderKind;

    fn match_id(&self) -> &str;

    fn request(&self) -> Result<ProviderRequest>;

    /// Normalize a fetched response body into a [`Game`]
    fn parse(&self, body: &[u8]) -> Result<Game>;
}

pub(crate) fn join_url(base_url: &str, path: &str) -> std::result::Result<Url, url::ParseError> {
    let base = format!("{}/", base_url.trim_end_matches('/'));
    Url::parse(&base)?.join(path.trim_start_matches('/'))
}
