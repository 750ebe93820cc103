//! Fetch + parse for one or many matches.
//!
//! Each match runs an independent pipeline that owns its payload, so batches
//! fan out over a `JoinSet` without any shared mutable state.

use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::ProvidersConfig;
use crate::domain::Game;
use crate::error::{PitchsideError, Result};
use crate::fetch::Fetcher;
use crate::normalize::NormalizeOptions;
use crate::providers::{Provider, ProviderKind};

const DEFAULT_MAX_CONCURRENCY: usize = 4;

pub struct Pipeline<F> {
    fetcher: Arc<F>,
    providers: ProvidersConfig,
    options: NormalizeOptions,
    max_concurrency: usize,
}

impl<F: Fetcher + 'static> Pipeline<F> {
    pub fn new(fetcher: F, providers: ProvidersConfig, options: NormalizeOptions) -> Self {
        Self {
            fetcher: Arc::new(fetcher),
            providers,
            options,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
        }
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn provider(&self, kind: ProviderKind, match_id: &str) -> Box<dyn Provider> {
        kind.provider(match_id, self.providers.base_url(kind), self.options)
    }

    pub async fn run(&self, kind: ProviderKind, match_id: &str) -> Result<Game> {
        let provider = self.provider(kind, match_id);
        fetch_and_parse(self.fetcher.as_ref(), provider.as_ref()).await
    }

    /// Process several matches concurrently; results keep the order of `match_ids`.
    pub async fn run_many(
        &self,
        kind: ProviderKind,
        match_ids: &[String],
    ) -> Vec<(String, Result<Game>)> {
        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = JoinSet::new();

        for (idx, match_id) in match_ids.iter().enumerate() {
            let fetcher = Arc::clone(&self.fetcher);
            let permits = Arc::clone(&permits);
            let provider = self.provider(kind, match_id);
            tasks.spawn(async move {
                let outcome = match permits.acquire_owned().await {
                    Ok(_permit) => fetch_and_parse(fetcher.as_ref(), provider.as_ref()).await,
                    Err(e) => Err(PitchsideError::Other(e.into())),
                };
                (idx, outcome)
            });
        }

        let mut results: Vec<Option<Result<Game>>> = match_ids.iter().map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((idx, outcome)) => results[idx] = Some(outcome),
                Err(e) => warn!("match task failed: {}", e),
            }
        }

        match_ids
            .iter()
            .cloned()
            .zip(results)
            .map(|(match_id, outcome)| {
                let outcome = outcome.unwrap_or_else(|| {
                    Err(PitchsideError::Other(anyhow::anyhow!(
                        "task for match {match_id} did not complete"
                    )))
                });
                (match_id, outcome)
            })
            .collect()
    }
}

async fn fetch_and_parse<F: Fetcher + ?Sized>(fetcher: &F, provider: &dyn Provider) -> Result<Game> {
    let request = provider.request()?;
    info!(provider = %provider.kind(), match_id = provider.match_id(), url = %request.url, "processing match");

    let body = fetcher.fetch(&request).await?;
    let game = provider.parse(&body)?;

    info!(
        provider = %provider.kind(),
        match_id = provider.match_id(),
        events = game.events.len(),
        skipped = game.skipped.len(),
        "match normalized"
    );
    Ok(game)
}
