use crate::error::ProviderError;
use animeta_models::{AnimeRecord, BrowseQuery, Genre, Page};
use async_trait::async_trait;
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// One upstream anime-metadata service, normalized to the shared record
/// shape. The aggregator only ever talks to this trait.
///
/// Every operation takes the caller's cancellation token so a view that
/// goes away can abort its in-flight chain instead of receiving a stale
/// response.
#[async_trait]
pub trait AnimeProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Single record lookup. A missing id is `Ok(None)`, not an error.
    async fn details(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<AnimeRecord>, ProviderError>;

    async fn search(
        &self,
        query: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError>;

    async fn trending(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError>;

    async fn new_releases(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError>;

    async fn browse(
        &self,
        query: &BrowseQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<AnimeRecord>, ProviderError>;

    async fn genres(&self, cancel: &CancellationToken) -> Result<Vec<Genre>, ProviderError>;
}

/// Race a provider future against the caller's cancellation token.
pub async fn with_cancel<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    tokio::select! {
        _ = cancel.cancelled() => Err(ProviderError::Cancelled),
        result = fut => result,
    }
}
