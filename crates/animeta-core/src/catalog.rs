//! The aggregator: the provider chain plus the placeholder terminal.

use crate::chain::run_chain;
use crate::mock::MockProvider;
use animeta_config::Config;
use animeta_models::{AnimeRecord, BrowseQuery, Genre, Page, MOCK_ID_SEPARATOR};
use animeta_providers::{AnimeProvider, ProviderError, ProviderRegistry};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Facade over the whole provider stack. Every public operation walks the
/// live chain and finishes on the bundled dataset, so apart from
/// cancellation nothing here can fail; the worst case is placeholder
/// output.
pub struct Catalog {
    providers: Vec<Box<dyn AnimeProvider>>,
    fallback: MockProvider,
}

impl Catalog {
    pub fn from_config(config: &Config) -> Self {
        Self::new(ProviderRegistry::build(config))
    }

    pub fn new(providers: Vec<Box<dyn AnimeProvider>>) -> Self {
        Self { providers, fallback: MockProvider::new() }
    }

    /// The hero record: top trending result, or the first bundled record
    /// when even the placeholder trending list is somehow empty.
    pub async fn featured(
        &self,
        cancel: &CancellationToken,
    ) -> Result<AnimeRecord, ProviderError> {
        let mut trending = self.trending(1, cancel).await?;
        if trending.is_empty() {
            return Ok(self.fallback.first_record());
        }
        Ok(trending.remove(0))
    }

    pub async fn trending(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        let outcome =
            run_chain(&self.providers, "trending", cancel, |p| p.trending(limit, cancel)).await?;
        match outcome.value {
            Some(records) => Ok(records),
            None => {
                info!("every live provider missed trending, serving placeholder data");
                self.fallback.trending(limit, cancel).await
            }
        }
    }

    pub async fn new_releases(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        let outcome =
            run_chain(&self.providers, "new_releases", cancel, |p| p.new_releases(limit, cancel))
                .await?;
        match outcome.value {
            Some(records) => Ok(records),
            None => {
                info!("every live provider missed new releases, serving placeholder data");
                self.fallback.new_releases(limit, cancel).await
            }
        }
    }

    /// An empty query is an empty success; no provider is consulted.
    pub async fn search(
        &self,
        query: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let outcome =
            run_chain(&self.providers, "search", cancel, |p| p.search(query, limit, cancel))
                .await?;
        match outcome.value {
            Some(records) => Ok(records),
            None => {
                info!(query, "search missed every live provider, serving placeholder data");
                self.fallback.search(query, limit, cancel).await
            }
        }
    }

    pub async fn browse(
        &self,
        query: &BrowseQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<AnimeRecord>, ProviderError> {
        let outcome =
            run_chain(&self.providers, "browse", cancel, |p| p.browse(query, cancel)).await?;
        match outcome.value {
            Some(page) => Ok(page),
            None => {
                info!("browse missed every live provider, synthesizing placeholder page");
                self.fallback.browse(query, cancel).await
            }
        }
    }

    /// First provider with a non-empty genre list wins; the canonical
    /// catalog is the terminal answer.
    pub async fn genres(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Genre>, ProviderError> {
        let outcome = run_chain(&self.providers, "genres", cancel, |p| p.genres(cancel)).await?;
        match outcome.value {
            Some(genres) => Ok(genres),
            None => self.fallback.genres(cancel).await,
        }
    }

    /// Detail lookup. Separator ids are placeholder output by definition
    /// and never touch the live chain; a live miss on a numeric id still
    /// gets a shot at the bundled dataset before resolving to `None`.
    pub async fn details(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<AnimeRecord>, ProviderError> {
        if id.contains(MOCK_ID_SEPARATOR) {
            debug!(id, "separator id, resolving against bundled dataset");
            return Ok(self.fallback.lookup(id));
        }
        let outcome =
            run_chain(&self.providers, "details", cancel, |p| p.details(id, cancel)).await?;
        if let Some(record) = outcome.value.flatten() {
            debug!(id, provider = outcome.log.winner().unwrap_or("none"), "detail resolved");
            return Ok(Some(record));
        }
        Ok(self.fallback.lookup(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animeta_models::{IMAGE_PLACEHOLDER, UNKNOWN_RATING};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn record(id: &str, title: &str) -> AnimeRecord {
        AnimeRecord {
            id: id.to_string(),
            title: title.to_string(),
            description: "desc".to_string(),
            short_description: "desc".to_string(),
            thumbnail: IMAGE_PLACEHOLDER.to_string(),
            background_image: IMAGE_PLACEHOLDER.to_string(),
            video_url: None,
            year: 2024,
            rating: UNKNOWN_RATING.to_string(),
            episodes: 12,
            genres: vec!["action".to_string()],
            is_new_release: false,
            is_trending: true,
        }
    }

    enum Behavior {
        Records(Vec<AnimeRecord>),
        Empty,
        Fail,
    }

    struct StubProvider {
        label: &'static str,
        behavior: Behavior,
        calls: Arc<AtomicUsize>,
    }

    impl StubProvider {
        fn new(label: &'static str, behavior: Behavior) -> (Box<dyn AnimeProvider>, Arc<AtomicUsize>) {
            let calls = Arc::new(AtomicUsize::new(0));
            (Box::new(Self { label, behavior, calls: calls.clone() }), calls)
        }

        fn list_result(&self) -> Result<Vec<AnimeRecord>, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.behavior {
                Behavior::Records(records) => Ok(records.clone()),
                Behavior::Empty => Ok(Vec::new()),
                Behavior::Fail => Err(ProviderError::Status { status: 503, body: String::new() }),
            }
        }
    }

    #[async_trait]
    impl AnimeProvider for StubProvider {
        fn name(&self) -> &'static str {
            self.label
        }

        async fn details(
            &self,
            _id: &str,
            _cancel: &CancellationToken,
        ) -> Result<Option<AnimeRecord>, ProviderError> {
            Ok(self.list_result()?.into_iter().next())
        }

        async fn search(
            &self,
            _query: &str,
            _limit: u32,
            _cancel: &CancellationToken,
        ) -> Result<Vec<AnimeRecord>, ProviderError> {
            self.list_result()
        }

        async fn trending(
            &self,
            _limit: u32,
            _cancel: &CancellationToken,
        ) -> Result<Vec<AnimeRecord>, ProviderError> {
            self.list_result()
        }

        async fn new_releases(
            &self,
            _limit: u32,
            _cancel: &CancellationToken,
        ) -> Result<Vec<AnimeRecord>, ProviderError> {
            self.list_result()
        }

        async fn browse(
            &self,
            query: &BrowseQuery,
            _cancel: &CancellationToken,
        ) -> Result<Page<AnimeRecord>, ProviderError> {
            Ok(Page::new(self.list_result()?, query.page, query.page))
        }

        async fn genres(&self, _cancel: &CancellationToken) -> Result<Vec<Genre>, ProviderError> {
            let records = self.list_result()?;
            Ok(records
                .iter()
                .enumerate()
                .map(|(i, r)| Genre::new(i as u32 + 1, r.title.clone()))
                .collect())
        }
    }

    fn cancel() -> CancellationToken {
        CancellationToken::new()
    }

    #[tokio::test]
    async fn healthy_primary_short_circuits_the_chain() {
        let (primary, primary_calls) =
            StubProvider::new("primary", Behavior::Records(vec![record("1", "One")]));
        let (secondary, secondary_calls) =
            StubProvider::new("secondary", Behavior::Records(vec![record("2", "Two")]));
        let catalog = Catalog::new(vec![primary, secondary]);

        let records = catalog.trending(10, &cancel()).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "1");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn failed_primary_falls_through_in_order() {
        let (primary, _) = StubProvider::new("primary", Behavior::Fail);
        let (secondary, secondary_calls) =
            StubProvider::new("secondary", Behavior::Records(vec![record("2", "Two")]));
        let (tertiary, tertiary_calls) =
            StubProvider::new("tertiary", Behavior::Records(vec![record("3", "Three")]));
        let catalog = Catalog::new(vec![primary, secondary, tertiary]);

        let records = catalog.trending(10, &cancel()).await.unwrap();
        assert_eq!(records[0].id, "2");
        assert_eq!(secondary_calls.load(Ordering::SeqCst), 1);
        assert_eq!(tertiary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn empty_success_counts_as_try_next() {
        let (primary, primary_calls) = StubProvider::new("primary", Behavior::Empty);
        let five: Vec<AnimeRecord> =
            (1..=5).map(|i| record(&i.to_string(), "Stub")).collect();
        let (secondary, _) = StubProvider::new("secondary", Behavior::Records(five));
        let catalog = Catalog::new(vec![primary, secondary]);

        let records = catalog.trending(5, &cancel()).await.unwrap();
        assert_eq!(records.len(), 5);
        assert!(records.iter().all(|r| r.is_trending));
        assert_eq!(primary_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn all_failures_end_on_tagged_placeholder_data() {
        let (primary, _) = StubProvider::new("primary", Behavior::Fail);
        let (secondary, _) = StubProvider::new("secondary", Behavior::Fail);
        let (tertiary, _) = StubProvider::new("tertiary", Behavior::Fail);
        let catalog = Catalog::new(vec![primary, secondary, tertiary]);

        let records = catalog.trending(8, &cancel()).await.unwrap();
        assert_eq!(records.len(), 8);
        assert!(records.iter().all(|r| r.is_mock()));
    }

    #[tokio::test]
    async fn empty_search_query_touches_no_provider() {
        let (primary, primary_calls) =
            StubProvider::new("primary", Behavior::Records(vec![record("1", "One")]));
        let catalog = Catalog::new(vec![primary]);

        let records = catalog.search("", 10, &cancel()).await.unwrap();
        assert!(records.is_empty());
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn separator_id_details_bypass_the_live_chain() {
        let (primary, primary_calls) =
            StubProvider::new("primary", Behavior::Records(vec![record("1", "Live")]));
        let catalog = Catalog::new(vec![primary]);

        let record = catalog.details("1535_3", &cancel()).await.unwrap().unwrap();
        assert_eq!(record.id, "1535_3");
        assert_eq!(record.title, "Death Note");
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn live_detail_miss_falls_back_to_numeric_dataset_match() {
        let (primary, _) = StubProvider::new("primary", Behavior::Fail);
        let catalog = Catalog::new(vec![primary]);

        let record = catalog.details("1535", &cancel()).await.unwrap().unwrap();
        assert_eq!(record.title, "Death Note");
        assert!(catalog.details("424242", &cancel()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn genres_fall_back_to_the_canonical_catalog() {
        let (primary, _) = StubProvider::new("primary", Behavior::Empty);
        let catalog = Catalog::new(vec![primary]);

        let genres = catalog.genres(&cancel()).await.unwrap();
        assert_eq!(genres.len(), 20);
        assert_eq!(genres[0], Genre::new(1, "Action"));
    }

    #[tokio::test]
    async fn featured_is_the_top_trending_record() {
        let (primary, _) = StubProvider::new(
            "primary",
            Behavior::Records(vec![record("7", "Headliner"), record("8", "Runner-up")]),
        );
        let catalog = Catalog::new(vec![primary]);

        let featured = catalog.featured(&cancel()).await.unwrap();
        assert_eq!(featured.title, "Headliner");
    }

    #[tokio::test]
    async fn cancelled_token_aborts_instead_of_serving_stale_data() {
        let (primary, primary_calls) =
            StubProvider::new("primary", Behavior::Records(vec![record("1", "One")]));
        let catalog = Catalog::new(vec![primary]);

        let token = CancellationToken::new();
        token.cancel();
        let result = catalog.trending(5, &token).await;
        assert!(matches!(result, Err(ProviderError::Cancelled)));
        assert_eq!(primary_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn attempt_log_records_failures_and_the_winner() {
        use crate::chain::{run_chain, AttemptState};

        let token = cancel();
        let (primary, _) = StubProvider::new("primary", Behavior::Fail);
        let (secondary, _) = StubProvider::new("secondary", Behavior::Empty);
        let (tertiary, _) =
            StubProvider::new("tertiary", Behavior::Records(vec![record("3", "Three")]));
        let providers = vec![primary, secondary, tertiary];

        let outcome = run_chain(&providers, "trending", &token, |p| p.trending(5, &token))
            .await
            .unwrap();
        assert_eq!(outcome.log.winner(), Some("tertiary"));
        let states: Vec<AttemptState> =
            outcome.log.attempts().iter().map(|a| a.state).collect();
        assert_eq!(
            states,
            vec![AttemptState::Failed, AttemptState::Failed, AttemptState::Succeeded]
        );
        assert_eq!(outcome.log.attempts()[1].detail.as_deref(), Some("empty result"));
    }

    #[tokio::test]
    async fn browse_synthesis_when_chain_is_exhausted() {
        let (primary, _) = StubProvider::new("primary", Behavior::Fail);
        let catalog = Catalog::new(vec![primary]);

        let query = BrowseQuery { page: 1, limit: 12, ..Default::default() };
        let page = catalog.browse(&query, &cancel()).await.unwrap();
        assert_eq!(page.records.len(), 12);
        assert!(page.records.iter().all(|r| r.is_mock()));
    }
}
