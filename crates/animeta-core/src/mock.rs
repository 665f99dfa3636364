//! Placeholder provider over the bundled dataset.
//!
//! Terminates every fallback chain. None of its operations can fail, and
//! every record it emits from a list operation carries a synthesized
//! `"{base}_{index}"` id so downstream consumers can always tell
//! placeholder output from live data.

use crate::dataset::bundled_records;
use animeta_models::{
    canonical_genre_name, canonical_genres, AnimeRecord, BrowseQuery, Genre, Page,
    MOCK_ID_SEPARATOR,
};
use animeta_providers::{AnimeProvider, ProviderError};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

pub struct MockProvider {
    records: Vec<AnimeRecord>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self { records: bundled_records() }
    }

    /// First bundled record, the last-resort featured pick.
    pub fn first_record(&self) -> AnimeRecord {
        self.records[0].clone()
    }

    fn tag_ids(records: Vec<AnimeRecord>) -> Vec<AnimeRecord> {
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                let tagged = format!("{}{}{}", record.id, MOCK_ID_SEPARATOR, index);
                record.with_id(tagged)
            })
            .collect()
    }

    /// Resolves an id against the dataset. Separator ids match on their
    /// base and keep the requested id in the returned record, so a record
    /// handed out by a list operation round-trips through a detail lookup.
    pub fn lookup(&self, id: &str) -> Option<AnimeRecord> {
        if let Some(record) = self.records.iter().find(|r| r.id == id) {
            return Some(record.clone());
        }
        if let Some((base, _)) = id.split_once(MOCK_ID_SEPARATOR) {
            return self
                .records
                .iter()
                .find(|r| r.id == base)
                .map(|r| r.clone().with_id(id));
        }
        // Lenient numeric match for live ids that happen to collide with a
        // bundled one.
        let numeric: i64 = id.parse().ok()?;
        self.records
            .iter()
            .find(|r| r.id.parse::<i64>() == Ok(numeric))
            .map(|r| r.clone())
    }

    /// Deterministic browse synthesis: filter, then cycle the filtered set
    /// until one page past the requested one exists, re-tagging ids with
    /// the running index and suffixing titles with the batch number from
    /// the second cycle on.
    fn paginate(&self, query: &BrowseQuery) -> Page<AnimeRecord> {
        let mut filtered: Vec<AnimeRecord> = self.records.clone();

        if let Some(genre_id) = query.genre {
            if let Some(term) = canonical_genre_name(genre_id) {
                let term = term.to_lowercase();
                filtered.retain(|record| record.genres.iter().any(|g| g.contains(&term)));
            }
        }
        if let Some(status) = query.status {
            match status {
                animeta_models::AiringStatus::Airing => {
                    filtered.retain(|record| record.is_new_release)
                }
                animeta_models::AiringStatus::Finished => {
                    filtered.retain(|record| !record.is_new_release)
                }
                animeta_models::AiringStatus::Upcoming => {}
            }
        }
        // A filter that empties the set falls back to the whole dataset
        // rather than an empty page. Inherited behavior.
        if filtered.is_empty() {
            filtered = self.records.clone();
        }

        let limit = query.limit.max(1) as usize;
        let page = query.page.max(1) as usize;
        let needed = page * limit + limit;
        let mut rows: Vec<AnimeRecord> = Vec::with_capacity(needed + filtered.len());
        while rows.len() < needed {
            let batch_start = rows.len();
            let batch_number = (batch_start + filtered.len() - 1) / filtered.len();
            for (index, record) in filtered.iter().enumerate() {
                let mut row = record.clone();
                if batch_start > 0 {
                    row.title = format!("{} {}", row.title, batch_number);
                }
                let id = format!("{}{}{}", row.id, MOCK_ID_SEPARATOR, batch_start + index);
                rows.push(row.with_id(id));
            }
        }

        let last_page = ((rows.len() + limit - 1) / limit) as u32;
        let start = (page - 1) * limit;
        let records: Vec<AnimeRecord> =
            rows.into_iter().skip(start).take(limit).collect();
        Page::new(records, page as u32, last_page)
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnimeProvider for MockProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn details(
        &self,
        id: &str,
        _cancel: &CancellationToken,
    ) -> Result<Option<AnimeRecord>, ProviderError> {
        Ok(self.lookup(id))
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
        _cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        let needle = query.to_lowercase();
        let matches: Vec<AnimeRecord> = self
            .records
            .iter()
            .filter(|record| {
                record.title.to_lowercase().contains(&needle)
                    || record.description.to_lowercase().contains(&needle)
                    || record.genres.iter().any(|g| g.contains(&needle))
            })
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(Self::tag_ids(matches))
    }

    async fn trending(
        &self,
        limit: u32,
        _cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        let matches: Vec<AnimeRecord> = self
            .records
            .iter()
            .filter(|record| record.is_trending)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(Self::tag_ids(matches))
    }

    async fn new_releases(
        &self,
        limit: u32,
        _cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        let matches: Vec<AnimeRecord> = self
            .records
            .iter()
            .filter(|record| record.is_new_release)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(Self::tag_ids(matches))
    }

    async fn browse(
        &self,
        query: &BrowseQuery,
        _cancel: &CancellationToken,
    ) -> Result<Page<AnimeRecord>, ProviderError> {
        Ok(self.paginate(query))
    }

    async fn genres(&self, _cancel: &CancellationToken) -> Result<Vec<Genre>, ProviderError> {
        Ok(canonical_genres())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animeta_models::{AiringStatus, SortDirection, SortKey};

    fn cancel() -> CancellationToken {
        CancellationToken::new()
    }

    fn browse_query(page: u32, limit: u32) -> BrowseQuery {
        BrowseQuery {
            page,
            limit,
            sort: SortKey::Score,
            direction: SortDirection::Desc,
            genre: None,
            status: None,
            min_score: None,
            max_score: None,
            season: None,
            year: None,
        }
    }

    #[test]
    fn provider_name_marks_mock_output() {
        assert_eq!(MockProvider::new().name(), "mock");
    }

    #[tokio::test]
    async fn list_operations_always_tag_ids() {
        let provider = MockProvider::new();
        let trending = provider.trending(5, &cancel()).await.unwrap();
        assert_eq!(trending.len(), 5);
        assert!(trending.iter().all(|r| r.is_mock()));

        let found = provider.search("titan", 10, &cancel()).await.unwrap();
        assert!(!found.is_empty());
        assert!(found.iter().all(|r| r.is_mock()));
    }

    #[tokio::test]
    async fn search_matches_title_description_and_genres() {
        let provider = MockProvider::new();
        let by_genre = provider.search("mecha", 10, &cancel()).await.unwrap();
        assert!(by_genre.iter().any(|r| r.title.contains("Code Geass")));

        let by_description = provider.search("shinigami", 10, &cancel()).await.unwrap();
        assert!(by_description.iter().any(|r| r.title == "Death Note"));

        assert!(provider.search("zzzzz", 10, &cancel()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn pagination_is_exact_and_idempotent() {
        let provider = MockProvider::new();
        let first = provider.browse(&browse_query(2, 24), &cancel()).await.unwrap();
        let second = provider.browse(&browse_query(2, 24), &cancel()).await.unwrap();
        assert_eq!(first.records.len(), 24);
        assert_eq!(first, second);
        assert_eq!(first.current_page, 2);
        assert!(first.last_page >= 3);
        assert!(first.records.iter().all(|r| r.is_mock()));
    }

    #[tokio::test]
    async fn pages_do_not_overlap() {
        let provider = MockProvider::new();
        let page1 = provider.browse(&browse_query(1, 10), &cancel()).await.unwrap();
        let page2 = provider.browse(&browse_query(2, 10), &cancel()).await.unwrap();
        let ids1: Vec<&str> = page1.records.iter().map(|r| r.id.as_str()).collect();
        assert!(page2.records.iter().all(|r| !ids1.contains(&r.id.as_str())));
    }

    #[tokio::test]
    async fn cycled_titles_carry_batch_numbers() {
        let provider = MockProvider::new();
        // 20 base records, page 2 of 24 starts inside the second cycle.
        let page = provider.browse(&browse_query(2, 24), &cancel()).await.unwrap();
        assert!(page.records.iter().any(|r| r.title.ends_with(" 1")));
    }

    #[tokio::test]
    async fn empty_genre_filter_falls_back_to_unfiltered() {
        let provider = MockProvider::new();
        let mut query = browse_query(1, 10);
        // Josei: present in the catalog, absent from every bundled record.
        query.genre = Some(20);
        let page = provider.browse(&query, &cancel()).await.unwrap();
        assert_eq!(page.records.len(), 10);
    }

    #[tokio::test]
    async fn genre_and_status_filters_apply() {
        let provider = MockProvider::new();
        let mut query = browse_query(1, 10);
        query.genre = Some(14);
        let page = provider.browse(&query, &cancel()).await.unwrap();
        assert!(page.records.iter().all(|r| r.genres.iter().any(|g| g.contains("mecha"))));

        let mut query = browse_query(1, 10);
        query.status = Some(AiringStatus::Airing);
        let page = provider.browse(&query, &cancel()).await.unwrap();
        assert!(page.records.iter().all(|r| r.is_new_release));
    }

    #[tokio::test]
    async fn detail_lookup_honors_separator_ids() {
        let provider = MockProvider::new();
        let record = provider.details("1535_3", &cancel()).await.unwrap().unwrap();
        assert_eq!(record.id, "1535_3");
        assert_eq!(record.title, "Death Note");

        let base = provider.details("1535", &cancel()).await.unwrap().unwrap();
        assert_eq!(base.id, "1535");
        assert!(provider.details("999999", &cancel()).await.unwrap().is_none());
    }
}
