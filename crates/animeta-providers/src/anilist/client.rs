use crate::error::ProviderError;
use crate::genre_map::GenreMapping;
use crate::http::read_body;
use crate::traits::{with_cancel, AnimeProvider};
use animeta_models::{AnimeRecord, BrowseQuery, Genre, Page};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::anilist::api;

const ENDPOINT: &str = "https://graphql.anilist.co";

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

/// Secondary provider: a single unauthenticated GraphQL endpoint with one
/// query document per operation.
pub struct AnilistClient {
    http: Client,
    genre_mapping: GenreMapping,
}

impl AnilistClient {
    pub fn new() -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("animeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self { http, genre_mapping: GenreMapping::new() }
    }

    pub(crate) fn genre_mapping(&self) -> &GenreMapping {
        &self.genre_mapping
    }

    /// POST a query document. GraphQL-level errors arrive inside a 200
    /// response and count as malformed payloads.
    pub(crate) async fn query<T: DeserializeOwned>(
        &self,
        document: &str,
        variables: Value,
        cancel: &CancellationToken,
    ) -> Result<T, ProviderError> {
        let body = json!({ "query": document, "variables": variables });
        let text = with_cancel(cancel, async {
            debug!("anilist query");
            let response = self.http.post(ENDPOINT).json(&body).send().await?;
            read_body(response, "anilist").await
        })
        .await?;

        let parsed: GraphQlResponse<T> = serde_json::from_str(&text)?;
        if let Some(errors) = parsed.errors {
            let message = errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(ProviderError::Malformed(format!("graphql errors: {}", message)));
        }
        parsed
            .data
            .ok_or_else(|| ProviderError::Malformed("graphql response carried no data".into()))
    }
}

impl Default for AnilistClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AnimeProvider for AnilistClient {
    fn name(&self) -> &'static str {
        "anilist"
    }

    async fn details(
        &self,
        id: &str,
        cancel: &CancellationToken,
    ) -> Result<Option<AnimeRecord>, ProviderError> {
        api::details(self, id, cancel).await
    }

    async fn search(
        &self,
        query: &str,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        api::search(self, query, limit, cancel).await
    }

    async fn trending(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        api::trending(self, limit, cancel).await
    }

    async fn new_releases(
        &self,
        limit: u32,
        cancel: &CancellationToken,
    ) -> Result<Vec<AnimeRecord>, ProviderError> {
        api::new_releases(self, limit, cancel).await
    }

    async fn browse(
        &self,
        query: &BrowseQuery,
        cancel: &CancellationToken,
    ) -> Result<Page<AnimeRecord>, ProviderError> {
        api::browse(self, query, cancel).await
    }

    async fn genres(&self, cancel: &CancellationToken) -> Result<Vec<Genre>, ProviderError> {
        api::genres(self, cancel).await
    }
}
