use crate::error::ProviderError;
use crate::genre_map::GenreMapping;
use crate::http::read_body;
use crate::kitsu::{api, auth};
use crate::token::TokenCache;
use crate::traits::{with_cancel, AnimeProvider};
use animeta_models::{AnimeRecord, BrowseQuery, Genre, Page};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const BASE_URL: &str = "https://kitsu.io/api/edge";
const MEDIA_TYPE: &str = "application/vnd.api+json";

/// Tertiary provider: JSON:API with bracketed query parameters and
/// sideloaded genre resources. Works anonymously; client credentials are
/// optional and only raise the rate limit.
pub struct KitsuClient {
    http: Client,
    client_id: String,
    client_secret: String,
    tokens: TokenCache,
    genre_mapping: GenreMapping,
}

impl KitsuClient {
    pub fn new(client_id: String, client_secret: String) -> Self {
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!("animeta/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            client_id,
            client_secret,
            tokens: TokenCache::new(),
            genre_mapping: GenreMapping::new(),
        }
    }

    pub(crate) fn genre_mapping(&self) -> &GenreMapping {
        &self.genre_mapping
    }

    fn has_credentials(&self) -> bool {
        !self.client_id.is_empty() && !self.client_secret.is_empty()
    }

    /// A bearer token when credentials are configured and the token
    /// endpoint cooperates. Token failures degrade to anonymous access
    /// rather than failing the request.
    async fn bearer(&self, cancel: &CancellationToken) -> Result<Option<String>, ProviderError> {
        if !self.has_credentials() {
            return Ok(None);
        }
        let result = with_cancel(
            cancel,
            self.tokens
                .get(|| auth::request_token(&self.http, &self.client_id, &self.client_secret)),
        )
        .await;
        match result {
            Ok(token) => Ok(Some(token)),
            Err(ProviderError::Cancelled) => Err(ProviderError::Cancelled),
            Err(err) => {
                warn!(error = %err, "kitsu token request failed, continuing anonymously");
                Ok(None)
            }
        }
    }

    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<T, ProviderError> {
        let url = Url::parse_with_params(&format!("{}{}", BASE_URL, path), params)
            .map_err(|e| ProviderError::Malformed(format!("invalid request url: {}", e)))?;
        let bearer = self.bearer(cancel).await?;

        let body = with_cancel(cancel, async {
            debug!(url = %url, "kitsu request");
            let mut request = self
                .http
                .get(url.clone())
                .header("Accept", MEDIA_TYPE)
                .header("Content-Type", MEDIA_TYPE);
            if let Some(token) = bearer.as_deref() {
                request = request.bearer_auth(token);
            }
            let response = request.send().await?;
            read_body(response, "kitsu").await
        })
        .await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl AnimeProvider for KitsuClient {
    fn name(&self) -> &'static str {
        "kitsu"
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
