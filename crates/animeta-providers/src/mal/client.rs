use crate::error::ProviderError;
use crate::http::read_body;
use crate::mal::{api, auth};
use crate::relay::RelayRotation;
use crate::token::TokenCache;
use crate::traits::{with_cancel, AnimeProvider};
use animeta_config::FetchOptions;
use animeta_models::{canonical_genres, AnimeRecord, BrowseQuery, Genre, Page};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

const BASE_URL: &str = "https://api.myanimelist.net/v2";

/// Primary provider: MyAnimeList-style REST with query-string filters and
/// offset pagination. Authenticates with a client-id header on every
/// request; when a client secret is configured a cached client-credentials
/// bearer token is attached as well.
pub struct MalClient {
    http: Client,
    client_id: String,
    client_secret: String,
    tokens: TokenCache,
    relays: RelayRotation,
    max_retries: u32,
    retry_delay_ms: u64,
}

impl MalClient {
    pub fn new(client_id: String, client_secret: String, fetch: &FetchOptions) -> Self {
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
            relays: RelayRotation::new(),
            max_retries: fetch.max_retries,
            retry_delay_ms: fetch.retry_delay_ms,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.client_id.is_empty()
    }

    async fn bearer(&self, cancel: &CancellationToken) -> Result<Option<String>, ProviderError> {
        if self.client_secret.is_empty() {
            return Ok(None);
        }
        let token = with_cancel(
            cancel,
            self.tokens
                .get(|| auth::request_token(&self.http, &self.client_id, &self.client_secret)),
        )
        .await?;
        Ok(Some(token))
    }

    /// GET with retry on rate limits and 5xx, and a CORS-relay detour when
    /// the request dies without an HTTP response.
    pub(crate) async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
        cancel: &CancellationToken,
    ) -> Result<T, ProviderError> {
        if !self.is_configured() {
            return Err(ProviderError::Unavailable("mal"));
        }
        let url = Url::parse_with_params(&format!("{}{}", BASE_URL, path), params)
            .map_err(|e| ProviderError::Malformed(format!("invalid request url: {}", e)))?;
        let bearer = self.bearer(cancel).await?;

        let mut attempt: u32 = 0;
        loop {
            debug!(url = %url, attempt = attempt + 1, "mal request");
            let result = with_cancel(cancel, self.send_once(url.clone(), bearer.as_deref())).await;
            match result {
                Ok(body) => return Ok(serde_json::from_str(&body)?),
                Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
                Err(err) if err.is_cors_like() => {
                    debug!(url = %url, "transport failure without a response, trying CORS relays");
                    match self.get_via_relays(url.as_str(), cancel).await {
                        Ok(body) => return Ok(serde_json::from_str(&body)?),
                        Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
                        Err(relay_err) => {
                            debug!(error = %relay_err, "all relays failed");
                            return Err(err);
                        }
                    }
                }
                Err(err) if err.is_retryable() && attempt < self.max_retries => {
                    let delay = Duration::from_millis(self.retry_delay_ms * 2u64.pow(attempt));
                    warn!(url = %url, error = %err, delay_ms = delay.as_millis() as u64, "retrying");
                    with_cancel(cancel, async {
                        sleep(delay).await;
                        Ok(())
                    })
                    .await?;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    async fn send_once(&self, url: Url, bearer: Option<&str>) -> Result<String, ProviderError> {
        let mut request = self
            .http
            .get(url)
            .header("X-MAL-CLIENT-ID", &self.client_id)
            .header("Accept", "application/json");
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;
        read_body(response, "mal").await
    }

    async fn get_via_relays(
        &self,
        target: &str,
        cancel: &CancellationToken,
    ) -> Result<String, ProviderError> {
        let mut last_error: Option<ProviderError> = None;
        for relay_url in self.relays.relay_urls(target) {
            debug!(relay = %relay_url, "relay attempt");
            let result = with_cancel(cancel, async {
                let response = self
                    .http
                    .get(&relay_url)
                    .header("X-MAL-CLIENT-ID", &self.client_id)
                    .header("Accept", "application/json")
                    .send()
                    .await?;
                read_body(response, "mal").await
            })
            .await;
            match result {
                Ok(body) => return Ok(body),
                Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
                Err(err) => {
                    debug!(relay = %relay_url, error = %err, "relay attempt failed");
                    last_error = Some(err);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| ProviderError::Malformed("no relays available".into())))
    }
}

#[async_trait]
impl AnimeProvider for MalClient {
    fn name(&self) -> &'static str {
        "mal"
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

    /// The upstream has no genre-list endpoint; the fixed catalog stands in
    /// for it and never fails.
    async fn genres(&self, _cancel: &CancellationToken) -> Result<Vec<Genre>, ProviderError> {
        Ok(canonical_genres())
    }
}
