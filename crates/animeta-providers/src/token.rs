use crate::error::ProviderError;
use chrono::{DateTime, Duration, Utc};
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Tokens are refreshed this many seconds before the upstream says they
/// expire, so a token handed out at the edge of its lifetime is still
/// accepted.
const EXPIRY_SKEW_SECS: i64 = 60;

/// Time source injected into the token cache so expiry is deterministic
/// under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A fresh client-credentials grant as the upstream returned it.
#[derive(Debug, Clone)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

/// Per-provider OAuth token cache. Lazily populated, never invalidated
/// except by expiry. One instance per authenticated adapter; the cache is
/// injected rather than kept as ambient module state.
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
    clock: Arc<dyn Clock>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self { slot: Mutex::new(None), clock }
    }

    /// Returns the cached token while it is still fresh, otherwise awaits
    /// `refresh` and caches the result. The slot lock is held across the
    /// refresh so concurrent callers never race two token requests.
    pub async fn get<F, Fut>(&self, refresh: F) -> Result<String, ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TokenGrant, ProviderError>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref() {
            if self.clock.now() < cached.expires_at {
                tracing::debug!("using cached token (expires at {})", cached.expires_at);
                return Ok(cached.access_token.clone());
            }
            tracing::debug!("cached token expired, refreshing");
        }

        let grant = refresh().await?;
        let expires_at =
            self.clock.now() + Duration::seconds(grant.expires_in as i64 - EXPIRY_SKEW_SECS);
        let token = grant.access_token.clone();
        *slot = Some(CachedToken { access_token: grant.access_token, expires_at });
        Ok(token)
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct ManualClock {
        now: std::sync::Mutex<DateTime<Utc>>,
    }

    impl ManualClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self { now: std::sync::Mutex::new(now) })
        }

        fn advance(&self, seconds: i64) {
            let mut now = self.now.lock().unwrap();
            *now += Duration::seconds(seconds);
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn epoch() -> DateTime<Utc> {
        chrono::TimeZone::with_ymd_and_hms(&Utc, 2024, 1, 1, 0, 0, 0).unwrap()
    }

    #[tokio::test]
    async fn second_get_reuses_cached_token() {
        let clock = ManualClock::at(epoch());
        let cache = TokenCache::with_clock(clock);
        let refreshes = AtomicUsize::new(0);

        for _ in 0..3 {
            let token = cache
                .get(|| async {
                    refreshes.fetch_add(1, Ordering::SeqCst);
                    Ok(TokenGrant { access_token: "tok-1".into(), expires_in: 3600 })
                })
                .await
                .unwrap();
            assert_eq!(token, "tok-1");
        }
        assert_eq!(refreshes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn token_refreshes_inside_skew_window() {
        let clock = ManualClock::at(epoch());
        let cache = TokenCache::with_clock(clock.clone());

        cache
            .get(|| async { Ok(TokenGrant { access_token: "tok-1".into(), expires_in: 3600 }) })
            .await
            .unwrap();

        // 3600s lifetime minus 60s skew: at 3550s the token counts as stale.
        clock.advance(3550);
        let token = cache
            .get(|| async { Ok(TokenGrant { access_token: "tok-2".into(), expires_in: 3600 }) })
            .await
            .unwrap();
        assert_eq!(token, "tok-2");
    }

    #[tokio::test]
    async fn refresh_failure_leaves_slot_empty() {
        let clock = ManualClock::at(epoch());
        let cache = TokenCache::with_clock(clock);

        let result = cache
            .get(|| async {
                Err(ProviderError::Auth { provider: "mal", detail: "bad secret".into() })
            })
            .await;
        assert!(matches!(result, Err(ProviderError::Auth { .. })));

        // The next call refreshes again rather than serving a phantom token.
        let token = cache
            .get(|| async { Ok(TokenGrant { access_token: "tok-1".into(), expires_in: 3600 }) })
            .await
            .unwrap();
        assert_eq!(token, "tok-1");
    }
}
