//! Sequential fallback chain over the provider list.
//!
//! One logical query walks the providers in configured order and stops at
//! the first that produces a non-empty result. Provider failures are
//! demoted to "try the next one"; only cancellation crosses this boundary.

use animeta_models::{AnimeRecord, Genre, Page};
use animeta_providers::{AnimeProvider, ProviderError};
use futures::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttemptState {
    #[default]
    NotTried,
    Trying,
    Succeeded,
    Failed,
}

/// One provider's slot in the walk.
#[derive(Debug)]
pub struct Attempt {
    pub provider: &'static str,
    pub state: AttemptState,
    /// Error display, or "empty result" when the provider answered with
    /// nothing usable.
    pub detail: Option<String>,
}

/// Per-query record of which providers were consulted and how each fared.
/// Diagnostic only; it never influences the next attempt.
#[derive(Debug, Default)]
pub struct AttemptLog {
    attempts: Vec<Attempt>,
}

impl AttemptLog {
    fn for_providers(providers: &[Box<dyn AnimeProvider>]) -> Self {
        Self {
            attempts: providers
                .iter()
                .map(|p| Attempt {
                    provider: p.name(),
                    state: AttemptState::NotTried,
                    detail: None,
                })
                .collect(),
        }
    }

    fn set(&mut self, index: usize, state: AttemptState, detail: Option<String>) {
        if let Some(attempt) = self.attempts.get_mut(index) {
            attempt.state = state;
            attempt.detail = detail;
        }
    }

    pub fn attempts(&self) -> &[Attempt] {
        &self.attempts
    }

    /// Name of the provider that answered, when one did.
    pub fn winner(&self) -> Option<&'static str> {
        self.attempts
            .iter()
            .find(|a| a.state == AttemptState::Succeeded)
            .map(|a| a.provider)
    }
}

/// Result of walking the chain: the winning value, if any provider
/// produced one, plus the attempt record.
pub struct ChainOutcome<T> {
    pub value: Option<T>,
    pub log: AttemptLog,
}

/// Distinguishes "answered with nothing" from a real answer. Empty
/// success falls through to the next provider just like failure does.
pub trait ChainValue {
    fn is_empty_value(&self) -> bool;
}

impl ChainValue for Vec<AnimeRecord> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl ChainValue for Option<AnimeRecord> {
    fn is_empty_value(&self) -> bool {
        self.is_none()
    }
}

impl ChainValue for Page<AnimeRecord> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl ChainValue for Vec<Genre> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

/// Walks the providers strictly in order, one in flight at a time. The
/// only error that propagates is `Cancelled`; everything else is logged
/// and converted into a step to the next provider.
pub async fn run_chain<'a, T, F>(
    providers: &'a [Box<dyn AnimeProvider>],
    operation: &str,
    cancel: &CancellationToken,
    mut attempt: F,
) -> Result<ChainOutcome<T>, ProviderError>
where
    T: ChainValue,
    F: FnMut(&'a dyn AnimeProvider) -> BoxFuture<'a, Result<T, ProviderError>>,
{
    let mut log = AttemptLog::for_providers(providers);
    for (index, provider) in providers.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ProviderError::Cancelled);
        }
        log.set(index, AttemptState::Trying, None);
        match attempt(provider.as_ref()).await {
            Ok(value) if value.is_empty_value() => {
                info!(provider = provider.name(), operation, "empty result, trying next");
                log.set(index, AttemptState::Failed, Some("empty result".to_string()));
            }
            Ok(value) => {
                info!(provider = provider.name(), operation, "provider succeeded");
                log.set(index, AttemptState::Succeeded, None);
                return Ok(ChainOutcome { value: Some(value), log });
            }
            Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
            Err(err) => {
                warn!(provider = provider.name(), operation, error = %err, "provider failed, trying next");
                log.set(index, AttemptState::Failed, Some(err.to_string()));
            }
        }
    }
    if !log.attempts().is_empty() {
        let tried: Vec<&str> = log.attempts().iter().map(|a| a.provider).collect();
        warn!(operation, tried = ?tried, "every provider exhausted");
    }
    Ok(ChainOutcome { value: None, log })
}
