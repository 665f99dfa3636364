use crate::error::ProviderError;
use reqwest::{Response, StatusCode};

/// Map a response to its body text or the matching error variant. Shared
/// by every adapter so status taxonomy stays consistent.
pub(crate) async fn read_body(
    response: Response,
    provider: &'static str,
) -> Result<String, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.text().await?);
    }
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::Auth {
            provider,
            detail: format!("upstream returned {}", status),
        });
    }
    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get("Retry-After")
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.parse().ok());
        return Err(ProviderError::RateLimited { retry_after });
    }
    let body = response.text().await.unwrap_or_default();
    let snippet: String = body.chars().take(200).collect();
    Err(ProviderError::Status { status: status.as_u16(), body: snippet })
}
