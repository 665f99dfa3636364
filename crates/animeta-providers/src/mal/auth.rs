use crate::error::ProviderError;
use crate::token::TokenGrant;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

const TOKEN_URL: &str = "https://myanimelist.net/v1/oauth2/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: u64,
}

fn default_expires_in() -> u64 {
    3600
}

/// Client-credentials token exchange. Only called when a client secret is
/// configured; the catalog endpoints work with the client-id header alone.
pub async fn request_token(
    http: &Client,
    client_id: &str,
    client_secret: &str,
) -> Result<TokenGrant, ProviderError> {
    let response = http
        .post(TOKEN_URL)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ])
        .send()
        .await?;

    let status = response.status();
    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
        return Err(ProviderError::Auth {
            provider: "mal",
            detail: format!("token endpoint returned {}", status),
        });
    }
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status { status: status.as_u16(), body });
    }

    let token: TokenResponse = serde_json::from_str(&response.text().await?)?;
    Ok(TokenGrant { access_token: token.access_token, expires_in: token.expires_in })
}
