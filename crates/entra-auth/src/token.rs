//! Authorization-code token exchange
//!
//! POSTs the code to the tenant's v2.0 token endpoint with client-secret
//! authentication. This is the only network call in the flow. Authorization
//! codes are single-use, so a failed exchange is terminal: the caller must
//! restart the flow for a fresh code; nothing here retries.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::Deserialize;
use tracing::warn;

use crate::authority::token_endpoint;
use crate::config::ClientConfig;
use crate::error::{Error, Result};

/// Response from the token endpoint.
///
/// `expires_in` is a delta in seconds from the response time; `expires_at`
/// converts it to an absolute unix timestamp for display.
#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
    /// Seconds until the access token expires (delta, not absolute)
    pub expires_in: u64,
    /// Scopes actually granted, space-separated. The endpoint omits this
    /// for some grant shapes, so it defaults to empty.
    #[serde(default)]
    pub scope: String,
}

impl TokenResponse {
    /// Absolute expiry as a unix timestamp in seconds.
    pub fn expires_at(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        now + self.expires_in
    }
}

/// Error body the token endpoint returns on failure.
#[derive(Debug, Deserialize)]
struct TokenErrorBody {
    error: String,
    #[serde(default)]
    error_description: String,
}

/// Exchange an authorization code for an access token.
///
/// The code must be non-empty; this is checked before any request is built,
/// so an empty code never reaches the network layer.
pub async fn exchange_code(
    client: &reqwest::Client,
    config: &ClientConfig,
    code: &str,
) -> Result<TokenResponse> {
    if code.trim().is_empty() {
        return Err(Error::EmptyCode);
    }

    let scope = config.scope_param();
    let response = client
        .post(token_endpoint(&config.authority, &config.tenant_id))
        .form(&[
            ("grant_type", "authorization_code"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.expose()),
            ("code", code),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("scope", scope.as_str()),
        ])
        .send()
        .await
        .map_err(|e| Error::Http(format!("token exchange request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| String::from("<no body>"));
        // Surface the provider's own error code and description when the
        // body has the standard shape; otherwise pass the raw body through.
        let detail = match serde_json::from_str::<TokenErrorBody>(&body) {
            Ok(e) if !e.error_description.is_empty() => {
                format!("{}: {}", e.error, e.error_description)
            }
            Ok(e) => e.error,
            Err(_) => body,
        };
        warn!(%status, "token exchange rejected by identity provider");
        return Err(Error::TokenExchange(format!(
            "token endpoint returned {status}: {detail}"
        )));
    }

    response
        .json::<TokenResponse>()
        .await
        .map_err(|e| Error::TokenExchange(format!("invalid token response: {e}")))
}
