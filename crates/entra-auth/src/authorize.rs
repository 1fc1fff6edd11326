//! Authorization URL construction
//!
//! Builds the browser URL that starts the authorization-code grant. URL
//! construction is pure string formatting; no network I/O happens until the
//! token exchange. The `state` parameter is an opaque random value the
//! authorization server echoes back unchanged in the redirect.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::RngExt;

use crate::authority::authorize_endpoint;
use crate::config::ClientConfig;

/// Generate a random CSRF state value.
///
/// 32 random bytes encoded as URL-safe base64 (no padding), 43 characters.
pub fn generate_state() -> String {
    let mut bytes = [0u8; 32];
    rand::rng().fill(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Build the full authorization URL with all required OAuth parameters.
///
/// Encodes the client ID, redirect URI, and requested scopes from the
/// configuration under the tenant's v2.0 authorize endpoint.
pub fn build_authorization_url(config: &ClientConfig, state: &str) -> String {
    format!(
        "{}?client_id={}&response_type=code&redirect_uri={}&response_mode=query&scope={}&state={}",
        authorize_endpoint(&config.authority, &config.tenant_id),
        config.client_id,
        urlencoded(&config.redirect_uri),
        urlencoded(&config.scope_param()),
        state,
    )
}

/// Minimal URL encoding for parameter values.
/// Only encodes characters that would break URL parameter parsing.
fn urlencoded(s: &str) -> String {
    s.replace(' ', "%20")
        .replace(':', "%3A")
        .replace('/', "%2F")
}
