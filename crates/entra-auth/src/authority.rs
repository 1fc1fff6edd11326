//! Entra ID endpoint construction
//!
//! Azure public cloud authority only. Endpoints follow the v2.0 scheme
//! `https://login.microsoftonline.com/{tenant}/oauth2/v2.0/...`, where the
//! tenant segment is a directory (tenant) ID or a well-known alias such as
//! `organizations` or `common`. The authority base is a parameter so tests
//! can point the token exchange at a local mock endpoint.

/// Azure public cloud sign-in authority
pub const AZURE_PUBLIC_AUTHORITY: &str = "https://login.microsoftonline.com";

/// Redirect URI used when MSAL_REDIRECT_URI is unset
pub const DEFAULT_REDIRECT_URI: &str = "https://localhost";

/// v2.0 authorization endpoint for the given tenant
pub fn authorize_endpoint(authority: &str, tenant_id: &str) -> String {
    format!("{authority}/{tenant_id}/oauth2/v2.0/authorize")
}

/// v2.0 token endpoint for the given tenant
pub fn token_endpoint(authority: &str, tenant_id: &str) -> String {
    format!("{authority}/{tenant_id}/oauth2/v2.0/token")
}
