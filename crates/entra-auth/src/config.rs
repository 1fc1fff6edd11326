//! Client configuration loaded from the environment
//!
//! All values come from `MSAL_*` environment variables; the CLI seeds them
//! from a `.env` file in the working directory before calling `from_env`.
//! The client secret is wrapped in `common::Secret` so it never appears in
//! Debug output or log lines.

use common::Secret;

use crate::authority::{AZURE_PUBLIC_AUTHORITY, DEFAULT_REDIRECT_URI};

/// Confidential-client configuration for the authorization-code grant.
///
/// Immutable after construction; built once at process entry and passed by
/// reference into every operation, never read from ambient state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// OAuth2 client (application) ID
    pub client_id: String,
    /// Client secret proving this is a confidential client
    pub client_secret: Secret,
    /// Directory (tenant) ID or alias under the authority
    pub tenant_id: String,
    /// Redirect URI registered for the application
    pub redirect_uri: String,
    /// Requested scopes. Mirrors the single MSAL_SCOPE value: an unset
    /// variable still yields one empty entry, which the identity provider
    /// rejects at exchange time rather than here.
    pub scopes: Vec<String>,
    /// Authority base URL. Azure public cloud in production; tests point
    /// this at a local mock endpoint.
    pub authority: String,
}

impl ClientConfig {
    /// Read configuration from `MSAL_*` environment variables.
    ///
    /// Client ID, client secret, and tenant ID are required; missing,
    /// empty, or whitespace-only values fail here so the flow never
    /// reaches the network with partial credentials.
    pub fn from_env() -> common::Result<Self> {
        let client_id = require_env("MSAL_CLIENT_ID")?;
        let client_secret = Secret::new(require_env("MSAL_CLIENT_SECRET")?);
        let tenant_id = require_env("MSAL_TENANT_ID")?;
        let redirect_uri = std::env::var("MSAL_REDIRECT_URI")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_REDIRECT_URI.to_string());
        let scopes = vec![std::env::var("MSAL_SCOPE").unwrap_or_default()];

        Ok(Self {
            client_id,
            client_secret,
            tenant_id,
            redirect_uri,
            scopes,
            authority: AZURE_PUBLIC_AUTHORITY.to_string(),
        })
    }

    /// Space-separated scope string for URL and form parameters.
    pub fn scope_param(&self) -> String {
        self.scopes.join(" ")
    }
}

fn require_env(name: &str) -> common::Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(common::Error::Config(format!(
            "{name} not set in environment"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Mutex to serialize tests that mutate environment variables, preventing
    /// data races when tests run in parallel.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// SAFETY: Callers must hold ENV_MUTEX to prevent concurrent env mutation.
    unsafe fn set_env(key: &str, val: &str) {
        unsafe { std::env::set_var(key, val) };
    }

    unsafe fn remove_env(key: &str) {
        unsafe { std::env::remove_var(key) };
    }

    /// Populate a complete set of MSAL_* variables.
    unsafe fn set_valid_env() {
        unsafe {
            set_env("MSAL_CLIENT_ID", "11111111-2222-3333-4444-555555555555");
            set_env("MSAL_CLIENT_SECRET", "s3cret-value");
            set_env("MSAL_TENANT_ID", "contoso-tenant");
            set_env("MSAL_REDIRECT_URI", "https://localhost/callback");
            set_env("MSAL_SCOPE", "User.Read");
        }
    }

    #[test]
    fn from_env_loads_all_values() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_valid_env() };

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.client_id, "11111111-2222-3333-4444-555555555555");
        assert_eq!(config.client_secret.expose(), "s3cret-value");
        assert_eq!(config.tenant_id, "contoso-tenant");
        assert_eq!(config.redirect_uri, "https://localhost/callback");
        assert_eq!(config.scopes, vec!["User.Read".to_string()]);
        assert_eq!(config.authority, AZURE_PUBLIC_AUTHORITY);
    }

    #[test]
    fn missing_client_id_fails() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            remove_env("MSAL_CLIENT_ID");
        }

        let err = ClientConfig::from_env().unwrap_err();
        assert!(
            err.to_string().contains("MSAL_CLIENT_ID"),
            "error must name the missing variable, got: {err}"
        );
    }

    #[test]
    fn missing_client_secret_fails() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            remove_env("MSAL_CLIENT_SECRET");
        }

        assert!(ClientConfig::from_env().is_err());
    }

    #[test]
    fn missing_tenant_id_fails() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            remove_env("MSAL_TENANT_ID");
        }

        assert!(ClientConfig::from_env().is_err());
    }

    #[test]
    fn empty_required_value_counts_as_missing() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            set_env("MSAL_CLIENT_SECRET", "   ");
        }

        let err = ClientConfig::from_env().unwrap_err();
        assert!(err.to_string().contains("MSAL_CLIENT_SECRET"));
    }

    #[test]
    fn redirect_uri_defaults_to_localhost() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            remove_env("MSAL_REDIRECT_URI");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.redirect_uri, "https://localhost");
    }

    #[test]
    fn unset_scope_yields_single_empty_entry() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe {
            set_valid_env();
            remove_env("MSAL_SCOPE");
        }

        let config = ClientConfig::from_env().unwrap();
        assert_eq!(config.scopes, vec![String::new()]);
        assert_eq!(config.scope_param(), "");
    }

    #[test]
    fn debug_output_redacts_secret() {
        let _lock = ENV_MUTEX.lock().unwrap();
        unsafe { set_valid_env() };

        let config = ClientConfig::from_env().unwrap();
        let debug = format!("{config:?}");
        assert!(
            !debug.contains("s3cret-value"),
            "client secret must never appear in Debug output, got: {debug}"
        );
        assert!(debug.contains("[REDACTED]"));
    }
}
