//! Microsoft Entra ID authentication library
//!
//! Implements the confidential-client side of the OAuth2 authorization-code
//! grant against Entra ID (Azure AD, public cloud): authorization URL
//! construction, redirect parsing, and code-for-token exchange. Standalone;
//! nothing here depends on the CLI binary.
//!
//! Login flow:
//! 1. Caller builds a `config::ClientConfig` (usually `from_env()`)
//! 2. User authorizes via `authorize::build_authorization_url()`
//! 3. Caller recovers the code from the pasted redirect via
//!    `redirect::extract_code()`
//! 4. Caller exchanges it via `token::exchange_code()`

pub mod authority;
pub mod authorize;
pub mod config;
pub mod error;
pub mod redirect;
pub mod token;

pub use authorize::{build_authorization_url, generate_state};
pub use config::ClientConfig;
pub use error::{Error, Result};
pub use redirect::extract_code;
pub use token::{TokenResponse, exchange_code};
