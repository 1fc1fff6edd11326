//! Entra ID login CLI
//!
//! Interactive sign-in against Microsoft Entra ID (public cloud) using the
//! OAuth2 authorization-code grant with a confidential client:
//! 1. Print the authorization URL for the operator to open in a browser
//! 2. Read the pasted redirect URL (or bare code) from stdin
//! 3. Exchange the code at the tenant token endpoint
//! 4. Print the token details, or the error with troubleshooting hints

mod flow;

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use entra_auth::{ClientConfig, TokenResponse};

use crate::flow::{FlowAction, FlowEvent, FlowState, handle_event};

/// Printed under the error when the token exchange fails.
const TROUBLESHOOTING_HINTS: [&str; 4] = [
    "1. Client ID is correct",
    "2. Client secret is correct",
    "3. Redirect URI matches exactly what's registered for the application",
    "4. The authorization code hasn't expired (codes are single-use and short-lived)",
];

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr at `warn` by default so the interactive prompts
    // on stdout stay clean. LOG_LEVEL / RUST_LOG raise verbosity.
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("LOG_LEVEL")
                .or_else(|_| EnvFilter::try_from_default_env())
                .unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    // Seed MSAL_* variables from a .env file in the working directory.
    match dotenvy::dotenv() {
        Ok(path) => info!(path = %path.display(), "loaded environment from .env"),
        Err(e) if e.not_found() => {}
        Err(e) => warn!(error = %e, "failed to load .env file"),
    }

    println!("Starting authentication...");

    let config = ClientConfig::from_env().context(
        "incomplete client configuration; set MSAL_CLIENT_ID, MSAL_CLIENT_SECRET, and MSAL_TENANT_ID",
    )?;

    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut out = std::io::stdout();
    run(config, &mut input, &mut out).await
}

/// Drive the linear login flow over the given I/O streams.
///
/// Every transition goes through the pure state machine in [`flow`]; this
/// function only executes the I/O each returned action implies. A failed
/// exchange prints its diagnostic and still returns Ok, matching the
/// interactive contract (the run ends at the exit prompt either way); only
/// I/O errors on the streams themselves propagate.
async fn run<R: BufRead, W: Write>(config: ClientConfig, input: &mut R, out: &mut W) -> Result<()> {
    // Start -> ConfiguredClient
    let (state, action) = handle_event(FlowState::Start, FlowEvent::ConfigLoaded);
    anyhow::ensure!(
        matches!(action, FlowAction::BuildAuthorizationUrl),
        "unexpected action after ConfigLoaded: {action:?}"
    );

    // URL construction is local string formatting; the single network call
    // of the whole flow is the token exchange below.
    let csrf_state = entra_auth::generate_state();
    let url = entra_auth::build_authorization_url(&config, &csrf_state);

    // ConfiguredClient -> AuthorizationUrlIssued
    let (state, action) = handle_event(state, FlowEvent::UrlBuilt { url });
    let FlowAction::ShowAuthorizationUrl { url } = action else {
        anyhow::bail!("unexpected action after UrlBuilt: {action:?}");
    };

    writeln!(out, "\nPlease go to this URL to authorize:")?;
    writeln!(out, "{url}")?;
    writeln!(out, "\nAfter signing in, the browser lands on the redirect URL.")?;
    writeln!(
        out,
        "Paste the FULL redirect URL here (or just the code parameter):"
    )?;
    out.flush()?;

    // AuthorizationUrlIssued -> AwaitingOperatorInput
    let (state, action) = handle_event(state, FlowEvent::UrlShown);
    anyhow::ensure!(
        matches!(action, FlowAction::ReadOperatorInput),
        "unexpected action after UrlShown: {action:?}"
    );

    // Single blocking read, no timeout: an interactive operator is assumed.
    let mut line = String::new();
    input.read_line(&mut line)?;

    let state = match entra_auth::extract_code(&line) {
        Ok(code) => {
            // AwaitingOperatorInput -> CodeExtracted
            let (state, action) = handle_event(state, FlowEvent::CodeExtracted { code });
            let FlowAction::ExchangeCode { code } = action else {
                anyhow::bail!("unexpected action after CodeExtracted: {action:?}");
            };

            // CodeExtracted -> TokenExchangeInFlight
            let (state, _action) = handle_event(state, FlowEvent::ExchangeStarted);

            let client = reqwest::Client::new();
            match entra_auth::exchange_code(&client, &config, &code).await {
                Ok(token) => {
                    let (state, action) = handle_event(state, FlowEvent::ExchangeSucceeded);
                    anyhow::ensure!(
                        matches!(action, FlowAction::PrintToken),
                        "unexpected action after ExchangeSucceeded: {action:?}"
                    );
                    write!(out, "{}", render_token(&token))?;
                    state
                }
                Err(e) => {
                    let (state, action) = handle_event(
                        state,
                        FlowEvent::ExchangeFailed {
                            error: e.to_string(),
                        },
                    );
                    let FlowAction::PrintFailure { error } = action else {
                        anyhow::bail!("unexpected action after ExchangeFailed: {action:?}");
                    };
                    write!(out, "{}", render_failure(&error))?;
                    state
                }
            }
        }
        Err(e) => {
            // AwaitingOperatorInput -> ErrorPrinted (empty input)
            let (state, action) = handle_event(
                state,
                FlowEvent::InvalidInput {
                    error: e.to_string(),
                },
            );
            let FlowAction::PrintFailure { error } = action else {
                anyhow::bail!("unexpected action after InvalidInput: {action:?}");
            };
            write!(out, "{}", render_failure(&error))?;
            state
        }
    };

    writeln!(out, "\nPress Enter to exit...")?;
    out.flush()?;
    let mut pause = String::new();
    input.read_line(&mut pause)?;

    // TokenPrinted | ErrorPrinted -> Terminal
    let (state, action) = handle_event(state, FlowEvent::FinalKeypress);
    anyhow::ensure!(
        matches!(state, FlowState::Terminal) && matches!(action, FlowAction::Exit),
        "flow did not reach the terminal state"
    );

    Ok(())
}

/// Token details block printed on success.
fn render_token(token: &TokenResponse) -> String {
    format!(
        "\nAuthentication successful!\n\n\
         Access token: {}\n\
         Token type:   {}\n\
         Expires at:   {} (unix seconds)\n\
         Scopes:       {}\n",
        token.access_token,
        token.token_type,
        token.expires_at(),
        token.scope,
    )
}

/// Diagnostic block printed on any failure, with the four hints.
fn render_failure(error: &str) -> String {
    let mut rendered = format!("\nError: {error}\n\nPlease check:\n");
    for hint in TROUBLESHOOTING_HINTS {
        rendered.push_str(hint);
        rendered.push('\n');
    }
    rendered
}
