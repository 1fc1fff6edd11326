//! Login flow state machine
//!
//! Pure state machine: receives events, returns (new_state, action).
//! Caller (main.rs) executes the I/O implied by each action.
//!
//! The flow is strictly linear: no retries, no re-entry, no cancellation
//! path other than process termination. Authorization codes are single-use,
//! so a failed exchange moves to the failed terminal edge instead of
//! looping back for another attempt.

/// States of the interactive login flow.
#[derive(Debug)]
pub enum FlowState {
    /// Process entry, configuration not yet validated
    Start,
    /// Configuration validated, client ready
    ConfiguredClient,
    /// Authorization URL printed for the operator
    AuthorizationUrlIssued,
    /// Blocking on the operator pasting the redirect URL or code
    AwaitingOperatorInput,
    /// Code recovered from operator input
    CodeExtracted { code: String },
    /// Token exchange awaiting the identity provider
    TokenExchangeInFlight,
    /// Success edge: token details printed
    TokenPrinted,
    /// Failure edge: diagnostic and hints printed
    ErrorPrinted,
    /// Flow finished, process may exit
    Terminal,
}

/// Events that drive state transitions.
#[derive(Debug)]
pub enum FlowEvent {
    /// Configuration read and validated
    ConfigLoaded,
    /// Authorization URL constructed
    UrlBuilt { url: String },
    /// URL and instructions written to the operator
    UrlShown,
    /// Operator input parsed into a code candidate
    CodeExtracted { code: String },
    /// Operator input rejected (empty)
    InvalidInput { error: String },
    /// Token exchange request dispatched
    ExchangeStarted,
    /// Identity provider returned a token set
    ExchangeSucceeded,
    /// Identity provider or transport rejected the exchange
    ExchangeFailed { error: String },
    /// Operator pressed Enter on the exit prompt
    FinalKeypress,
}

/// Actions the caller should execute after a state transition
#[derive(Debug)]
pub enum FlowAction {
    /// Construct the authorization URL
    BuildAuthorizationUrl,
    /// Print the URL and pasting instructions
    ShowAuthorizationUrl { url: String },
    /// Block on one line of stdin
    ReadOperatorInput,
    /// Exchange the code at the token endpoint
    ExchangeCode { code: String },
    /// Print the token details
    PrintToken,
    /// Print the error and troubleshooting hints
    PrintFailure { error: String },
    /// Exit the process
    Exit,
    /// No-op
    None,
}

/// Handle a state transition. Pure function: no I/O.
pub fn handle_event(state: FlowState, event: FlowEvent) -> (FlowState, FlowAction) {
    match (state, event) {
        // --- Start ---
        (FlowState::Start, FlowEvent::ConfigLoaded) => (
            FlowState::ConfiguredClient,
            FlowAction::BuildAuthorizationUrl,
        ),

        // --- ConfiguredClient ---
        (FlowState::ConfiguredClient, FlowEvent::UrlBuilt { url }) => (
            FlowState::AuthorizationUrlIssued,
            FlowAction::ShowAuthorizationUrl { url },
        ),

        // --- AuthorizationUrlIssued ---
        (FlowState::AuthorizationUrlIssued, FlowEvent::UrlShown) => (
            FlowState::AwaitingOperatorInput,
            FlowAction::ReadOperatorInput,
        ),

        // --- AwaitingOperatorInput ---
        (FlowState::AwaitingOperatorInput, FlowEvent::CodeExtracted { code }) => (
            FlowState::CodeExtracted { code: code.clone() },
            FlowAction::ExchangeCode { code },
        ),

        (FlowState::AwaitingOperatorInput, FlowEvent::InvalidInput { error }) => {
            (FlowState::ErrorPrinted, FlowAction::PrintFailure { error })
        }

        // --- CodeExtracted ---
        (FlowState::CodeExtracted { .. }, FlowEvent::ExchangeStarted) => {
            (FlowState::TokenExchangeInFlight, FlowAction::None)
        }

        // --- TokenExchangeInFlight ---
        (FlowState::TokenExchangeInFlight, FlowEvent::ExchangeSucceeded) => {
            (FlowState::TokenPrinted, FlowAction::PrintToken)
        }

        (FlowState::TokenExchangeInFlight, FlowEvent::ExchangeFailed { error }) => {
            (FlowState::ErrorPrinted, FlowAction::PrintFailure { error })
        }

        // --- Printed -> Terminal after the exit prompt ---
        (FlowState::TokenPrinted | FlowState::ErrorPrinted, FlowEvent::FinalKeypress) => {
            (FlowState::Terminal, FlowAction::Exit)
        }

        // --- Invalid/unhandled transition: stay in current state ---
        (state, _event) => (state, FlowAction::None),
    }
}
