//! Session handoff
//!
//! Converts the one-time handshake fragment the identity provider leaves in
//! the URL into a session, exactly once per navigation lifetime. The
//! handshake token is single-use server-side, so a duplicate exchange does
//! not fail politely; it burns the login.

use std::sync::{Arc, Mutex};

use tracing::{info, warn};

use haven_core::models::{Session, User};
use haven_core::SessionCache;
use haven_net::ApiClient;

use crate::notifier::Notifier;

/// Progress latch for the exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HandoffPhase {
    NotStarted,
    InProgress,
    Done,
}

/// Where the shell should land after the handoff
#[derive(Debug, Clone)]
pub enum HandoffOutcome {
    /// Exchange succeeded; land authenticated with the user threaded
    /// through so the destination need not immediately re-probe
    Dashboard { user: User },
    /// No token or failed exchange; land at the unauthenticated entry point
    Landing,
    /// A second invocation raced the first; do nothing
    AlreadyHandled,
}

/// Handoff errors
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("No handshake token in fragment")]
    MissingHandshakeToken,
    #[error("Exchange failed: {0}")]
    ExchangeFailed(#[from] haven_net::Error),
}

/// One-shot handshake-to-session exchange
pub struct SessionHandoff {
    client: Arc<ApiClient>,
    cache: SessionCache,
    notifier: Notifier,
    phase: Mutex<HandoffPhase>,
}

impl SessionHandoff {
    pub fn new(client: Arc<ApiClient>, cache: SessionCache, notifier: Notifier) -> Self {
        Self {
            client,
            cache,
            notifier,
            phase: Mutex::new(HandoffPhase::NotStarted),
        }
    }

    /// Run the handoff against a URL fragment
    ///
    /// The latch advances before the first await, so re-invocations during
    /// the exchange are silent no-ops rather than double spends. Failures
    /// are terminal for the attempt; the user lands back at the entry point
    /// with a visible notice and nothing half-installed.
    pub async fn run(&self, fragment: &str) -> HandoffOutcome {
        {
            let mut phase = self.phase.lock().unwrap();
            if *phase != HandoffPhase::NotStarted {
                return HandoffOutcome::AlreadyHandled;
            }
            *phase = HandoffPhase::InProgress;
        }

        let outcome = match self.exchange(fragment).await {
            Ok(user) => {
                self.notifier
                    .success(format!("Welcome, {}.", user.first_name()));
                HandoffOutcome::Dashboard { user }
            }
            Err(HandoffError::MissingHandshakeToken) => {
                warn!("handoff fragment carried no handshake token");
                self.notifier.alarm("Authentication failed. Please try again.");
                HandoffOutcome::Landing
            }
            Err(e) => {
                warn!(error = %e, "handshake exchange failed");
                self.notifier.alarm("Authentication failed. Please try again.");
                HandoffOutcome::Landing
            }
        };

        *self.phase.lock().unwrap() = HandoffPhase::Done;
        outcome
    }

    async fn exchange(&self, fragment: &str) -> Result<User, HandoffError> {
        let token =
            parse_handshake_token(fragment).ok_or(HandoffError::MissingHandshakeToken)?;

        let session_user = self.client.exchange_session(&token).await?;

        self.client.install_session(&session_user.session_token);
        if let Err(e) = self.cache.store(&Session::new(session_user.session_token)) {
            // the cookie is installed; only next-launch continuity is lost
            warn!(error = %e, "failed to persist session");
        }
        info!(user = %session_user.user.user_id, "handoff complete");
        Ok(session_user.user)
    }
}

/// Pull `session_id` out of a URL fragment, with or without the leading `#`
///
/// The provider writes the fragment in query-string form, so values are
/// percent-decoded.
fn parse_handshake_token(fragment: &str) -> Option<String> {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);
    url::form_urlencoded::parse(fragment.as_bytes())
        .find(|(key, _)| key == "session_id")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
