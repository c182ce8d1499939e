//! Protected-view auth gate
//!
//! Decides once per mount whether the visitor has a valid session. A user
//! already resolved by the handoff is trusted without a probe; otherwise a
//! single identity probe decides, and any failure reads as signed out.

use std::sync::Arc;

use tracing::debug;

use haven_core::models::User;
use haven_net::ApiClient;

/// Authentication status of the current visitor
#[derive(Debug, Clone, Default)]
pub enum AuthState {
    /// Probe in flight; the shell renders a placeholder
    #[default]
    Unknown,
    /// Session valid; the view may show user data
    Authenticated(User),
    /// No usable session; the shell redirects to the entry point
    Unauthenticated,
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Session check for protected views
pub struct AuthGate {
    client: Arc<ApiClient>,
}

impl AuthGate {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Resolve the gate once
    ///
    /// `handed_off` is the user threaded through by a completed handoff;
    /// when present no probe is made. The probe is one-shot: no retry, and
    /// a network failure is indistinguishable from signed out by intent.
    pub async fn resolve(&self, handed_off: Option<User>) -> AuthState {
        if let Some(user) = handed_off {
            debug!(user = %user.user_id, "gate trusts handed-off user");
            return AuthState::Authenticated(user);
        }

        match self.client.me().await {
            Ok(user) => AuthState::Authenticated(user),
            Err(e) => {
                debug!(error = %e, "identity probe failed, treating as signed out");
                AuthState::Unauthenticated
            }
        }
    }
}
