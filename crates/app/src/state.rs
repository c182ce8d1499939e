//! Application state
//!
//! One `AppState` is created at the authenticated-region boundary and passed
//! down explicitly. Screens read the signed-in user from here instead of
//! re-deriving it.

use std::sync::{Arc, Mutex};

use tracing::warn;

use haven_core::models::User;
use haven_core::SessionCache;
use haven_net::ApiClient;

use crate::notifier::Notifier;

/// Session-scoped application state
pub struct AppState {
    pub client: Arc<ApiClient>,
    pub notifier: Notifier,
    cache: SessionCache,
    current_user: Mutex<Option<User>>,
}

impl AppState {
    pub fn new(client: Arc<ApiClient>, cache: SessionCache, notifier: Notifier) -> Self {
        Self {
            client,
            notifier,
            cache,
            current_user: Mutex::new(None),
        }
    }

    pub fn set_current_user(&self, user: Option<User>) {
        *self.current_user.lock().unwrap() = user;
    }

    pub fn current_user(&self) -> Option<User> {
        self.current_user.lock().unwrap().clone()
    }

    /// Given name of the signed-in user, for greetings
    pub fn current_name(&self) -> Option<String> {
        self.current_user().map(|u| u.first_name().to_string())
    }

    /// Present a cached session from a previous launch, if one survives
    ///
    /// Returns whether a cookie was installed; the auth gate still decides
    /// whether the session is actually good.
    pub fn restore_session(&self) -> bool {
        match self.cache.load() {
            Ok(Some(session)) => {
                self.client.install_session(&session.token);
                true
            }
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "failed to read session cache");
                false
            }
        }
    }

    /// Sign out: invalidate server-side, then drop every local credential
    pub async fn logout(&self) {
        if let Err(e) = self.client.logout().await {
            // local credentials are dropped regardless
            warn!(error = %e, "server logout failed");
        }
        self.client.clear_session();
        if let Err(e) = self.cache.clear() {
            warn!(error = %e, "failed to clear session cache");
        }
        self.set_current_user(None);
    }
}
