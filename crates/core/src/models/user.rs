//! User and session models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user account as returned by the identity endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    pub email: String,
    pub name: String,
    #[serde(default)]
    pub picture: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub emergency_settings: EmergencySettings,
}

impl User {
    /// Given name for greetings; falls back to the full name
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(self.name.as_str())
    }
}

/// Per-user emergency feature toggles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencySettings {
    pub auto_detect: bool,
    pub alert_contacts: bool,
    pub share_location: bool,
    pub fake_call_enabled: bool,
}

impl Default for EmergencySettings {
    fn default() -> Self {
        Self {
            auto_detect: true,
            alert_contacts: true,
            share_location: true,
            fake_call_enabled: true,
        }
    }
}

/// Client-side record of an issued session
///
/// The token is the opaque cookie value. The server owns validity; the
/// expiry here only decides whether a cached session is worth presenting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub issued_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// Lifetime the exchange endpoint issues sessions with
    pub const LIFETIME_DAYS: i64 = 7;

    pub fn new(token: String) -> Self {
        let now = Utc::now();
        Self {
            token,
            issued_at: now,
            expires_at: now + chrono::Duration::days(Self::LIFETIME_DAYS),
        }
    }

    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }
}
