//! Emergency alert models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Location;

/// How an alert was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// Raised by the user pressing the SOS control
    Manual,
    /// Raised by distress detection (toggle only, never produced here)
    Auto,
}

/// Lifecycle state of an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// Location payload attached to an alert
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertLocation {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default = "default_address")]
    pub address: String,
}

fn default_address() -> String {
    "Current Location".to_string()
}

impl From<Location> for AlertLocation {
    fn from(reading: Location) -> Self {
        Self {
            latitude: reading.latitude,
            longitude: reading.longitude,
            address: default_address(),
        }
    }
}

/// An emergency alert as held by the server
///
/// At most one alert per user is `active` at a time; the server enforces
/// this, the client only observes it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyAlert {
    pub alert_id: String,
    pub user_id: String,
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub status: AlertStatus,
    pub location: AlertLocation,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub contacts_notified: Vec<String>,
}

impl EmergencyAlert {
    pub fn is_active(&self) -> bool {
        self.status == AlertStatus::Active
    }
}
