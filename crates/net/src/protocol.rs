//! Wire types for the Haven API
//!
//! Serde DTOs matching the server's JSON bodies. Entity models live in
//! `haven-core`; this module only adds the request/response shapes that do
//! not stand alone.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use haven_core::models::{AlertKind, AlertLocation, GeoPoint, User};

/// Response to the handshake exchange: the user plus the issued token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(flatten)]
    pub user: User,
    pub session_token: String,
}

/// Body of an alert trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerAlertRequest {
    #[serde(rename = "type")]
    pub kind: AlertKind,
    pub location: AlertLocation,
}

/// Body of a fake call request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeCallRequest {
    pub caller_name: String,
}

impl Default for FakeCallRequest {
    fn default() -> Self {
        Self {
            caller_name: "Mom".to_string(),
        }
    }
}

/// A staged incoming call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FakeCall {
    pub caller: String,
    pub message: String,
    /// Ring duration in seconds
    pub duration: u32,
    pub timestamp: DateTime<Utc>,
}

/// Body of a contact creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContact {
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
}

/// Body of a community report submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: u8,
    pub location: GeoPoint,
    pub description: String,
    #[serde(default)]
    pub anonymous: bool,
}

/// Generic acknowledgement body for endpoints with no payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: String,
}
