//! Emergency contact model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trusted contact the server notifies when an alert goes out
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencyContact {
    pub contact_id: String,
    pub name: String,
    pub relationship: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub is_primary: bool,
    pub created_at: DateTime<Utc>,
}
