//! Community safety report model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// A community-submitted incident report
///
/// `severity` runs 1 (minor) to 5 (severe). Anonymous reports carry no
/// `user_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommunityReport {
    pub report_id: String,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: u8,
    pub location: GeoPoint,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub anonymous: bool,
    pub status: String,
}
