//! Safety zone models

use serde::{Deserialize, Serialize};

use crate::models::GeoPoint;

/// A verified safe place (police station, hospital, late-night cafe)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SafetyZone {
    pub zone_id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub location: GeoPoint,
    pub address: String,
    #[serde(default)]
    pub contact: Option<String>,
    pub hours: String,
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub facilities: Vec<String>,
}

/// A safety zone with its distance from the queried position, in meters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbyZone {
    #[serde(flatten)]
    pub zone: SafetyZone,
    pub distance: f64,
}
