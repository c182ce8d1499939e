//! Device position types

use serde::{Deserialize, Serialize};

/// A point-in-time device position reading
///
/// Never persisted; regenerated on demand. There is no staleness tracking,
/// a held reading is used as-is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub accuracy: Option<f64>,
}

/// A bare coordinate pair as used by reports and safety zones
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}
