//! Device location seam
//!
//! Wraps whatever positioning capability the shell has. Reads are
//! single-shot; implementations bound their own wait rather than blocking
//! indefinitely.

use async_trait::async_trait;

use haven_core::models::Location;

/// Location errors
#[derive(Debug, thiserror::Error)]
pub enum LocationError {
    #[error("Positioning unavailable: {0}")]
    Unavailable(String),
    #[error("Permission denied")]
    PermissionDenied,
    #[error("Timed out waiting for a position")]
    Timeout,
}

/// A source of single-shot position readings
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// The current device position
    async fn current(&self) -> Result<Location, LocationError>;
}

/// Provider pinned to one position, for tests and kiosk-style shells
pub struct FixedLocation(pub Location);

#[async_trait]
impl LocationProvider for FixedLocation {
    async fn current(&self) -> Result<Location, LocationError> {
        Ok(self.0)
    }
}

/// Provider for shells without positioning hardware
pub struct NoLocation;

#[async_trait]
impl LocationProvider for NoLocation {
    async fn current(&self) -> Result<Location, LocationError> {
        Err(LocationError::Unavailable(
            "no positioning capability".to_string(),
        ))
    }
}
