//! Haven App Library
//!
//! The controllers a UI shell binds to. Shells render state and forward
//! input; every decision with consequences lives here.
//!
//! # Architecture
//!
//! - **SessionHandoff**: one-shot exchange of the provider's handshake token
//! - **AuthGate**: per-mount session check for protected views
//! - **SosController**: the idle/active alert state machine
//! - **FakeCallAction**: staged incoming call, independent of alerts
//! - **LocationProvider**: positioning seam each shell implements
//! - **Notifier**: transient notices the shell renders as toasts
//! - **AppState**: the signed-in user and the shared API client
//!
//! # Usage
//!
//! ```ignore
//! let config = HavenConfig::load()?;
//! let client = Arc::new(ApiClient::new(
//!     &config.api_origin,
//!     Duration::from_secs(config.request_timeout_secs),
//! )?);
//! let (notifier, mut notices) = Notifier::channel();
//! let state = AppState::new(client.clone(), SessionCache::open_default(), notifier.clone());
//!
//! // After the provider redirects back with a fragment:
//! let handoff = SessionHandoff::new(client.clone(), SessionCache::open_default(), notifier.clone());
//! match handoff.run(&fragment).await {
//!     HandoffOutcome::Dashboard { user } => { /* land authenticated */ }
//!     HandoffOutcome::Landing => { /* back to the entry point */ }
//!     HandoffOutcome::AlreadyHandled => {}
//! }
//! ```

pub mod fake_call;
pub mod gate;
pub mod handoff;
pub mod location;
pub mod notifier;
pub mod sos;
pub mod state;

pub use fake_call::FakeCallAction;
pub use gate::{AuthGate, AuthState};
pub use handoff::{HandoffError, HandoffOutcome, SessionHandoff};
pub use location::{FixedLocation, LocationError, LocationProvider, NoLocation};
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use sos::{PressOutcome, SosController, SosError, SosState};
pub use state::AppState;
