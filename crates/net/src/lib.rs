//! Haven Network Library
//!
//! The HTTP boundary of the Haven client. Every request the app makes goes
//! through [`ApiClient`]; nothing else in the workspace touches the wire.
//!
//! # Architecture
//!
//! - **ApiClient**: reqwest client with a shared cookie jar; the session
//!   cookie is the only credential
//! - **Protocol**: serde DTOs matching the server's JSON bodies
//!
//! # Usage
//!
//! ```ignore
//! let client = ApiClient::new("https://api.haven.example", Duration::from_secs(30))?;
//!
//! // One-time handshake exchange after the provider redirects back
//! let session = client.exchange_session(&handshake_token).await?;
//! client.install_session(&session.session_token);
//!
//! // Credentialed calls from here on
//! let active = client.active_alert().await?;
//! ```

pub mod client;
pub mod error;
pub mod protocol;

pub use client::{ApiClient, HANDSHAKE_HEADER, SESSION_COOKIE};
pub use error::{Error, Result};
pub use protocol::{
    Ack, FakeCall, FakeCallRequest, NewContact, NewReport, SessionUser, TriggerAlertRequest,
};
