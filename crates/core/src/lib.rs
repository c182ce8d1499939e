//! Haven Core Library
//!
//! Domain models, configuration, and the session credential cache for the
//! Haven personal safety client.

pub mod config;
pub mod credentials;
pub mod error;
pub mod models;

pub use config::{ConfigError, HavenConfig};
pub use credentials::SessionCache;
pub use error::{Error, Result};
pub use models::*;
