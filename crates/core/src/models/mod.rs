//! Data models for Haven

mod user;
mod alert;
mod location;
mod contact;
mod report;
mod zone;

pub use user::*;
pub use alert::*;
pub use location::*;
pub use contact::*;
pub use report::*;
pub use zone::*;
