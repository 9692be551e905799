//! Network layer - fetch execution against the two remote APIs
//!
//! The Network actor receives fetch commands and sends back responses.

pub mod actor;
pub mod client;

pub use actor::{Apis, NetworkActor};
pub use client::ApiClient;
