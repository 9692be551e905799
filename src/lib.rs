//! # Lookout TUI
//!
//! A terminal browser for two public read-only REST APIs.
//!
//! ## Features
//! - Characters: Rick and Morty character list with a detail overlay
//! - Store: Fake Store product list with a detail screen
//! - Explicit loading / empty / failed states with retry
//! - Stale responses from superseded or abandoned screens are discarded
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous
//! - App Layer (per-screen state holders)
//! - Network Layer (Tokio runtime)

pub mod constants;
pub mod config;
pub mod error;
pub mod models;
pub mod ui;
pub mod messages;
pub mod app;
pub mod network;

// Re-export commonly used types
pub use config::Config;
pub use error::{ErrorKind, FetchError};
pub use models::{Character, CharacterStatus, Listing, Product, Record};
pub use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
pub use app::{AppState, AppActor, Remote};
pub use network::{ApiClient, Apis, NetworkActor};
