//! App layer - per-screen state and command processing
//!
//! The App actor receives UI events and network responses,
//! updates screen state, and emits network commands and render state.

pub mod state;
pub mod screens;
pub mod actor;
pub mod commands;

pub use state::AppState;
pub use actor::AppActor;
pub use screens::{CharacterModal, CollectionScreen, ModalPhase, ProductDetail, Remote};
