//! App layer - session state and command processing
//!
//! The App actor receives UI events and remote responses,
//! updates state, and emits remote commands and render state.

pub mod actor;
pub mod commands;
pub mod state;

pub use actor::AppActor;
pub use state::AppState;
