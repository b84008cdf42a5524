//! Message types for inter-layer communication in the actor-based architecture.
//!
//! This module defines all messages that flow between the UI, App, and Remote layers.

pub mod ui_events;
pub mod remote;
pub mod render;

pub use ui_events::UiEvent;
pub use remote::{RemoteCommand, RemoteResponse, WriteKind};
pub use render::RenderState;
