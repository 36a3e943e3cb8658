//! Message types for inter-layer communication in the actor-based architecture.
//!
//! UI events flow from the terminal loop to the App actor; render state flows back.

pub mod ui_events;
pub mod render;

pub use ui_events::{Focus, UiEvent};
pub use render::{FriendRow, RenderState, SplitView};
