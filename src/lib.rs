//! # Eat-'n-Split
//!
//! Split bills with friends from the terminal and keep a running balance
//! with each of them.
//!
//! ## Features
//! - Friend list with per-friend balance ("you owe", "owes you", "even")
//! - Total balance across all friends
//! - Add, edit and delete friends
//! - Split a bill with the selected friend, either side paying
//! - Optional starting roster read from `~/.eat-n-split/friends.yaml`
//!
//! ## Architecture
//! Actor-based with channels:
//! - UI Layer (Ratatui) - synchronous rendering from snapshots
//! - App Layer - single owner of all state, one event at a time

pub mod constants;
pub mod models;
pub mod store;
pub mod balance;
pub mod roster;
pub mod forms;
pub mod ui;
pub mod messages;
pub mod app;

// Re-export commonly used types
pub use models::{Friend, FriendId, IdSource, Payer, SequentialIds, UuidIds};
pub use store::FriendStore;
pub use balance::{total_balance, BalanceStatus};
pub use forms::{AddFriendForm, EditDraft, FormError, SplitBillForm};
pub use messages::{Focus, RenderState, UiEvent};
pub use app::{AppActor, AppState};
