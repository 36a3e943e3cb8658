//! Render state - data structure sent from App layer to UI for rendering

use crate::balance::BalanceStatus;
use crate::forms::{AddFriendForm, EditDraft, SplitBillForm};
use crate::messages::ui_events::Focus;
use crate::models::Friend;

/// One line of the friend list
#[derive(Debug, Clone)]
pub struct FriendRow {
    pub friend: Friend,
    pub status: BalanceStatus,
    pub is_selected: bool,
    /// Present while the row is in edit mode
    pub edit: Option<EditDraft>,
}

/// Split-bill panel contents
#[derive(Debug, Clone)]
pub struct SplitView {
    pub friend_name: String,
    pub form: SplitBillForm,
    pub friend_expense: Option<f64>,
}

/// Complete state needed by the UI to render
#[derive(Debug, Clone, Default)]
pub struct RenderState {
    pub rows: Vec<FriendRow>,
    pub total_balance: f64,
    pub cursor: usize,
    pub focus: Focus,

    pub add_form: Option<AddFriendForm>,
    pub split: Option<SplitView>,

    /// Last rejected input, shown in the status bar
    pub notice: Option<String>,
    pub show_help: bool,
}
