//! App state - pure data structure with no I/O logic

use std::collections::HashMap;

use crate::balance::{total_balance, BalanceStatus};
use crate::forms::{AddFriendForm, EditDraft, SplitBillForm};
use crate::messages::ui_events::Focus;
use crate::messages::{FriendRow, RenderState, SplitView};
use crate::models::{Friend, FriendId, IdSource, UuidIds};
use crate::store::FriendStore;

/// Main application state - pure data, no I/O
pub struct AppState {
    // Entities
    pub store: FriendStore,
    pub selection: Option<FriendId>,

    // Transient forms
    pub add_form: Option<AddFriendForm>,
    pub edit_drafts: HashMap<FriendId, EditDraft>,
    pub split_form: Option<SplitBillForm>,

    // UI state
    pub focus: Focus,
    pub cursor: usize,
    /// Row whose draft receives keys while focus is `EditRow`
    pub editing: Option<FriendId>,
    pub notice: Option<String>,
    pub show_help: bool,

    pub(crate) ids: Box<dyn IdSource + Send>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl AppState {
    pub fn new(friends: Vec<Friend>) -> Self {
        Self::with_ids(friends, Box::new(UuidIds))
    }

    pub fn with_ids(friends: Vec<Friend>, ids: Box<dyn IdSource + Send>) -> Self {
        AppState {
            store: FriendStore::from_friends(friends),
            selection: None,
            add_form: None,
            edit_drafts: HashMap::new(),
            split_form: None,
            focus: Focus::Friends,
            cursor: 0,
            editing: None,
            notice: None,
            show_help: false,
            ids,
        }
    }

    /// Currently selected friend, if the selection still resolves
    pub fn selected_friend(&self) -> Option<&Friend> {
        self.selection.as_deref().and_then(|id| self.store.get(id))
    }

    /// Id of the friend under the list cursor
    pub fn friend_at_cursor(&self) -> Option<FriendId> {
        self.store.id_at(self.cursor)
    }

    pub fn total_balance(&self) -> f64 {
        total_balance(self.store.iter())
    }

    /// Convert state to RenderState for UI
    pub fn to_render_state(&self) -> RenderState {
        let rows = self
            .store
            .iter()
            .map(|friend| FriendRow {
                friend: friend.clone(),
                status: BalanceStatus::of(friend.balance),
                is_selected: self.selection.as_deref() == Some(friend.id.as_str()),
                edit: self.edit_drafts.get(&friend.id).cloned(),
            })
            .collect();

        let split = match (&self.split_form, self.selected_friend()) {
            (Some(form), Some(friend)) => Some(SplitView {
                friend_name: friend.name.clone(),
                form: form.clone(),
                friend_expense: form.friend_expense(),
            }),
            _ => None,
        };

        RenderState {
            rows,
            total_balance: self.total_balance(),
            cursor: self.cursor,
            focus: self.focus,
            add_form: self.add_form.clone(),
            split,
            notice: self.notice.clone(),
            show_help: self.show_help,
        }
    }
}
