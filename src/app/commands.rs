//! Command handlers - business logic for processing UI events

use crate::app::AppState;
use crate::forms::{AddFriendForm, EditDraft, FormError, SplitBillForm, TextField};
use crate::messages::ui_events::Focus;
use crate::models::Friend;

impl AppState {
    // ========================
    // Friend store
    // ========================

    pub fn add_friend(&mut self, friend: Friend) {
        tracing::info!(id = %friend.id, name = %friend.name, "Friend added");
        self.store.add(friend);
    }

    /// Remove a friend along with its selection and edit draft
    pub fn delete_friend(&mut self, id: &str) {
        if self.store.remove(id).is_none() {
            tracing::debug!(id, "Delete of unknown friend ignored");
            return;
        }
        tracing::info!(id, "Friend deleted");

        if self.selection.as_deref() == Some(id) {
            self.clear_selection();
        }
        self.edit_drafts.remove(id);
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
            if self.focus == Focus::EditRow {
                self.focus = Focus::Friends;
            }
        }
        self.clamp_cursor();
    }

    pub fn update_friend(&mut self, friend: Friend) -> bool {
        let id = friend.id.clone();
        let updated = self.store.update(friend);
        if updated {
            tracing::info!(id = %id, "Friend updated");
        } else {
            tracing::debug!(id = %id, "Update of unknown friend ignored");
        }
        updated
    }

    // ========================
    // Selection
    // ========================

    /// Select a friend for splitting, or close the split if already selected.
    /// Always closes the add-friend form.
    pub fn select_friend(&mut self, id: &str) {
        if self.selection.as_deref() == Some(id) {
            self.clear_selection();
        } else if self.store.contains(id) {
            self.set_selection(id);
            self.focus = Focus::SplitBill;
        }
        self.close_add_friend();
    }

    /// Point the selection at `id`. A different friend gets a fresh split draft.
    pub fn set_selection(&mut self, id: &str) {
        if !self.store.contains(id) {
            return;
        }
        if self.selection.as_deref() != Some(id) {
            self.selection = Some(id.to_string());
            self.split_form = Some(SplitBillForm::new(id));
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.split_form = None;
        if self.focus == Focus::SplitBill {
            self.focus = Focus::Friends;
        }
    }

    // ========================
    // Add friend
    // ========================

    pub fn toggle_add_friend(&mut self) {
        if self.add_form.is_some() {
            self.close_add_friend();
        } else {
            self.add_form = Some(AddFriendForm::new());
            self.focus = Focus::AddFriend;
        }
    }

    pub fn close_add_friend(&mut self) {
        self.add_form = None;
        if self.focus == Focus::AddFriend {
            self.focus = Focus::Friends;
        }
    }

    pub fn submit_add_friend(&mut self) -> Result<(), FormError> {
        let Some(form) = self.add_form.as_mut() else {
            return Ok(());
        };
        let friend = form.submit(&mut *self.ids)?;

        self.add_friend(friend);
        self.cursor = self.store.len() - 1;
        self.close_add_friend();
        Ok(())
    }

    // ========================
    // Edit friend
    // ========================

    /// Put a row in edit mode, resuming an existing draft if there is one
    pub fn start_edit(&mut self, id: &str) {
        let Some(friend) = self.store.get(id) else {
            return;
        };
        if !self.edit_drafts.contains_key(id) {
            let draft = EditDraft::seed(friend);
            self.edit_drafts.insert(id.to_string(), draft);
        }
        self.editing = Some(id.to_string());
        self.focus = Focus::EditRow;
    }

    /// Save the draft and make the edited friend the selection
    pub fn submit_edit(&mut self, id: &str) {
        let updated = match (self.edit_drafts.get(id), self.store.get(id)) {
            (Some(draft), Some(current)) => draft.apply_to(current),
            _ => return,
        };
        self.edit_drafts.remove(id);
        if self.update_friend(updated) {
            self.set_selection(id);
        }
        self.stop_editing(id);
    }

    pub fn cancel_edit(&mut self, id: &str) {
        self.edit_drafts.remove(id);
        self.stop_editing(id);
    }

    fn stop_editing(&mut self, id: &str) {
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        if self.focus == Focus::EditRow {
            self.focus = Focus::Friends;
        }
    }

    // ========================
    // Split bill
    // ========================

    /// Apply the split to the selected friend's balance and close the form
    pub fn submit_split(&mut self) -> Result<(), FormError> {
        let (Some(form), Some(id)) = (self.split_form.as_ref(), self.selection.clone()) else {
            return Ok(());
        };
        let delta = form.submit()?;

        self.store.apply_delta(&id, delta);
        tracing::info!(id = %id, delta, "Bill split");
        self.clear_selection();
        Ok(())
    }

    // ========================
    // Navigation
    // ========================

    pub fn cursor_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_down(&mut self) {
        if self.cursor + 1 < self.store.len() {
            self.cursor += 1;
        }
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.store.len().saturating_sub(1));
    }

    /// Cycle focus through the list and whichever forms are open
    pub fn next_panel(&mut self) {
        let mut panels = vec![Focus::Friends];
        if self.editing.is_some() {
            panels.push(Focus::EditRow);
        }
        if self.add_form.is_some() {
            panels.push(Focus::AddFriend);
        }
        if self.split_form.is_some() {
            panels.push(Focus::SplitBill);
        }

        let current = panels.iter().position(|p| *p == self.focus).unwrap_or(0);
        self.focus = panels[(current + 1) % panels.len()];
    }

    /// Leave a form without discarding its draft
    pub fn focus_list(&mut self) {
        self.focus = Focus::Friends;
    }

    pub fn toggle_select_at_cursor(&mut self) {
        if let Some(id) = self.friend_at_cursor() {
            self.select_friend(&id);
        }
    }

    pub fn start_edit_at_cursor(&mut self) {
        if let Some(id) = self.friend_at_cursor() {
            self.start_edit(&id);
        }
    }

    pub fn delete_at_cursor(&mut self) {
        if let Some(id) = self.friend_at_cursor() {
            self.delete_friend(&id);
        }
    }

    // ========================
    // Form input
    // ========================

    /// Text field that receives keys in the name + image forms
    fn active_text_field(&mut self) -> Option<&mut TextField> {
        match self.focus {
            Focus::EditRow => {
                let id = self.editing.as_ref()?;
                self.edit_drafts.get_mut(id).map(|d| d.active_field_mut())
            }
            Focus::AddFriend => self.add_form.as_mut().map(|f| f.active_field_mut()),
            Focus::Friends | Focus::SplitBill => None,
        }
    }

    pub fn enter_char(&mut self, c: char) {
        if self.focus == Focus::SplitBill {
            let result = match self.split_form.as_mut() {
                Some(form) => form.enter_char(c),
                None => Ok(()),
            };
            self.report(result);
        } else if let Some(field) = self.active_text_field() {
            field.insert(c);
        }
    }

    pub fn delete_char(&mut self) {
        if self.focus == Focus::SplitBill {
            let result = match self.split_form.as_mut() {
                Some(form) => form.backspace(),
                None => Ok(()),
            };
            self.report(result);
        } else if let Some(field) = self.active_text_field() {
            field.backspace();
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.focus == Focus::SplitBill {
            if let Some(form) = self.split_form.as_mut() {
                form.move_left();
            }
        } else if let Some(field) = self.active_text_field() {
            field.move_left();
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.focus == Focus::SplitBill {
            if let Some(form) = self.split_form.as_mut() {
                form.move_right();
            }
        } else if let Some(field) = self.active_text_field() {
            field.move_right();
        }
    }

    pub fn next_field(&mut self) {
        match self.focus {
            Focus::EditRow => {
                if let Some(draft) = self.editing.as_ref().and_then(|id| self.edit_drafts.get_mut(id)) {
                    draft.next_field();
                }
            }
            Focus::AddFriend => {
                if let Some(form) = self.add_form.as_mut() {
                    form.next_field();
                }
            }
            Focus::SplitBill => {
                if let Some(form) = self.split_form.as_mut() {
                    form.next_field();
                }
            }
            Focus::Friends => {}
        }
    }

    pub fn prev_field(&mut self) {
        match self.focus {
            Focus::SplitBill => {
                if let Some(form) = self.split_form.as_mut() {
                    form.prev_field();
                }
            }
            // two fields: previous and next coincide
            _ => self.next_field(),
        }
    }

    /// Submit whichever form has focus
    pub fn submit(&mut self) {
        match self.focus {
            Focus::EditRow => {
                if let Some(id) = self.editing.clone() {
                    self.submit_edit(&id);
                }
            }
            Focus::AddFriend => {
                let result = self.submit_add_friend();
                self.report(result);
            }
            Focus::SplitBill => {
                let result = self.submit_split();
                self.report(result);
            }
            Focus::Friends => {}
        }
    }

    /// Discard whichever form has focus
    pub fn cancel(&mut self) {
        match self.focus {
            Focus::EditRow => {
                if let Some(id) = self.editing.clone() {
                    self.cancel_edit(&id);
                }
            }
            Focus::AddFriend => self.close_add_friend(),
            Focus::SplitBill => self.clear_selection(),
            Focus::Friends => {}
        }
    }

    /// Surface a rejected input in the status bar. State is already unchanged.
    fn report(&mut self, result: Result<(), FormError>) {
        if let Err(e) = result {
            tracing::debug!(error = %e, focus = ?self.focus, "Input rejected");
            self.notice = Some(e.to_string());
        }
    }

    // ========================
    // Help popup
    // ========================

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    pub fn close_help(&mut self) {
        self.show_help = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{initial_friends, Payer, SequentialIds};
    use proptest::prelude::*;

    const CLARK: &str = "118836";
    const SARAH: &str = "933372";
    const ANTHONY: &str = "499476";

    fn app() -> AppState {
        AppState::with_ids(initial_friends(), Box::new(SequentialIds::new("new")))
    }

    fn balance(app: &AppState, id: &str) -> f64 {
        app.store.get(id).unwrap().balance
    }

    fn type_text(app: &mut AppState, text: &str) {
        text.chars().for_each(|c| app.enter_char(c));
    }

    #[test]
    fn test_total_of_initial_friends() {
        assert_eq!(app().total_balance(), 13.0);
    }

    #[test]
    fn test_split_paid_by_user() {
        let mut app = app();
        app.select_friend(CLARK);
        let form = app.split_form.as_mut().unwrap();
        form.set_bill(100.0);
        form.set_user_expense(30.0).unwrap();
        form.set_payer(Payer::User);

        app.submit_split().unwrap();
        assert_eq!(balance(&app, CLARK), 63.0);
        assert_eq!(app.selection, None);
        assert!(app.split_form.is_none());
        assert_eq!(app.total_balance(), 83.0);
    }

    #[test]
    fn test_split_paid_by_friend() {
        let mut app = app();
        app.select_friend(SARAH);
        let form = app.split_form.as_mut().unwrap();
        form.set_bill(50.0);
        form.set_user_expense(50.0).unwrap();
        form.set_payer(Payer::Friend);

        app.submit_split().unwrap();
        assert_eq!(balance(&app, SARAH), -30.0);
    }

    #[test]
    fn test_split_typed_through_events() {
        let mut app = app();
        app.cursor = 1;
        app.toggle_select_at_cursor();
        assert_eq!(app.focus, Focus::SplitBill);

        type_text(&mut app, "50");
        app.next_field();
        type_text(&mut app, "60");
        assert_eq!(app.notice.as_deref(), Some("your expense cannot exceed the bill"));
        assert_eq!(app.split_form.as_ref().unwrap().user_expense(), Some(6.0));

        app.notice = None;
        app.delete_char();
        type_text(&mut app, "10");
        app.next_field();
        app.move_cursor_right();
        assert_eq!(app.split_form.as_ref().unwrap().payer(), Payer::Friend);
        app.submit();

        assert_eq!(app.notice, None);
        assert_eq!(balance(&app, SARAH), 10.0);
        assert_eq!(app.focus, Focus::Friends);
    }

    #[test]
    fn test_backspace_cannot_push_expense_past_bill() {
        let mut app = app();
        app.select_friend(CLARK);
        type_text(&mut app, "10");
        app.next_field();
        type_text(&mut app, "9.5");
        app.move_cursor_left();
        app.delete_char();

        assert_eq!(app.notice.as_deref(), Some("your expense cannot exceed the bill"));
        let form = app.split_form.as_ref().unwrap();
        assert_eq!(form.user_expense(), Some(9.5));
        assert_eq!(form.friend_expense(), Some(0.5));
    }

    #[test]
    fn test_incomplete_split_keeps_state() {
        let mut app = app();
        app.select_friend(CLARK);
        app.split_form.as_mut().unwrap().set_bill(100.0);

        assert_eq!(app.submit_split(), Err(FormError::MissingUserExpense));
        assert_eq!(balance(&app, CLARK), -7.0);
        assert_eq!(app.selection.as_deref(), Some(CLARK));
    }

    #[test]
    fn test_select_twice_clears() {
        let mut app = app();
        app.select_friend(CLARK);
        assert_eq!(app.selected_friend().unwrap().name, "Clark");
        app.select_friend(CLARK);
        assert_eq!(app.selection, None);
        assert!(app.split_form.is_none());
    }

    #[test]
    fn test_selecting_other_friend_resets_draft() {
        let mut app = app();
        app.select_friend(CLARK);
        app.split_form.as_mut().unwrap().set_bill(10.0);
        app.select_friend(SARAH);
        let form = app.split_form.as_ref().unwrap();
        assert_eq!(form.friend_id(), SARAH);
        assert_eq!(form.bill(), None);
    }

    #[test]
    fn test_select_closes_add_form() {
        let mut app = app();
        app.toggle_add_friend();
        assert_eq!(app.focus, Focus::AddFriend);
        app.select_friend(ANTHONY);
        assert!(app.add_form.is_none());
        assert_eq!(app.focus, Focus::SplitBill);
    }

    #[test]
    fn test_delete_selected_clears_selection() {
        let mut app = app();
        app.select_friend(SARAH);
        app.delete_friend(SARAH);
        assert_eq!(app.selection, None);
        assert!(app.split_form.is_none());
        assert_eq!(app.store.len(), 2);
    }

    #[test]
    fn test_delete_other_keeps_selection() {
        let mut app = app();
        app.select_friend(SARAH);
        app.delete_friend(CLARK);
        assert_eq!(app.selection.as_deref(), Some(SARAH));
        assert!(app.split_form.is_some());
    }

    #[test]
    fn test_delete_last_row_clamps_cursor() {
        let mut app = app();
        app.cursor = 2;
        app.delete_at_cursor();
        assert_eq!(app.cursor, 1);
        assert!(!app.store.contains(ANTHONY));
    }

    #[test]
    fn test_add_friend_dana() {
        let mut app = app();
        app.toggle_add_friend();
        type_text(&mut app, "Dana");
        app.submit();

        assert_eq!(app.store.len(), 4);
        let dana = app.store.get_at(3).unwrap();
        assert_eq!(dana.name, "Dana");
        assert_eq!(dana.id, "new-1");
        assert_eq!(dana.image, "https://i.pravatar.cc/48?u=new-1");
        assert_eq!(dana.balance, 0.0);
        assert!(app.add_form.is_none());
        assert_eq!(app.cursor, 3);
    }

    #[test]
    fn test_add_friend_without_name_rejected() {
        let mut app = app();
        app.toggle_add_friend();
        app.submit();
        assert_eq!(app.store.len(), 3);
        assert!(app.add_form.is_some());
        assert_eq!(app.notice.as_deref(), Some("friend name is required"));
    }

    #[test]
    fn test_add_friend_without_image_rejected() {
        let mut app = app();
        app.toggle_add_friend();
        type_text(&mut app, "Dana");
        app.next_field();
        app.add_form.as_mut().unwrap().image.clear();
        assert_eq!(app.submit_add_friend(), Err(FormError::MissingImage));
        assert_eq!(app.store.len(), 3);
    }

    #[test]
    fn test_toggle_add_friend_discards_draft() {
        let mut app = app();
        app.toggle_add_friend();
        type_text(&mut app, "Da");
        app.toggle_add_friend();
        assert!(app.add_form.is_none());
        app.toggle_add_friend();
        assert_eq!(app.add_form.as_ref().unwrap().name.as_str(), "");
    }

    #[test]
    fn test_edit_updates_and_selects() {
        let mut app = app();
        app.start_edit(ANTHONY);
        assert_eq!(app.focus, Focus::EditRow);
        type_text(&mut app, "y");
        app.submit();

        let anthony = app.store.get(ANTHONY).unwrap();
        assert_eq!(anthony.name, "Anthonyy");
        assert_eq!(app.store.position(ANTHONY), Some(2));
        assert_eq!(app.selection.as_deref(), Some(ANTHONY));
        assert!(app.edit_drafts.is_empty());
        assert_eq!(app.focus, Focus::Friends);
    }

    #[test]
    fn test_edit_keeps_split_draft_for_same_friend() {
        let mut app = app();
        app.select_friend(CLARK);
        app.split_form.as_mut().unwrap().set_bill(40.0);
        app.start_edit(CLARK);
        app.submit_edit(CLARK);
        assert_eq!(app.split_form.as_ref().unwrap().bill(), Some(40.0));
        assert_eq!(balance(&app, CLARK), -7.0);
    }

    #[test]
    fn test_edit_accepts_empty_name() {
        let mut app = app();
        app.start_edit(CLARK);
        app.edit_drafts.get_mut(CLARK).unwrap().name.clear();
        app.submit();
        assert_eq!(app.store.get(CLARK).unwrap().name, "");
    }

    #[test]
    fn test_edit_draft_survives_leaving_row() {
        let mut app = app();
        app.start_edit(SARAH);
        type_text(&mut app, "h");
        app.focus_list();
        app.next_panel();
        assert_eq!(app.focus, Focus::EditRow);
        app.cancel();
        assert!(app.edit_drafts.is_empty());
        assert_eq!(app.store.get(SARAH).unwrap().name, "Sarah");
    }

    #[test]
    fn test_delete_while_editing_drops_draft() {
        let mut app = app();
        app.start_edit(SARAH);
        app.delete_friend(SARAH);
        assert!(app.edit_drafts.is_empty());
        assert_eq!(app.editing, None);
        assert_eq!(app.focus, Focus::Friends);
    }

    #[test]
    fn test_render_state_derives_values() {
        let mut app = app();
        app.select_friend(CLARK);
        app.split_form.as_mut().unwrap().set_bill(25.0);
        let render = app.to_render_state();

        assert_eq!(render.total_balance, 13.0);
        assert_eq!(render.rows.len(), 3);
        assert!(render.rows[0].is_selected);
        let split = render.split.unwrap();
        assert_eq!(split.friend_name, "Clark");
        assert_eq!(split.friend_expense, Some(25.0));
    }

    #[derive(Debug, Clone)]
    enum Op {
        Add(String),
        Delete(usize),
        Select(usize),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            "[a-z]{1,8}".prop_map(Op::Add),
            (0usize..8).prop_map(Op::Delete),
            (0usize..8).prop_map(Op::Select),
        ]
    }

    proptest! {
        #[test]
        fn prop_store_invariants_hold(ops in prop::collection::vec(op_strategy(), 0..40)) {
            let mut app = app();
            let mut expected: Vec<String> = app.store.iter().map(|f| f.id.clone()).collect();

            for op in ops {
                match op {
                    Op::Add(name) => {
                        app.toggle_add_friend();
                        if let Some(form) = app.add_form.as_mut() {
                            name.chars().for_each(|c| form.name.insert(c));
                        }
                        app.submit_add_friend().unwrap();
                        expected.push(app.store.get_at(app.store.len() - 1).unwrap().id.clone());
                    }
                    Op::Delete(i) => {
                        if let Some(id) = app.store.id_at(i) {
                            let was_selected = app.selection.as_deref() == Some(id.as_str());
                            let before = app.selection.clone();
                            app.delete_friend(&id);
                            expected.retain(|e| *e != id);
                            if was_selected {
                                prop_assert_eq!(app.selection.clone(), None);
                            } else {
                                prop_assert_eq!(app.selection.clone(), before);
                            }
                        }
                    }
                    Op::Select(i) => {
                        if let Some(id) = app.store.id_at(i) {
                            app.select_friend(&id);
                        }
                    }
                }

                let ids: Vec<String> = app.store.iter().map(|f| f.id.clone()).collect();
                let unique: std::collections::HashSet<&String> = ids.iter().collect();
                prop_assert_eq!(unique.len(), ids.len());
                prop_assert_eq!(&ids, &expected);
                if let Some(sel) = app.selection.as_deref() {
                    prop_assert!(app.store.contains(sel));
                }
                let sum: f64 = app.store.iter().map(|f| f.balance).sum();
                prop_assert_eq!(app.total_balance(), sum);
            }
        }
    }
}
