//! App actor - message loop processing UI events

use tokio::sync::mpsc;

use crate::app::state::AppState;
use crate::messages::{RenderState, UiEvent};

/// App actor that owns the application state and processes UI events
pub struct AppActor {
    state: AppState,
    render_tx: mpsc::UnboundedSender<RenderState>,
}

impl AppActor {
    pub fn new(state: AppState, render_tx: mpsc::UnboundedSender<RenderState>) -> Self {
        AppActor { state, render_tx }
    }

    /// Run the actor message loop
    pub async fn run(mut self, mut ui_rx: mpsc::UnboundedReceiver<UiEvent>) {
        // Send initial render state
        let _ = self.render_tx.send(self.state.to_render_state());

        while let Some(event) = ui_rx.recv().await {
            if self.handle_ui_event(event) {
                tracing::info!("Quit requested");
                break;
            }
            let _ = self.render_tx.send(self.state.to_render_state());
        }
    }

    /// Handle a UI event, returns true if quit was requested
    fn handle_ui_event(&mut self, event: UiEvent) -> bool {
        self.state.notice = None;

        match event {
            // Friend list
            UiEvent::CursorUp => self.state.cursor_up(),
            UiEvent::CursorDown => self.state.cursor_down(),
            UiEvent::ToggleSelect => self.state.toggle_select_at_cursor(),
            UiEvent::StartEdit => self.state.start_edit_at_cursor(),
            UiEvent::DeleteFriend => self.state.delete_at_cursor(),
            UiEvent::ToggleAddFriend => self.state.toggle_add_friend(),
            UiEvent::NextPanel => self.state.next_panel(),

            // Form input
            UiEvent::CharInput(c) => self.state.enter_char(c),
            UiEvent::Backspace => self.state.delete_char(),
            UiEvent::CursorLeft => self.state.move_cursor_left(),
            UiEvent::CursorRight => self.state.move_cursor_right(),
            UiEvent::NextField => self.state.next_field(),
            UiEvent::PrevField => self.state.prev_field(),
            UiEvent::Submit => self.state.submit(),
            UiEvent::Cancel => self.state.cancel(),
            UiEvent::FocusList => self.state.focus_list(),

            // Popups
            UiEvent::ToggleHelp => self.state.toggle_help(),
            UiEvent::CloseHelp => self.state.close_help(),

            // System
            UiEvent::Quit => return true,
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{initial_friends, SequentialIds};

    #[tokio::test]
    async fn test_actor_emits_render_state_per_event() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let state = AppState::with_ids(initial_friends(), Box::new(SequentialIds::new("t")));
        let handle = tokio::spawn(AppActor::new(state, render_tx).run(ui_rx));

        ui_tx.send(UiEvent::ToggleSelect).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        let initial = render_rx.recv().await.unwrap();
        assert_eq!(initial.total_balance, 13.0);
        assert!(initial.split.is_none());

        let selected = render_rx.recv().await.unwrap();
        assert_eq!(selected.split.unwrap().friend_name, "Clark");
        assert!(render_rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_notice_cleared_by_next_event() {
        let (ui_tx, ui_rx) = mpsc::unbounded_channel();
        let (render_tx, mut render_rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(AppActor::new(AppState::new(initial_friends()), render_tx).run(ui_rx));

        ui_tx.send(UiEvent::ToggleAddFriend).unwrap();
        ui_tx.send(UiEvent::Submit).unwrap();
        ui_tx.send(UiEvent::CharInput('D')).unwrap();
        ui_tx.send(UiEvent::Quit).unwrap();
        handle.await.unwrap();

        let states: Vec<RenderState> = std::iter::from_fn(|| render_rx.try_recv().ok()).collect();
        assert_eq!(states.len(), 4);
        assert_eq!(states[2].notice.as_deref(), Some("friend name is required"));
        assert_eq!(states[3].notice, None);
        assert_eq!(states[3].rows.len(), 3);
    }
}
