//! Eat-'n-Split - actor-based bill splitting in the terminal
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events

use std::io;
use std::time::Duration;

use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use eat_n_split::app::{AppActor, AppState};
use eat_n_split::balance::format_amount;
use eat_n_split::constants::{APP_NAME, APP_VERSION, LOG_FILE_NAME, POLL_INTERVAL_MS};
use eat_n_split::forms::{ProfileField, SplitField, TextField};
use eat_n_split::messages::ui_events::key_to_ui_event;
use eat_n_split::messages::{Focus, RenderState, SplitView, UiEvent};
use eat_n_split::models::Payer;
use eat_n_split::roster::{default_roster_path, load_roster};
use eat_n_split::ui::{border_style, friend_item, render_input, total_line};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, "Starting {}", APP_NAME);
    let friends = load_roster(&default_roster_path());

    // Terminal setup
    enable_raw_mode().context("enabling raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn app actor
    let app_actor = AppActor::new(AppState::new(friends), render_tx);
    tokio::spawn(app_actor.run(ui_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(key, current_state.focus, current_state.show_help) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Title + total
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(main_chunks[1]);

    draw_sidebar(f, state, columns[0]);
    match &state.split {
        Some(split) => draw_split_form(f, split, state.focus == Focus::SplitBill, columns[1]),
        None => draw_split_placeholder(f, columns[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut line = Line::from(Span::styled(
        format!(" {} ", APP_NAME),
        Style::default().fg(Color::Black).bg(Color::Cyan).bold(),
    ));
    line.spans.extend(total_line(state.total_balance).spans);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_sidebar(f: &mut Frame, state: &RenderState, area: Rect) {
    let add_height = if state.add_form.is_some() { 8 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(add_height)])
        .split(area);

    draw_friend_list(f, state, chunks[0]);
    if state.add_form.is_some() {
        draw_add_form(f, state, chunks[1]);
    }
}

fn draw_friend_list(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = matches!(state.focus, Focus::Friends | Focus::EditRow);
    let title = if state.add_form.is_some() {
        " Friends (a:close form) "
    } else {
        " Friends (a:add friend) "
    };

    let items: Vec<ListItem> = state
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| friend_item(row, is_focused && i == state.cursor))
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(is_focused))
            .title(title),
    );

    let mut list_state = ListState::default();
    if !state.rows.is_empty() {
        list_state.select(Some(state.cursor));
    }
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_add_form(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(form) = &state.add_form else {
        return;
    };
    let is_focused = state.focus == Focus::AddFriend;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .title(" Add Friend (Enter:add Esc:close) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3)])
        .split(inner);

    let name_active = is_focused && form.active == ProfileField::Name;
    let image_active = is_focused && form.active == ProfileField::Image;
    f.render_widget(render_input(form.name.as_str(), " Friend name ", name_active), rows[0]);
    f.render_widget(render_input(form.image.as_str(), " Image URL ", image_active), rows[1]);

    if name_active {
        place_cursor(f, &form.name, rows[0]);
    } else if image_active {
        place_cursor(f, &form.image, rows[1]);
    }
}

fn draw_split_form(f: &mut Frame, split: &SplitView, is_focused: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .title(format!(" Split a bill with {} ", split.friend_name));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &split.form;
    let active = |field: SplitField| is_focused && form.active == field;

    f.render_widget(render_input(form.bill_field().as_str(), " Bill value ", active(SplitField::Bill)), rows[0]);
    f.render_widget(
        render_input(form.user_expense_field().as_str(), " Your expense ", active(SplitField::UserExpense)),
        rows[1],
    );

    let friend_title = format!(" {}'s expense ", split.friend_name);
    let friend_expense = split.friend_expense.map(format_amount).unwrap_or_default();
    let friend_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(friend_title);
    f.render_widget(
        Paragraph::new(friend_expense)
            .style(Style::default().fg(Color::DarkGray))
            .block(friend_block),
        rows[2],
    );

    let payer_spans: Vec<Span> = [Payer::User, Payer::Friend]
        .iter()
        .map(|payer| {
            let label = format!(" {} ", payer.label(&split.friend_name));
            if *payer == form.payer() {
                Span::styled(label, Style::default().fg(Color::Black).bg(Color::Cyan).bold())
            } else {
                Span::styled(label, Style::default().fg(Color::Gray))
            }
        })
        .collect();
    let payer_block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(active(SplitField::Payer)))
        .title(" Who is paying the bill? (←/→) ");
    f.render_widget(Paragraph::new(Line::from(payer_spans)).block(payer_block), rows[3]);

    let hint = Paragraph::new(" Enter: split bill   Esc: close")
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(hint, rows[4]);

    if active(SplitField::Bill) {
        place_cursor(f, form.bill_field(), rows[0]);
    } else if active(SplitField::UserExpense) {
        place_cursor(f, form.user_expense_field(), rows[1]);
    }
}

fn draw_split_placeholder(f: &mut Frame, area: Rect) {
    let content = "No friend selected.\n\nMove to a friend and press Enter to split a bill.";
    let paragraph = Paragraph::new(content)
        .style(Style::default().fg(Color::DarkGray))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(false))
                .title(" Split a bill "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn place_cursor(f: &mut Frame, field: &TextField, area: Rect) {
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + field.cursor_column() as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    if let Some(notice) = &state.notice {
        let bar = Paragraph::new(format!(" {} ", notice)).style(Style::default().fg(Color::Red));
        f.render_widget(bar, area);
        return;
    }

    let status = match state.focus {
        Focus::Friends => " ↑/↓:move | Enter:select | e:edit | d:delete | a:add | Tab:panel | ?:help | q:quit ",
        Focus::EditRow => " Tab:name/image | Enter:save | Esc:cancel | Shift+Tab:back to list ",
        Focus::AddFriend => " Tab:next field | Enter:add | Esc:close | Shift+Tab:back to list ",
        Focus::SplitBill => " ↑/↓:field | ←/→:payer | Enter:split | Esc:close | Shift+Tab:back to list ",
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 EAT-'N-SPLIT - Keyboard Shortcuts

 FRIENDS
   ↑ / ↓  (k / j)     Move between friends
   Enter / Space      Select friend to split / close
   e                  Edit name and image
   d                  Delete friend
   a                  Add friend / close form
   Tab                Next open panel

 FORMS
   Tab                Next field
   Enter              Submit
   Esc                Discard and close
   Shift+Tab          Back to list, keep draft

 SPLIT BILL
   ↑ / ↓              Previous / next field
   ← / → / Space      Change who is paying

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
