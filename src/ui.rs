use ratatui::{prelude::*, widgets::*};

use crate::balance::{format_amount, BalanceStatus};
use crate::forms::{ProfileField, TextField};
use crate::messages::FriendRow;

/// Border style for a panel; the panel receiving keys is highlighted
pub fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

/// Renders a text input field
pub fn render_input<'a>(content: &'a str, title: &'a str, is_focused: bool) -> Paragraph<'a> {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(is_focused))
        .title(title);

    Paragraph::new(content).block(block)
}

/// Color for a friend's balance line
pub fn balance_color(status: &BalanceStatus) -> Color {
    match status {
        BalanceStatus::YouOwe(_) => Color::Red,
        BalanceStatus::OwesYou(_) => Color::Green,
        BalanceStatus::Even => Color::Gray,
    }
}

/// Header line with the summed balance of all friends
pub fn total_line(total: f64) -> Line<'static> {
    let color = balance_color(&BalanceStatus::of(total));
    Line::from(vec![
        Span::raw(" Total Balance: "),
        Span::styled(format!("${}", format_amount(total)), Style::default().fg(color).bold()),
    ])
}

/// List item for one friend, in display or edit mode
pub fn friend_item(row: &FriendRow, is_cursor: bool) -> ListItem<'static> {
    let marker = if row.is_selected { "▶ " } else { "  " };
    let name_style = if is_cursor {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default().bold()
    };

    let lines = match &row.edit {
        Some(draft) => vec![
            Line::from(
                [
                    Span::raw(marker),
                    Span::styled("✎ ", Style::default().fg(Color::Yellow)),
                ]
                .into_iter()
                .chain(draft_spans(&draft.name, draft.active == ProfileField::Name))
                .collect::<Vec<_>>(),
            ),
            Line::from(
                std::iter::once(Span::raw("    "))
                    .chain(draft_spans(&draft.image, draft.active == ProfileField::Image))
                    .collect::<Vec<_>>(),
            ),
        ],
        None => vec![
            Line::from(vec![
                Span::raw(marker),
                Span::styled(row.friend.name.clone(), name_style),
                Span::styled(format!("  {}", row.friend.image), Style::default().fg(Color::DarkGray)),
            ]),
            Line::from(vec![
                Span::raw("    "),
                Span::styled(
                    row.status.describe(&row.friend.name),
                    Style::default().fg(balance_color(&row.status)),
                ),
            ]),
        ],
    };

    let item = ListItem::new(lines);
    if row.is_selected {
        item.style(Style::default().bg(Color::Rgb(40, 40, 60)))
    } else {
        item
    }
}

/// Draft text; the active field shows its cursor as a reversed cell
pub fn draft_spans(field: &TextField, is_active: bool) -> Vec<Span<'static>> {
    if !is_active {
        return vec![Span::styled(field.as_str().to_string(), Style::default().fg(Color::White))];
    }

    let style = Style::default().fg(Color::Yellow).underlined();
    let (before, rest) = field.as_str().split_at(field.cursor());
    let mut chars = rest.chars();
    let at_cursor = chars.next().map(String::from).unwrap_or_else(|| String::from(" "));

    vec![
        Span::styled(before.to_string(), style),
        Span::styled(at_cursor, style.reversed()),
        Span::styled(chars.as_str().to_string(), style),
    ]
}
