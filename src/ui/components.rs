//! Shared UI components (status bar, full-frame phase views, help modal).
//!
//! Contains the building blocks that are not tied to the user table itself.
//!
use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::app::{AppState, InputMode, KeyAction, Keymap};
use std::collections::{BTreeMap, BTreeSet};

/// Render the bottom status bar with mode and counts.
pub fn render_status_bar(f: &mut Frame, area: Rect, app: &AppState) {
    let mode = match app.input_mode {
        InputMode::Normal => "NORMAL",
        InputMode::Search => "SEARCH",
        InputMode::Modal => "MODAL",
    };
    let filter_str = if app.search_query.is_empty() {
        String::new()
    } else {
        format!("  filter:[{}]", app.search_query)
    };
    let msg = format!(
        "mode: {mode}  users:{}  shown:{}  rows/page:{}{}",
        app.users.len(),
        app.filtered.len(),
        app.rows_per_page,
        filter_str
    );
    let p = Paragraph::new(msg).style(
        Style::default()
            .fg(app.theme.status_fg)
            .bg(app.theme.status_bg),
    );
    f.render_widget(p, area);
}

/// Compute a rectangle centered within `area` with a maximum size.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the full-frame loading view shown while the initial fetch is in
/// flight. Nothing else is drawn in this phase.
pub fn render_loading(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 40u16.min(area.width.saturating_sub(4)).max(20);
    let rect = centered_rect(width, 5, area);
    let lines = vec![
        Line::from(Span::styled(
            "Cargando datos...",
            Style::default()
                .fg(app.theme.text)
                .add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "q: quit",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let p = Paragraph::new(lines).alignment(Alignment::Center).block(
        Block::default()
            .title("usuarios")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(p, rect);
}

/// Render the full-frame error view for a failed fetch. The message keeps
/// the `Ocurrió un error: ` prefix so the cause is always visible.
pub fn render_error(f: &mut Frame, area: Rect, app: &AppState, message: &str) {
    let width = 60u16.min(area.width.saturating_sub(4)).max(30);
    let max_h = area.height.saturating_sub(4).max(5);
    let height = 7u16.min(max_h);
    let rect = centered_rect(width, height, area);
    let lines = vec![
        Line::from(Span::styled(
            format!("Ocurrió un error: {message}"),
            Style::default().fg(app.theme.title),
        )),
        Line::raw(""),
        Line::from(Span::styled(
            "q: quit",
            Style::default().add_modifier(Modifier::ITALIC),
        )),
    ];
    let p = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Error")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, rect);
}

/// Render the help modal. Quit, search, navigation and list commands are
/// read back from the active keymap so a customized keybinds file shows up
/// here too; editing keys inside search and the add form are fixed.
pub fn render_help_modal(f: &mut Frame, area: Rect, app: &AppState) {
    let width = 64u16.min(area.width.saturating_sub(4)).max(44);
    let height = 18u16.min(area.height.saturating_sub(4)).max(12);
    let rect = centered_rect(width, height, area);

    // Build friendly maps of actions -> keys
    let mut general: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    let mut navigation: BTreeMap<&'static str, BTreeSet<String>> = BTreeMap::new();
    for ((mods, code), action) in app.keymap.all_bindings().into_iter() {
        let key = Keymap::format_key(mods, code);
        match action {
            KeyAction::Quit => {
                general.entry("Quit").or_default().insert(key);
            }
            KeyAction::StartSearch => {
                general.entry("Search").or_default().insert(key);
            }
            KeyAction::NewUser => {
                general.entry("New user").or_default().insert(key);
            }
            KeyAction::DeleteSelection => {
                general.entry("Delete selection").or_default().insert(key);
            }
            KeyAction::OpenHelp => {
                general.entry("Help").or_default().insert(key);
            }
            KeyAction::MoveUp => {
                navigation.entry("Move up").or_default().insert(key);
            }
            KeyAction::MoveDown => {
                navigation.entry("Move down").or_default().insert(key);
            }
            KeyAction::PageUp => {
                navigation.entry("Page up").or_default().insert(key);
            }
            KeyAction::PageDown => {
                navigation.entry("Page down").or_default().insert(key);
            }
            KeyAction::Ignore => {}
        }
    }

    let mut lines: Vec<Line> = vec![
        Line::from(Span::styled(
            "General:",
            Style::default().add_modifier(Modifier::BOLD),
        )),
    ];
    for (label, keys) in general.iter() {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {label}: ")),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Navigation:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    for (label, keys) in navigation.iter() {
        let joined = keys.iter().cloned().collect::<Vec<_>>().join(", ");
        lines.push(Line::from(vec![
            Span::raw(format!("  {label}: ")),
            Span::styled(joined, Style::default().add_modifier(Modifier::ITALIC)),
        ]));
    }

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "Search:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw(
        "  type to filter as you go; Enter keeps the filter, Esc clears it",
    ));

    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "New user form:",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::raw("  Tab: switch field; Enter: add; Esc: close"));

    lines.push(Line::raw(""));
    lines.push(Line::from(vec![
        Span::raw("Close help: "),
        Span::styled(
            "Esc / Enter",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]));

    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .title("Help")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
