use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use std::time::Duration;
use tracing::{debug, info};

use crate::api;
use crate::app::{AddField, AppState, InputMode, KeyAction, Keymap, ModalState, Options, Theme};
use crate::ui;

/// Build the initial state, start the one-and-only fetch, and run the draw /
/// poll / update loop until the user quits.
pub fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    opts: &Options,
) -> Result<()> {
    let theme = Theme::load_or_init(&opts.theme_path);
    let keymap = Keymap::load_or_init(&opts.keybinds_path);
    let mut app = AppState::new(theme, keymap);
    app.fetch_rx = Some(api::spawn_fetch(opts.endpoint.clone(), opts.timeout));

    loop {
        poll_fetch(&mut app);

        terminal.draw(|f| {
            ui::render(f, &mut app);
        })?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press && handle_key(&mut app, key) {
                    break;
                }
            }
        }
    }

    info!(uptime_secs = app.started_at.elapsed().as_secs(), "exiting");
    Ok(())
}

/// Drain the fetch channel if the result has arrived. Runs every tick while
/// the receiver is still armed; after the first delivery the receiver is
/// dropped so no second fetch can ever be observed.
pub fn poll_fetch(app: &mut AppState) {
    if let Some(rx) = &app.fetch_rx {
        if let Ok(outcome) = rx.try_recv() {
            app.apply_fetch(outcome);
            app.fetch_rx = None;
        }
    }
}

/// Handle one key press; returns `true` when the app should exit.
pub fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    match app.input_mode {
        InputMode::Normal => handle_normal_key(app, key),
        InputMode::Search => {
            handle_search_key(app, key.code);
            false
        }
        InputMode::Modal => {
            handle_modal_key(app, key.code);
            false
        }
    }
}

fn handle_normal_key(app: &mut AppState, key: KeyEvent) -> bool {
    let action = app.keymap.resolve(&key);

    // The loading and error screens only react to Quit.
    if !app.ready() {
        return matches!(action, Some(KeyAction::Quit));
    }

    match action {
        Some(KeyAction::Quit) => return true,
        Some(KeyAction::StartSearch) => {
            app.set_search_text(String::new());
            app.input_mode = InputMode::Search;
        }
        Some(KeyAction::NewUser) => {
            app.modal = Some(ModalState::AddUser {
                field: AddField::Name,
            });
            app.input_mode = InputMode::Modal;
        }
        Some(KeyAction::DeleteSelection) => {
            if let Some(id) = app.selected_user().map(|u| u.id) {
                app.delete_user(id);
            }
        }
        Some(KeyAction::OpenHelp) => {
            app.modal = Some(ModalState::Help);
            app.input_mode = InputMode::Modal;
        }
        Some(KeyAction::MoveUp) => {
            if app.selected_index > 0 {
                app.selected_index -= 1;
            }
        }
        Some(KeyAction::MoveDown) => {
            if app.selected_index + 1 < app.filtered.len() {
                app.selected_index += 1;
            }
        }
        Some(KeyAction::PageUp) => {
            let rpp = app.rows_per_page.max(1);
            app.selected_index = app.selected_index.saturating_sub(rpp);
        }
        Some(KeyAction::PageDown) => {
            let rpp = app.rows_per_page.max(1);
            app.selected_index =
                (app.selected_index + rpp).min(app.filtered.len().saturating_sub(1));
        }
        Some(KeyAction::Ignore) | None => {}
    }
    false
}

// Search edits go through `set_search_text` so every keystroke refilters the
// view immediately.
fn handle_search_key(app: &mut AppState, code: KeyCode) {
    match code {
        KeyCode::Enter => {
            app.input_mode = InputMode::Normal;
            debug!(query = %app.search_query, matches = app.filtered.len(), "search committed");
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.set_search_text(String::new());
        }
        KeyCode::Backspace => {
            let mut q = app.search_query.clone();
            q.pop();
            app.set_search_text(q);
        }
        KeyCode::Char(c) => {
            let mut q = app.search_query.clone();
            q.push(c);
            app.set_search_text(q);
        }
        _ => {}
    }
}

fn handle_modal_key(app: &mut AppState, code: KeyCode) {
    match &mut app.modal {
        Some(ModalState::AddUser { field }) => match code {
            // Closing the form keeps the drafts; only a successful add
            // clears them.
            KeyCode::Esc => close_modal(app),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                *field = match *field {
                    AddField::Name => AddField::Email,
                    AddField::Email => AddField::Name,
                };
            }
            KeyCode::Enter => {
                let name = app.draft_name.clone();
                let email = app.draft_email.clone();
                if app.add_user(&name, &email) {
                    close_modal(app);
                }
                // Blank input is silently ignored and the form stays open.
            }
            KeyCode::Backspace => match field {
                AddField::Name => {
                    app.draft_name.pop();
                }
                AddField::Email => {
                    app.draft_email.pop();
                }
            },
            KeyCode::Char(c) => match field {
                AddField::Name => app.draft_name.push(c),
                AddField::Email => app.draft_email.push(c),
            },
            _ => {}
        },
        Some(ModalState::Help) => match code {
            KeyCode::Esc | KeyCode::Enter => close_modal(app),
            _ => {}
        },
        None => {}
    }
}

fn close_modal(app: &mut AppState) {
    app.modal = None;
    app.input_mode = InputMode::Normal;
}
