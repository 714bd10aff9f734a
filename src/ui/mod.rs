pub mod components;
pub mod users;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::app::{AppState, InputMode, ModalState};

/// Top-level render dispatch. The three phases are mutually exclusive and
/// checked in order; the loading and error views own the whole frame, so
/// nothing of the list screen is drawn beneath them.
pub fn render(f: &mut Frame, app: &mut AppState) {
    if app.loading {
        components::render_loading(f, f.area(), app);
        return;
    }
    if let Some(message) = app.error.clone() {
        components::render_error(f, f.area(), app, &message);
        return;
    }
    render_list_screen(f, app);
}

fn render_list_screen(f: &mut Frame, app: &mut AppState) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(5), Constraint::Length(1)].as_ref())
        .split(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)].as_ref())
        .split(root[1]);

    let prompt = match app.input_mode {
        InputMode::Search => format!("  Search: {}", app.search_query),
        _ => String::new(),
    };
    let p = Paragraph::new(format!(
        "Usuarios desde la API{prompt}  — /: search; n: new user; Del: delete; ?: help; q: quit"
    ))
    .block(
        Block::default()
            .title("usuarios-tui")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    )
    .style(
        Style::default()
            .fg(app.theme.header_fg)
            .bg(app.theme.header_bg),
    );
    f.render_widget(p, root[0]);

    users::render_users_table(f, body[0], app);
    users::render_user_details(f, body[1], app);

    components::render_status_bar(f, root[2], app);

    if app.modal.is_some() {
        render_modal(f, f.area(), app);
    }
}

fn render_modal(f: &mut Frame, area: Rect, app: &mut AppState) {
    if let Some(state) = app.modal.clone() {
        match state {
            ModalState::AddUser { field } => {
                users::render_add_user_modal(f, area, app, field);
            }
            ModalState::Help => {
                components::render_help_modal(f, area, app);
            }
        }
    }
}
