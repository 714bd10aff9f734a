use ratatui::Frame;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table};

use crate::app::{AddField, AppState};

pub fn render_users_table(f: &mut Frame, area: Rect, app: &mut AppState) {
    let body_height = area.height.saturating_sub(3) as usize;
    if body_height > 0 {
        app.rows_per_page = body_height;
    }

    let rpp = app.rows_per_page.max(1);
    let start = (app.selected_index / rpp) * rpp;
    let end = (start + rpp).min(app.filtered.len());
    let slice = &app.filtered[start..end];

    let rows = slice.iter().enumerate().map(|(i, u)| {
        let absolute_index = start + i;
        let style = if absolute_index == app.selected_index {
            Style::default()
                .fg(app.theme.highlight_fg)
                .bg(app.theme.highlight_bg)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };
        Row::new(vec![
            Cell::from(u.id.to_string()),
            Cell::from(u.name.clone()),
            Cell::from(u.email.clone()),
        ])
        .style(style)
    });

    let widths = [
        Constraint::Length(6),
        Constraint::Percentage(45),
        Constraint::Percentage(55),
    ];

    let header = Row::new(vec!["ID", "NOMBRE", "EMAIL"]).style(
        Style::default()
            .fg(app.theme.title)
            .add_modifier(Modifier::BOLD),
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(format!("Usuarios ({})", app.filtered.len()))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        )
        .column_spacing(1);

    f.render_widget(table, area);
}

pub fn render_user_details(f: &mut Frame, area: Rect, app: &AppState) {
    let (id, name, email) = match app.selected_user() {
        Some(u) => (u.id.to_string(), u.name.clone(), u.email.clone()),
        None => (String::new(), String::new(), String::new()),
    };

    let text = format!("ID: {id}\nNombre: {name}\nEmail: {email}");
    let p = Paragraph::new(text)
        .style(Style::default().fg(app.theme.text))
        .block(
            Block::default()
                .title("Detalles")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        );
    f.render_widget(p, area);
}

/// Render the add-user form. The focused field carries the marker and the
/// draft buffers are shown as typed.
pub fn render_add_user_modal(f: &mut Frame, area: Rect, app: &AppState, field: AddField) {
    let rect = crate::ui::components::centered_rect(50, 8, area);
    let name_marker = if field == AddField::Name { "▶" } else { " " };
    let email_marker = if field == AddField::Email { "▶" } else { " " };
    let body = format!(
        "{} Nombre: {}\n{} Email:  {}\n\nTab: switch field; Enter: add; Esc: close",
        name_marker, app.draft_name, email_marker, app.draft_email
    );
    let p = Paragraph::new(body).block(
        Block::default()
            .title("Nuevo usuario")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(app.theme.border)),
    );
    f.render_widget(Clear, rect);
    f.render_widget(p, rect);
}
