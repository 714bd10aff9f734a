// Integration tests for usuarios-tui

use ratatui::{Terminal, backend::TestBackend};
use usuarios_tui::api::User;
use usuarios_tui::app::{AppState, Keymap, Theme};
use usuarios_tui::ui::render;

fn test_user(id: u64, name: &str, email: &str) -> User {
    User {
        id,
        name: name.to_string(),
        email: email.to_string(),
    }
}

fn ready_app(users: Vec<User>) -> AppState {
    let mut app = AppState::new(Theme::mocha(), Keymap::new_defaults());
    app.apply_fetch(Ok(users));
    app
}

/// Render one 80x24 frame and flatten the buffer into a string with one
/// line per terminal row.
fn render_to_text(app: &mut AppState) -> String {
    let backend = TestBackend::new(80, 24);
    let mut terminal = Terminal::new(backend).expect("create terminal");
    terminal.draw(|f| render(f, app)).expect("render frame");

    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;
    let mut out = String::new();
    for (i, cell) in buffer.content().iter().enumerate() {
        out.push_str(cell.symbol());
        if (i + 1) % width == 0 {
            out.push('\n');
        }
    }
    out
}

// 1) Theme config roundtrip and init
#[test]
fn theme_roundtrip_and_init() {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    // Unique temp path
    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("ut_theme_{}_{}.conf", std::process::id(), nonce));
    let path_str = path.to_string_lossy().to_string();

    // Roundtrip write/read
    let t = Theme::mocha();
    t.write_file(&path_str).expect("write theme");
    let t2 = Theme::from_file(&path_str).expect("read theme");
    // Compare key fields
    assert_eq!(format!("{:?}", t.text), format!("{:?}", t2.text));
    assert_eq!(format!("{:?}", t.title), format!("{:?}", t2.title));
    assert_eq!(format!("{:?}", t.header_bg), format!("{:?}", t2.header_bg));
    assert_eq!(
        format!("{:?}", t.highlight_bg),
        format!("{:?}", t2.highlight_bg)
    );

    // load_or_init creates file if missing
    let mut p2 = PathBuf::from(&path_str);
    p2.set_file_name(format!(
        "{}_init.conf",
        p2.file_stem().unwrap().to_string_lossy()
    ));
    let p2_str = p2.to_string_lossy().to_string();
    let _ = fs::remove_file(&p2_str);
    let _created = Theme::load_or_init(&p2_str);
    assert!(PathBuf::from(&p2_str).exists());

    // Cleanup best-effort
    let _ = fs::remove_file(&path_str);
    let _ = fs::remove_file(&p2_str);
}

// 2) Theme config robustness: unknown keys ignored, invalid values ignored, valid parsed
#[test]
fn theme_from_file_robustness() {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("ut_theme_rb_{}_{}.conf", std::process::id(), nonce));
    let p = path.to_string_lossy().to_string();

    // Craft a config with a mix of valid/invalid/unknown keys
    let contents = r#"
text = #112233
title = not-a-color
header_bg = reset
unknown_key = #abcdef
"#;
    fs::write(&p, contents).expect("write theme file");

    let t = Theme::from_file(&p).expect("load theme");
    let mocha = Theme::mocha();

    // text parsed as hex
    assert_eq!(
        format!("{:?}", t.text),
        format!("{:?}", ratatui::style::Color::Rgb(0x11, 0x22, 0x33))
    );
    // header_bg parsed as reset
    assert_eq!(
        format!("{:?}", t.header_bg),
        format!("{:?}", ratatui::style::Color::Reset)
    );
    // title invalid -> should remain default (mocha)
    assert_eq!(format!("{:?}", t.title), format!("{:?}", mocha.title));

    let _ = std::fs::remove_file(&p);
}

// 3) Theme write header/content: header lines present and all keys exactly once
#[test]
fn theme_write_includes_header_and_all_keys_once() {
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };

    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("ut_theme_hdr_{}_{}.conf", std::process::id(), nonce));
    let p = path.to_string_lossy().to_string();

    let t = Theme::mocha();
    t.write_file(&p).expect("write theme file");
    let contents = fs::read_to_string(&p).expect("read back theme file");

    assert!(contents.contains("# usuarios-tui theme configuration"));
    assert!(contents.contains("# Colors: hex as #RRGGBB or RRGGBB, or 'reset'"));

    // Each key appears exactly once with '='
    let keys = [
        "text = ",
        "title = ",
        "border = ",
        "header_bg = ",
        "header_fg = ",
        "status_bg = ",
        "status_fg = ",
        "highlight_fg = ",
        "highlight_bg = ",
    ];
    for k in keys {
        let count = contents.matches(k).count();
        assert_eq!(count, 1, "key '{}' should appear exactly once", k);
    }

    let _ = std::fs::remove_file(&p);
}

// 4) Keymap write/reload and custom bindings in both line orders
#[test]
fn keymap_write_and_reload_custom_bindings() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use std::{
        fs,
        time::{SystemTime, UNIX_EPOCH},
    };
    use usuarios_tui::app::KeyAction;

    let mut path = std::env::temp_dir();
    let nonce = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    path.push(format!("ut_keys_{}_{}.conf", std::process::id(), nonce));
    let p = path.to_string_lossy().to_string();

    // Defaults write with a readable header and reload unchanged
    let km = Keymap::new_defaults();
    km.write_file(&p).expect("write keymap");
    let contents = fs::read_to_string(&p).expect("read back keymap");
    assert!(contents.contains("# usuarios-tui keybindings"));
    assert!(contents.contains("Quit = q"));
    assert!(contents.contains("StartSearch = /"));

    let km2 = Keymap::from_file(&p).expect("reload keymap");
    let q = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
    assert_eq!(km2.resolve(&q), Some(KeyAction::Quit));

    // Custom bindings: preferred `Action = Key` and legacy `Key = Action`
    let custom = "# custom\nQuit = x\np = OpenHelp\n";
    fs::write(&p, custom).expect("write custom keymap");
    let km3 = Keymap::from_file(&p).expect("load custom keymap");

    let x = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
    let pkey = KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE);
    assert_eq!(km3.resolve(&x), Some(KeyAction::Quit));
    assert_eq!(km3.resolve(&pkey), Some(KeyAction::OpenHelp));
    // Defaults stay in place under overrides
    assert_eq!(km3.resolve(&q), Some(KeyAction::Quit));

    let _ = std::fs::remove_file(&p);
}

// 5) The three render phases are mutually exclusive
#[test]
fn loading_error_and_list_views_are_mutually_exclusive() {
    use usuarios_tui::error::FetchError;

    // Loading phase: nothing but the loading view
    let mut app = AppState::new(Theme::mocha(), Keymap::new_defaults());
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Cargando datos..."));
    assert!(!frame.contains("Ocurrió un error"));
    assert!(!frame.contains("Usuarios ("));

    // Error phase: full-frame error text, list never drawn
    let mut app = AppState::new(Theme::mocha(), Keymap::new_defaults());
    app.apply_fetch(Err(FetchError::Status(500)));
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Ocurrió un error: request failed with HTTP 500"));
    assert!(!frame.contains("Cargando datos..."));
    assert!(!frame.contains("Usuarios ("));
    assert!(app.users.is_empty());

    // List phase: loading and error views are gone
    let mut app = ready_app(vec![test_user(1, "Leanne Graham", "Sincere@april.biz")]);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Usuarios (1)"));
    assert!(frame.contains("Leanne Graham"));
    assert!(!frame.contains("Cargando datos..."));
    assert!(!frame.contains("Ocurrió un error"));
}

// 6) Happy path from fetch delivery to the rendered list
#[test]
fn fetch_delivery_updates_the_rendered_frame() {
    use usuarios_tui::app::update::poll_fetch;

    let mut app = AppState::new(Theme::mocha(), Keymap::new_defaults());
    let (tx, rx) = std::sync::mpsc::channel();
    app.fetch_rx = Some(rx);

    // Before delivery: loading view
    poll_fetch(&mut app);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Cargando datos..."));

    tx.send(Ok(vec![test_user(1, "Leanne Graham", "Sincere@april.biz")]))
        .unwrap();
    poll_fetch(&mut app);

    let frame = render_to_text(&mut app);
    assert!(frame.contains("Usuarios (1)"));
    assert!(frame.contains("Leanne Graham"));
    assert!(frame.contains("Sincere@april.biz"));
    assert!(app.fetch_rx.is_none());
}

// 7) A full session: search, add and delete driven by key events
#[test]
fn search_add_delete_session() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use usuarios_tui::app::update::handle_key;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }
    fn type_str(app: &mut AppState, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    let mut app = ready_app(vec![
        test_user(1, "Leanne Graham", "Sincere@april.biz"),
        test_user(2, "Ervin Howell", "Shanna@melissa.tv"),
    ]);

    // Live search narrows the table and the details pane follows
    press(&mut app, KeyCode::Char('/'));
    type_str(&mut app, "melissa");
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Search: melissa"));
    assert!(frame.contains("mode: SEARCH"));
    assert!(frame.contains("Usuarios (1)"));
    assert!(frame.contains("Ervin Howell"));
    assert!(!frame.contains("Leanne Graham"));

    // Enter keeps the filter; the status bar shows it as a chip
    press(&mut app, KeyCode::Enter);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("mode: NORMAL"));
    assert!(frame.contains("filter:[melissa]"));
    assert!(frame.contains("Usuarios (1)"));

    // Restarting the search clears the old filter
    press(&mut app, KeyCode::Char('/'));
    press(&mut app, KeyCode::Esc);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Usuarios (2)"));

    // Add a user through the form; the new entry lands at the top
    press(&mut app, KeyCode::Char('n'));
    type_str(&mut app, "Bob");
    press(&mut app, KeyCode::Tab);
    type_str(&mut app, "bob@x.com");
    press(&mut app, KeyCode::Enter);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Usuarios (3)"));
    assert!(frame.contains("Bob"));
    assert_eq!(app.users[0].name, "Bob");
    assert_eq!(app.users[0].id, 3); // seeded past the largest remote id

    // Delete the selected user (the fresh one at index 0)
    press(&mut app, KeyCode::Char('d'));
    let frame = render_to_text(&mut app);
    assert!(frame.contains("Usuarios (2)"));
    assert_eq!(
        app.users.iter().map(|u| u.id).collect::<Vec<_>>(),
        vec![1, 2]
    );
}

// 8) Add-user form: focus marker moves with Tab and the modal closes on submit
#[test]
fn add_user_form_renders_focus_and_closes_on_submit() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use usuarios_tui::app::update::handle_key;

    fn press(app: &mut AppState, code: KeyCode) {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE));
    }

    let mut app = ready_app(vec![]);
    press(&mut app, KeyCode::Char('n'));

    let frame = render_to_text(&mut app);
    assert!(frame.contains("Nuevo usuario"));
    assert!(frame.contains("▶ Nombre:"));
    assert!(frame.contains("mode: MODAL"));

    press(&mut app, KeyCode::Tab);
    let frame = render_to_text(&mut app);
    assert!(frame.contains("▶ Email:"));
    assert!(!frame.contains("▶ Nombre:"));

    // Type through the form and submit
    press(&mut app, KeyCode::BackTab);
    for c in "Ana".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Tab);
    for c in "ana@x.com".chars() {
        press(&mut app, KeyCode::Char(c));
    }
    press(&mut app, KeyCode::Enter);

    let frame = render_to_text(&mut app);
    assert!(!frame.contains("Nuevo usuario"));
    assert!(frame.contains("Usuarios (1)"));
    assert!(frame.contains("Ana"));
}

// 9) Help modal lists the active bindings
#[test]
fn help_modal_lists_active_bindings() {
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use usuarios_tui::app::update::handle_key;

    let mut app = ready_app(vec![test_user(1, "Ana", "ana@x.com")]);
    handle_key(
        &mut app,
        KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE),
    );

    let frame = render_to_text(&mut app);
    assert!(frame.contains("General:"));
    assert!(frame.contains("Quit: q"));
    assert!(frame.contains("Help: ?"));
    assert!(frame.contains("Navigation:"));
    assert!(frame.contains("Move down: Down, j"));
    assert!(frame.contains("Delete selection: Delete, d"));

    handle_key(&mut app, KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
    let frame = render_to_text(&mut app);
    assert!(!frame.contains("General:"));
    assert!(frame.contains("Usuarios (1)"));
}
