//! Application state types and entry glue.
//!
//! Defines enums and structs that model the TUI state, the in-memory
//! operations over the user list (add, delete, search), and helpers to run
//! the application loop (re-exported as `run`).

pub mod keymap;
pub mod theme;
pub mod update;

use std::sync::mpsc;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::api::{self, FetchResult, User};
use crate::search::apply_search;

pub use keymap::{KeyAction, Keymap};
pub use theme::Theme;

/// Current input mode for key handling.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
    Modal,
}

/// Which field of the add-user form has focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddField {
    Name,
    Email,
}

/// Modal dialog states.
#[derive(Clone, Debug)]
pub enum ModalState {
    AddUser { field: AddField },
    Help,
}

/// Runtime options resolved from the CLI in `main`.
#[derive(Clone, Debug)]
pub struct Options {
    pub endpoint: String,
    pub timeout: Duration,
    pub theme_path: String,
    pub keybinds_path: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            endpoint: api::DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(api::DEFAULT_TIMEOUT_SECS),
            theme_path: "theme.conf".to_string(),
            keybinds_path: "keybinds.conf".to_string(),
        }
    }
}

pub struct AppState {
    pub started_at: Instant,
    /// Source collection. Remote order is preserved on load and local adds
    /// are prepended; the list is never re-sorted.
    pub users: Vec<User>,
    /// Derived view matching `search_query`; what the table renders.
    pub filtered: Vec<User>,
    /// True only while the initial fetch is in flight.
    pub loading: bool,
    /// Set iff the initial fetch failed; terminal for this session.
    pub error: Option<String>,
    /// Raw search text, stored verbatim.
    pub search_query: String,
    /// Uncommitted add-form input, cleared only by a successful add.
    pub draft_name: String,
    pub draft_email: String,
    pub selected_index: usize,
    pub rows_per_page: usize,
    pub input_mode: InputMode,
    pub modal: Option<ModalState>,
    pub theme: Theme,
    pub keymap: Keymap,
    /// Channel delivering the single fetch result; taken once.
    pub fetch_rx: Option<mpsc::Receiver<FetchResult>>,
    /// Monotonic id source for local adds; never reuses an id, even after
    /// deletes, so ids stay unique under rapid successive adds.
    next_id: u64,
}

impl AppState {
    /// Fresh state in the loading phase. No IO happens here; the caller
    /// starts the fetch (see [`update::run_app`]) or injects data directly
    /// via [`AppState::apply_fetch`].
    pub fn new(theme: Theme, keymap: Keymap) -> Self {
        Self {
            started_at: Instant::now(),
            users: Vec::new(),
            filtered: Vec::new(),
            loading: true,
            error: None,
            search_query: String::new(),
            draft_name: String::new(),
            draft_email: String::new(),
            selected_index: 0,
            rows_per_page: 10,
            input_mode: InputMode::Normal,
            modal: None,
            theme,
            keymap,
            fetch_rx: None,
            next_id: 1,
        }
    }

    /// Whether the list screen is active: the fetch finished and succeeded.
    pub fn ready(&self) -> bool {
        !self.loading && self.error.is_none()
    }

    /// Apply the outcome of the initial fetch. On success the remote order
    /// is kept as-is and the id source is seeded past the largest remote id;
    /// on failure the list stays empty and the error text is kept for the
    /// error view.
    pub fn apply_fetch(&mut self, outcome: FetchResult) {
        self.loading = false;
        match outcome {
            Ok(users) => {
                self.next_id = users.iter().map(|u| u.id).max().unwrap_or(0) + 1;
                self.users = users;
                self.error = None;
                apply_search(self);
            }
            Err(err) => {
                self.error = Some(err.to_string());
            }
        }
    }

    /// Add a user built from the trimmed inputs and prepend it to the list.
    ///
    /// If either input trims to empty the call is a silent no-op and returns
    /// `false`. On success both draft buffers are cleared and the filtered
    /// view is recomputed. Never touches the network.
    pub fn add_user(&mut self, name: &str, email: &str) -> bool {
        let name = name.trim();
        let email = email.trim();
        if name.is_empty() || email.is_empty() {
            return false;
        }
        let user = User {
            id: self.next_id,
            name: name.to_string(),
            email: email.to_string(),
        };
        self.next_id += 1;
        debug!(id = user.id, "user added");
        self.users.insert(0, user);
        self.draft_name.clear();
        self.draft_email.clear();
        apply_search(self);
        true
    }

    /// Remove the user with the given id, if present. Deleting an absent id
    /// is a silent no-op, so the operation is idempotent.
    pub fn delete_user(&mut self, id: u64) -> bool {
        let before = self.users.len();
        self.users.retain(|u| u.id != id);
        let removed = self.users.len() != before;
        if removed {
            debug!(id, "user deleted");
            apply_search(self);
        }
        removed
    }

    /// Replace the search text verbatim (no trimming) and refilter.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_query = text.into();
        apply_search(self);
    }

    /// The user under the cursor in the filtered view.
    pub fn selected_user(&self) -> Option<&User> {
        self.filtered.get(self.selected_index)
    }
}

/// Resolve the read path for a config file: the working directory first,
/// then `$XDG_CONFIG_HOME/usuarios-tui/<name>`, then
/// `~/.config/usuarios-tui/<name>`.
pub fn config_file_read_path(name: &str) -> Option<String> {
    if std::path::Path::new(name).exists() {
        return Some(name.to_string());
    }
    let base = std::env::var_os("XDG_CONFIG_HOME")
        .map(std::path::PathBuf::from)
        .or_else(|| {
            std::env::var_os("HOME").map(|h| std::path::PathBuf::from(h).join(".config"))
        })?;
    let candidate = base.join("usuarios-tui").join(name);
    if candidate.exists() {
        return Some(candidate.to_string_lossy().into_owned());
    }
    None
}

/// Re-export the application event loop entry function.
pub use update::run_app as run;
