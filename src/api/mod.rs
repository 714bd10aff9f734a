use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::FetchError;

/// Default directory endpoint; override with `--endpoint` or `USUARIOS_ENDPOINT`.
pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// One remote directory entry. The endpoint may send more fields
/// (address, phone, company, ...); everything beyond these three is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct User {
    pub id: u64,
    pub name: String,
    pub email: String,
}

pub type FetchResult = std::result::Result<Vec<User>, FetchError>;

/// Blocking GET of the full user list. Non-2xx statuses, transport failures
/// and undecodable bodies all collapse into [`FetchError`].
pub fn fetch_users(endpoint: &str, timeout: Duration) -> FetchResult {
    let response = ureq::get(endpoint)
        .timeout(timeout)
        .call()
        .map_err(|e| match e {
            ureq::Error::Status(code, _) => FetchError::Status(code),
            ureq::Error::Transport(t) => FetchError::Transport(t.to_string()),
        })?;
    let body = response
        .into_string()
        .map_err(|e| FetchError::Transport(e.to_string()))?;
    parse_users(&body)
}

/// Decode a JSON array of user objects, ignoring unknown fields.
pub fn parse_users(body: &str) -> FetchResult {
    serde_json::from_str(body).map_err(|e| FetchError::Decode(e.to_string()))
}

/// Run [`fetch_users`] on a detached thread and hand back the receiving end.
/// The fetch is fire-and-forget: quitting while it is in flight just drops
/// the receiver and the send fails silently.
pub fn spawn_fetch(endpoint: String, timeout: Duration) -> mpsc::Receiver<FetchResult> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        info!(endpoint = %endpoint, "fetching user directory");
        let result = fetch_users(&endpoint, timeout);
        match &result {
            Ok(users) => info!(count = users.len(), "user directory loaded"),
            Err(err) => warn!(error = %err, "user directory fetch failed"),
        }
        let _ = tx.send(result);
    });
    rx
}
