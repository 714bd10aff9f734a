use std::fmt::{Display, Formatter};

pub type DynError = Box<dyn std::error::Error + Send + Sync + 'static>;
pub type Result<T> = std::result::Result<T, DynError>;

/// The only failure the app surfaces to the user: the initial fetch of the
/// user directory did not produce a usable list. Everything after the fetch
/// (add, delete, search) is defined to never fail.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchError {
    /// Endpoint answered with a non-2xx status.
    Status(u16),
    /// Connection, DNS or timeout failure before any response arrived.
    Transport(String),
    /// Response body was not a JSON array of user records.
    Decode(String),
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Status(code) => write!(f, "request failed with HTTP {}", code),
            FetchError::Transport(msg) => write!(f, "request failed: {}", msg),
            FetchError::Decode(msg) => write!(f, "could not decode response body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
