use std::net::Ipv4Addr;
use std::path::PathBuf;

/// Authentication progress of one control connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    Unauth,
    UserNamed(String),
    Authenticated(String),
}

/// Per-connection state, owned exclusively by the connection task.
///
/// Transfer workers never see a `Session`; they get owned snapshots of the
/// paths and the data stream instead.
#[derive(Debug)]
pub struct Session {
    pub auth_state: AuthState,
    /// Parent directory of all user jails, canonical. Fixed for the server.
    pub server_root: PathBuf,
    /// The session jail, canonical. Equals `server_root` until login, then
    /// `<server_root>/<username>` and immutable for the rest of the session.
    pub root_dir: PathBuf,
    /// Invariant: equals `root_dir` or a descendant of it.
    pub current_dir: PathBuf,
    /// Set by PORT, consumed by the next LIST/RETR/STOR attempt.
    pub pending_data_endpoint: Option<(Ipv4Addr, u16)>,
    /// Set by RNFR, consumed by the immediately following command.
    pub pending_rename_src: Option<PathBuf>,
}

impl Session {
    pub fn new(server_root: PathBuf) -> Self {
        Self {
            auth_state: AuthState::Unauth,
            root_dir: server_root.clone(),
            current_dir: server_root.clone(),
            server_root,
            pending_data_endpoint: None,
            pending_rename_src: None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.auth_state, AuthState::Authenticated(_))
    }

    pub fn username(&self) -> Option<&str> {
        match &self.auth_state {
            AuthState::UserNamed(name) | AuthState::Authenticated(name) => Some(name),
            AuthState::Unauth => None,
        }
    }

    /// Root-relative view of `current_dir`, rooted at `/<username>`.
    /// Used by the PWD and CWD replies.
    pub fn display_path(&self) -> String {
        let username = self.username().unwrap_or_default();
        match self.current_dir.strip_prefix(&self.root_dir) {
            Ok(rest) if rest.as_os_str().is_empty() => format!("/{}", username),
            Ok(rest) => format!("/{}/{}", username, rest.display()),
            Err(_) => format!("/{}", username),
        }
    }
}
