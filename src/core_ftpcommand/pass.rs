use log::{error, info, warn};
use tokio::fs;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_auth::UserStore;
use crate::core_reply::send_response;
use crate::session::{AuthState, Session};

/// Handles the PASS FTP command.
///
/// Only meaningful right after USER. On a match the per-user jail directory
/// is created if absent and the session is pinned to its canonical path; the
/// jail never changes again for the lifetime of the session. A mismatch
/// falls all the way back to the unauthenticated state.
pub async fn handle_pass_command(
    writer: &mut OwnedWriteHalf,
    store: &UserStore,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    let username = match &session.auth_state {
        AuthState::UserNamed(username) => username.clone(),
        _ => {
            warn!("PASS without a preceding USER");
            return send_response(writer, b"503 Bad sequence of commands.\r\n").await;
        }
    };

    if !store.verify(&username, &arg) {
        warn!("Failed login for user {}", username);
        session.auth_state = AuthState::Unauth;
        return send_response(writer, b"530 Not logged in.\r\n").await;
    }

    let user_dir = session.server_root.join(&username);
    match fs::create_dir(&user_dir).await {
        Ok(()) => {
            #[cfg(unix)]
            {
                use std::fs::Permissions;
                use std::os::unix::fs::PermissionsExt;
                let _ = fs::set_permissions(&user_dir, Permissions::from_mode(0o777)).await;
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(e) => {
            error!("Failed to create user directory {:?}: {}", user_dir, e);
            return send_response(
                writer,
                b"451 Requested action aborted: local error in processing.\r\n",
            )
            .await;
        }
    }

    let root_dir = match user_dir.canonicalize() {
        Ok(path) => path,
        Err(e) => {
            error!("Failed to resolve user directory {:?}: {}", user_dir, e);
            return send_response(
                writer,
                b"451 Requested action aborted: local error in processing.\r\n",
            )
            .await;
        }
    };

    info!("User logged in: {}", username);
    session.auth_state = AuthState::Authenticated(username);
    session.root_dir = root_dir.clone();
    session.current_dir = root_dir;
    send_response(writer, b"230 User logged in, proceed.\r\n").await
}
