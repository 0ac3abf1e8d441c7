use log::{info, warn};
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_auth::UserStore;
use crate::core_reply::send_response;
use crate::session::{AuthState, Session};

/// Handles the USER FTP command.
///
/// A known username moves the session to the password step. An unknown one
/// drops any half-finished login; an already authenticated session is left
/// as it was.
pub async fn handle_user_command(
    writer: &mut OwnedWriteHalf,
    store: &UserStore,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    let username = arg.trim();

    if !username.is_empty() && store.lookup(username).is_some() {
        info!("Username accepted: {}", username);
        session.auth_state = AuthState::UserNamed(username.to_string());
        send_response(writer, b"331 Username OK, need password.\r\n").await
    } else {
        warn!("Unknown username: {:?}", username);
        if matches!(session.auth_state, AuthState::UserNamed(_)) {
            session.auth_state = AuthState::Unauth;
        }
        send_response(writer, b"530 Not logged in.\r\n").await
    }
}
