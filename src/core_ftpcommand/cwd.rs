use log::{info, warn};
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::{format_reply, send_response};
use crate::core_sandbox;
use crate::session::Session;

/// Handles the CWD FTP command.
///
/// The target is resolved through the sandbox, so `..` chains and symlinks
/// that leave the jail all land on the same 550. On success `current_dir`
/// moves to the canonical target, preserving the jail invariant.
pub async fn handle_cwd_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    match core_sandbox::resolve_existing(&session.root_dir, &session.current_dir, &arg) {
        Ok(path) if path.is_dir() => {
            session.current_dir = path;
            info!("Changed directory to {:?}", session.current_dir);
            let reply = format_reply(
                200,
                &format!("directory changed to {}.", session.display_path()),
            );
            send_response(writer, reply.as_bytes()).await
        }
        Ok(path) => {
            warn!("CWD target is not a directory: {:?}", path);
            send_response(writer, b"550 No such file or directory.\r\n").await
        }
        Err(e) => {
            warn!("CWD rejected: {}", e);
            send_response(writer, e.to_ftp_reply()).await
        }
    }
}
