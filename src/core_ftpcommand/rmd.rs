use log::{info, warn};
use tokio::fs;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::{format_reply, send_response};
use crate::core_sandbox;
use crate::session::Session;

/// Handles the RMD (Remove Directory) FTP command. The directory must exist
/// inside the jail and be empty.
pub async fn handle_rmd_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let dir_path =
        match core_sandbox::resolve_existing(&session.root_dir, &session.current_dir, &arg) {
            Ok(path) => path,
            Err(e) => {
                warn!("RMD rejected: {}", e);
                return send_response(writer, e.to_ftp_reply()).await;
            }
        };

    if !dir_path.is_dir() {
        return send_response(writer, b"550 Directory not found.\r\n").await;
    }

    // Refuse to delete the jail itself.
    if dir_path == session.root_dir {
        return send_response(writer, b"550 Failed to remove directory.\r\n").await;
    }

    match fs::remove_dir(&dir_path).await {
        Ok(()) => {
            info!("Removed directory {:?}", dir_path);
            if session.current_dir.starts_with(&dir_path) {
                session.current_dir = session.root_dir.clone();
            }
            let reply = format_reply(250, &format!("\"{}\" directory removed.", arg));
            send_response(writer, reply.as_bytes()).await
        }
        Err(e) => {
            warn!("Failed to remove directory {:?}: {}", dir_path, e);
            send_response(
                writer,
                b"550 Failed to remove directory. Make sure it is empty.\r\n",
            )
            .await
        }
    }
}
