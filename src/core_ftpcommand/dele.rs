use log::{info, warn};
use tokio::fs;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::{format_reply, send_response};
use crate::core_sandbox;
use crate::session::Session;

/// Handles the DELE (Delete File) FTP command.
pub async fn handle_dele_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let file_path =
        match core_sandbox::resolve_existing(&session.root_dir, &session.current_dir, &arg) {
            Ok(path) => path,
            Err(e) => {
                warn!("DELE rejected: {}", e);
                return send_response(writer, e.to_ftp_reply()).await;
            }
        };

    if !file_path.is_file() {
        return send_response(writer, b"550 File not found.\r\n").await;
    }

    match fs::remove_file(&file_path).await {
        Ok(()) => {
            info!("Deleted file {:?}", file_path);
            let reply = format_reply(250, &format!("\"{}\" file deleted.", arg));
            send_response(writer, reply.as_bytes()).await
        }
        Err(e) => {
            warn!("Failed to delete file {:?}: {}", file_path, e);
            send_response(writer, b"550 Failed to delete file.\r\n").await
        }
    }
}
