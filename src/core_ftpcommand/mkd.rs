use log::{info, warn};
use tokio::fs;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::{format_reply, send_response};
use crate::core_sandbox;
use crate::session::Session;

/// Handles the MKD (Make Directory) FTP command.
pub async fn handle_mkd_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let dir_path = match core_sandbox::resolve_target(&session.root_dir, &session.current_dir, &arg)
    {
        Ok(path) => path,
        Err(e) => {
            warn!("MKD rejected: {}", e);
            return send_response(writer, e.to_ftp_reply()).await;
        }
    };

    if dir_path.exists() {
        return send_response(writer, b"550 Directory already exists.\r\n").await;
    }

    match fs::create_dir(&dir_path).await {
        Ok(()) => {
            info!("Created directory {:?}", dir_path);
            let quoted = arg.replace('"', "\\\"");
            let reply = format_reply(257, &format!("\"{}\" directory created.", quoted));
            send_response(writer, reply.as_bytes()).await
        }
        Err(e) => {
            warn!("Failed to create directory {:?}: {}", dir_path, e);
            send_response(writer, b"550 Failed to create directory.\r\n").await
        }
    }
}
