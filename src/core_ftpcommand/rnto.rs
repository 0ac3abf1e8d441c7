use log::{info, warn};
use std::path::PathBuf;
use tokio::fs;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::send_response;
use crate::core_sandbox;
use crate::session::Session;

/// Handles the RNTO (Rename To) FTP command.
///
/// `rename_src` is the path recorded by an immediately preceding RNFR; any
/// other command in between has already discarded it.
pub async fn handle_rnto_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
    rename_src: Option<PathBuf>,
) -> Result<(), std::io::Error> {
    let Some(old_path) = rename_src else {
        warn!("RNTO without a preceding RNFR");
        return send_response(writer, b"503 Bad sequence of commands.\r\n").await;
    };

    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let new_path = match core_sandbox::resolve_target(&session.root_dir, &session.current_dir, &arg)
    {
        Ok(path) => path,
        Err(e) => {
            warn!("RNTO rejected: {}", e);
            return send_response(writer, e.to_ftp_reply()).await;
        }
    };

    match fs::rename(&old_path, &new_path).await {
        Ok(()) => {
            info!("Renamed {:?} to {:?}", old_path, new_path);
            send_response(writer, b"250 File successfully renamed.\r\n").await
        }
        Err(e) => {
            warn!("Failed to rename {:?} to {:?}: {}", old_path, new_path, e);
            send_response(writer, b"550 Failed to rename file.\r\n").await
        }
    }
}
