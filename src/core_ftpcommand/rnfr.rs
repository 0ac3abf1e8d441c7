use log::warn;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::send_response;
use crate::core_sandbox;
use crate::session::Session;

/// Handles the RNFR (Rename From) FTP command.
///
/// Records the rename source for the immediately following command. The
/// dispatcher clears the pending source before every command, so only a
/// directly following RNTO can consume it.
pub async fn handle_rnfr_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    match core_sandbox::resolve_existing(&session.root_dir, &session.current_dir, &arg) {
        Ok(path) => {
            session.pending_rename_src = Some(path);
            send_response(writer, b"350 Requested file action pending further information.\r\n")
                .await
        }
        Err(e) => {
            warn!("RNFR rejected: {}", e);
            send_response(writer, e.to_ftp_reply()).await
        }
    }
}
