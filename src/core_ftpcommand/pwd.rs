use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::{format_reply, send_response};
use crate::session::Session;

/// Handles the PWD FTP command. The reported path is relative to the server
/// root, so clients see `/<username>/...` and never the real filesystem.
pub async fn handle_pwd_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
) -> Result<(), std::io::Error> {
    let reply = format_reply(257, &format!("{}/", session.display_path()));
    send_response(writer, reply.as_bytes()).await
}
