use log::info;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::send_response;

/// Handles the QUIT FTP command.
///
/// Only writes the goodbye; closing the socket is left to the connection
/// task so the stream is shut down exactly once.
pub async fn handle_quit_command(writer: &mut OwnedWriteHalf) -> Result<(), std::io::Error> {
    info!("Received QUIT command. Closing connection.");
    send_response(writer, b"221 Service closing control connection.\r\n").await
}
