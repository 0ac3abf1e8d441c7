use log::{error, info};
use tokio::net::tcp::OwnedWriteHalf;

use crate::config::Config;
use crate::core_network::broker;
use crate::core_reply::send_response;
use crate::core_transfer::{self, engine};
use crate::session::Session;

/// Handles the LIST FTP command.
///
/// Sends the names in the current directory over a fresh active-mode data
/// connection, one per line. The pending data endpoint is consumed by this
/// attempt whether or not it succeeds.
pub async fn handle_list_command(
    writer: &mut OwnedWriteHalf,
    config: &Config,
    session: &mut Session,
) -> Result<(), std::io::Error> {
    let Some(endpoint) = session.pending_data_endpoint.take() else {
        return send_response(writer, b"425 Can't open data connection.\r\n").await;
    };

    // Readability check up front, while a 550 is still allowed.
    let entries = match tokio::fs::read_dir(&session.current_dir).await {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read directory {:?}: {}", session.current_dir, e);
            return send_response(writer, b"550 Failed to list directory.\r\n").await;
        }
    };

    send_response(
        writer,
        b"150 File status okay; about to open data connection.\r\n",
    )
    .await?;

    let data_stream = match broker::open_data_connection(config.server.data_source_port, endpoint)
        .await
    {
        Ok(stream) => stream,
        Err(e) => {
            error!("Data connection to {}:{} failed: {}", endpoint.0, endpoint.1, e);
            return send_response(
                writer,
                b"451 Requested action aborted: local error in processing.\r\n",
            )
            .await;
        }
    };

    info!("Listing directory {:?}", session.current_dir);
    let worker = engine::spawn_list_worker(data_stream, entries);
    let reply = core_transfer::final_reply(worker).await;
    send_response(writer, reply).await
}
