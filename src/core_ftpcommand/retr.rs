use log::{error, info, warn};
use tokio::fs::File;
use tokio::net::tcp::OwnedWriteHalf;

use crate::config::Config;
use crate::core_network::broker;
use crate::core_reply::send_response;
use crate::core_sandbox;
use crate::core_transfer::{self, engine};
use crate::session::Session;

/// Handles the RETR (Retrieve) FTP command.
///
/// The file is resolved and opened before the 150 so a missing or unreadable
/// file is still a clean 550. Once the 150 is out, failures become 451 and
/// the final reply closes the 150/226 bracket.
pub async fn handle_retr_command(
    writer: &mut OwnedWriteHalf,
    config: &Config,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        warn!("RETR command received with no arguments");
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let Some(endpoint) = session.pending_data_endpoint.take() else {
        return send_response(writer, b"425 Can't open data connection.\r\n").await;
    };

    let file_path =
        match core_sandbox::resolve_existing(&session.root_dir, &session.current_dir, &arg) {
            Ok(path) => path,
            Err(e) => {
                warn!("RETR rejected: {}", e);
                return send_response(writer, e.to_ftp_reply()).await;
            }
        };

    if !file_path.is_file() {
        return send_response(writer, b"550 No such file or directory.\r\n").await;
    }

    let file = match File::open(&file_path).await {
        Ok(file) => file,
        Err(e) => {
            warn!("Could not open {:?}: {}", file_path, e);
            return send_response(writer, b"550 File not found.\r\n").await;
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

    info!("Sending file {:?}", file_path);
    let worker = engine::spawn_retr_worker(data_stream, file, config.server.transfer_buffer_size);
    let reply = core_transfer::final_reply(worker).await;
    send_response(writer, reply).await
}
