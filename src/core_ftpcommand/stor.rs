use chrono::Utc;
use log::{error, info, warn};
use tokio::net::tcp::OwnedWriteHalf;

use crate::config::Config;
use crate::core_network::broker;
use crate::core_reply::send_response;
use crate::core_sandbox;
use crate::core_transfer::{self, engine};
use crate::session::Session;

/// Handles the STOR (Store File) FTP command.
///
/// The upload lands in a `tmp_<unix-seconds>_<name>` staging file in the
/// current directory and is renamed onto the destination only after the data
/// stream closed cleanly, so the final name never points at a partial file.
pub async fn handle_stor_command(
    writer: &mut OwnedWriteHalf,
    config: &Config,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    if arg.is_empty() {
        warn!("STOR command received with no arguments");
        return send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await;
    }

    let Some(endpoint) = session.pending_data_endpoint.take() else {
        return send_response(writer, b"425 Can't open data connection.\r\n").await;
    };

    let final_path =
        match core_sandbox::resolve_target(&session.root_dir, &session.current_dir, &arg) {
            Ok(path) => path,
            Err(e) => {
                warn!("STOR rejected: {}", e);
                return send_response(writer, e.to_ftp_reply()).await;
            }
        };

    // resolve_target guarantees a plain final component.
    let file_name = final_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_path = engine::stor_temp_path(
        &session.current_dir,
        &file_name,
        Utc::now().timestamp(),
    );

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

    info!("Receiving file {:?}", final_path);
    let worker = engine::spawn_stor_worker(
        data_stream,
        temp_path,
        final_path,
        config.server.transfer_buffer_size,
    );
    let reply = core_transfer::final_reply(worker).await;
    send_response(writer, reply).await
}
