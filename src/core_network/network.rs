use anyhow::Result;
use log::debug;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::TcpStream;

use crate::config::Config;
use crate::core_auth::UserStore;
use crate::core_ftpcommand::handlers::{dispatch_command, SessionControl};
use crate::core_reply::send_response;
use crate::session::Session;

/// Services one control connection until the peer disconnects or QUITs.
///
/// The task owns the session and both halves of the socket; replies are only
/// ever written here or further down the same call stack, which keeps them
/// in command order. Returning an error drops the connection and with it the
/// session state.
pub async fn handle_connection(
    socket: TcpStream,
    config: Arc<Config>,
    store: Arc<UserStore>,
    server_root: PathBuf,
) -> Result<()> {
    let peer_addr = socket.peer_addr()?;
    let (read_half, mut writer) = socket.into_split();

    send_response(&mut writer, b"220 Service ready for new user.\r\n").await?;

    let mut session = Session::new(server_root);
    let mut reader = BufReader::new(read_half);
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let n = reader.read_line(&mut buffer).await?;
        if n == 0 {
            debug!("Control connection closed by {}", peer_addr);
            break;
        }

        let line = buffer.trim_end_matches(['\r', '\n']);
        debug!("{} -> {:?}", peer_addr, line);

        match dispatch_command(line, &mut writer, &config, &store, &mut session).await? {
            SessionControl::Quit => break,
            SessionControl::Continue => {}
        }
    }

    Ok(())
}
