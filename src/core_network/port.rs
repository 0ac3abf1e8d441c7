use log::{info, warn};
use std::net::Ipv4Addr;
use tokio::net::tcp::OwnedWriteHalf;

use crate::core_reply::send_response;
use crate::session::Session;

/// Handles the PORT (Active Mode) FTP command.
///
/// The client announces the endpoint it listens on for the next data
/// connection as six decimal octets `h1,h2,h3,h4,p1,p2`. The endpoint is only
/// recorded here; the connection itself is made when a data-bearing command
/// arrives.
pub async fn handle_port_command(
    writer: &mut OwnedWriteHalf,
    session: &mut Session,
    arg: String,
) -> Result<(), std::io::Error> {
    match parse_port_argument(&arg) {
        Some((ip, port)) => {
            info!("PORT set data endpoint to {}:{}", ip, port);
            session.pending_data_endpoint = Some((ip, port));
            send_response(writer, b"200 PORT command successful.\r\n").await
        }
        None => {
            warn!("Malformed PORT argument: {:?}", arg);
            send_response(writer, b"501 Syntax error in parameters or arguments.\r\n").await
        }
    }
}

/// Parses `h1,h2,h3,h4,p1,p2` into an IPv4 address and a port. Each field
/// must be a decimal integer in 0..=255; the port is `p1 * 256 + p2`.
pub fn parse_port_argument(arg: &str) -> Option<(Ipv4Addr, u16)> {
    let fields: Vec<&str> = arg.split(',').collect();
    if fields.len() != 6 {
        return None;
    }
    let mut octets = [0u8; 6];
    for (slot, field) in octets.iter_mut().zip(&fields) {
        *slot = field.trim().parse::<u8>().ok()?;
    }
    let ip = Ipv4Addr::new(octets[0], octets[1], octets[2], octets[3]);
    let port = u16::from(octets[4]) << 8 | u16::from(octets[5]);
    Some((ip, port))
}
