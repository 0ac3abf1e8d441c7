use log::debug;
use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use tokio::net::{TcpSocket, TcpStream};

/// Opens an active-mode data connection to the endpoint the client declared
/// with PORT.
///
/// RFC 959 active mode has the server originate the connection from its data
/// port (20), so the socket binds the configured source port with address
/// reuse before connecting. A source port of 0 lets the kernel pick an
/// ephemeral one, which also lifts the one-transfer-at-a-time limit that a
/// fixed source port imposes.
pub async fn open_data_connection(
    source_port: u16,
    endpoint: (Ipv4Addr, u16),
) -> Result<TcpStream, std::io::Error> {
    let socket = TcpSocket::new_v4()?;
    socket.set_reuseaddr(true)?;
    socket.bind(SocketAddr::from(SocketAddrV4::new(
        Ipv4Addr::UNSPECIFIED,
        source_port,
    )))?;

    let peer = SocketAddr::from(SocketAddrV4::new(endpoint.0, endpoint.1));
    debug!("Opening data connection to {} from port {}", peer, source_port);
    socket.connect(peer).await
}
