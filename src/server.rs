use anyhow::{Context, Result};
use log::{debug, info, warn};
use std::net::{Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::AsyncWriteExt;
use tokio::net::{TcpListener, TcpSocket};
use tokio::sync::Semaphore;

use crate::config::{self, Config};
use crate::core_auth::UserStore;
use crate::core_network::network;

/// A bound FTP server, ready to accept control connections.
///
/// Binding and serving are separate so callers (and tests) can learn the
/// actual listen address before the accept loop starts.
pub struct FtpServer {
    listener: TcpListener,
    config: Arc<Config>,
    store: Arc<UserStore>,
    server_root: PathBuf,
    slots: Arc<Semaphore>,
}

impl FtpServer {
    pub async fn bind(config: Config, store: UserStore) -> Result<Self> {
        let server_root = PathBuf::from(&config.server.server_root)
            .canonicalize()
            .with_context(|| {
                format!("Failed to resolve server root: {}", config.server.server_root)
            })?;

        let addr = SocketAddr::from((Ipv4Addr::UNSPECIFIED, config.server.listen_port));
        let socket = TcpSocket::new_v4()?;
        socket.set_reuseaddr(true)?;
        socket
            .bind(addr)
            .with_context(|| format!("Failed to bind control port {}", addr))?;
        let listener = socket
            .listen(config.server.listen_backlog)
            .context("Failed to listen on control port")?;

        info!("Server listening on {}", listener.local_addr()?);
        let slots = Arc::new(Semaphore::new(config.server.max_sessions));

        Ok(Self {
            listener,
            config: Arc::new(config),
            store: Arc::new(store),
            server_root,
            slots,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accepts control connections forever, one task per session. Arrivals
    /// beyond the session cap are told 421 and dropped on the spot.
    pub async fn serve(self) -> Result<()> {
        loop {
            let (mut socket, addr) = self.listener.accept().await?;

            let permit = match Arc::clone(&self.slots).try_acquire_owned() {
                Ok(permit) => permit,
                Err(_) => {
                    warn!("Session limit reached, refusing {}", addr);
                    let _ = socket
                        .write_all(b"421 Too many users connected, try again later.\r\n")
                        .await;
                    continue;
                }
            };

            info!("New connection from {}", addr);
            let config = Arc::clone(&self.config);
            let store = Arc::clone(&self.store);
            let server_root = self.server_root.clone();

            tokio::spawn(async move {
                if let Err(e) = network::handle_connection(socket, config, store, server_root).await
                {
                    debug!("Connection error for {}: {:#}", addr, e);
                }
                info!("Connection closed for {}", addr);
                drop(permit);
            });
        }
    }
}

/// Runs the FTP server with the provided configuration and credential store.
pub async fn run(config: Config, store: UserStore) -> Result<()> {
    info!("Starting server");
    config::log_config(&config);

    if store.is_empty() {
        warn!("User store is empty; no login can succeed");
    }

    let server = FtpServer::bind(config, store).await?;
    server.serve().await
}
