use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;
use std::fs;

use crate::constants::{
    DEFAULT_DATA_SOURCE_PORT, DEFAULT_LISTEN_BACKLOG, DEFAULT_LISTEN_PORT, DEFAULT_MAX_SESSIONS,
    DEFAULT_TRANSFER_BUFFER_SIZE,
};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Control connection port.
    pub listen_port: u16,
    /// Source port for active-mode data connections. RFC 959 says 20.
    /// 0 selects an ephemeral source port and allows concurrent transfers.
    pub data_source_port: u16,
    /// Parent directory of the per-user jails.
    pub server_root: String,
    /// Two-column CSV of username,password records.
    pub users_file: String,
    /// Concurrent control connections before new arrivals get a 421.
    pub max_sessions: usize,
    pub listen_backlog: u32,
    /// Chunk size used when streaming over the data connection.
    pub transfer_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_port: DEFAULT_LISTEN_PORT,
            data_source_port: DEFAULT_DATA_SOURCE_PORT,
            server_root: ".".to_string(),
            users_file: "users.csv".to_string(),
            max_sessions: DEFAULT_MAX_SESSIONS,
            listen_backlog: DEFAULT_LISTEN_BACKLOG,
            transfer_buffer_size: DEFAULT_TRANSFER_BUFFER_SIZE,
        }
    }
}

pub fn load_config(path: &str) -> Result<Config> {
    let config_str = fs::read_to_string(path)
        .with_context(|| format!("Failed to read configuration file: {}", path))?;
    let config: Config = toml::from_str(&config_str)
        .with_context(|| format!("Failed to parse configuration file: {}", path))?;
    Ok(config)
}

// Helper function to log configuration options
pub fn log_config(config: &Config) {
    info!("  Listen Port: {}", config.server.listen_port);
    info!("  Data Source Port: {}", config.server.data_source_port);
    info!("  Server Root: {}", config.server.server_root);
    info!("  Users File: {}", config.server.users_file);
    info!("  Max Sessions: {}", config.server.max_sessions);
    info!(
        "  Transfer Buffer Size: {} KB",
        config.server.transfer_buffer_size / 1024
    );
}
