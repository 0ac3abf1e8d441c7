use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use env_logger::{Builder, Env};
use std::io::Write;
use std::path::Path;

use rustftpd::config;
use rustftpd::core_auth::UserStore;
use rustftpd::core_cli::Cli;
use rustftpd::server;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    // Initialize the logger with a custom format and colors
    let default_filter = if args.verbose { "debug" } else { "info" };
    Builder::from_env(Env::default().default_filter_or(default_filter))
        .format(|buf, record| {
            let timestamp = buf.timestamp().to_string();
            let level = match record.level() {
                log::Level::Error => record.level().to_string().red(),
                log::Level::Warn => record.level().to_string().yellow(),
                log::Level::Info => record.level().to_string().green(),
                log::Level::Debug => record.level().to_string().blue(),
                log::Level::Trace => record.level().to_string().white(),
            };
            writeln!(buf, "[{}] [{}] {}", timestamp, level, record.args())
        })
        .init();

    let config_path = if args.config.is_empty() {
        "/etc/rustftpd.conf"
    } else {
        args.config.as_str()
    };
    let config = config::load_config(config_path)?;

    let store = UserStore::load(Path::new(&config.server.users_file))
        .with_context(|| format!("Failed to load user file: {}", config.server.users_file))?;

    server::run(config, store).await
}
