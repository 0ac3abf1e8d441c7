// src/constants.rs

pub const DEFAULT_LISTEN_PORT: u16 = 21;
pub const DEFAULT_DATA_SOURCE_PORT: u16 = 20;
pub const DEFAULT_MAX_SESSIONS: usize = 10;
pub const DEFAULT_LISTEN_BACKLOG: u32 = 5;
pub const DEFAULT_TRANSFER_BUFFER_SIZE: usize = 8192;

// Field width limit of the two-column credential file
pub const MAX_CREDENTIAL_LENGTH: usize = 49;

// Prefix of the STOR staging file, completed with <unix-seconds>_<name>
pub const STOR_TEMP_PREFIX: &str = "tmp_";
