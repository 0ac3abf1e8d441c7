use std::path::{Path, PathBuf};
use tokio::fs::{self, File, ReadDir};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::task::JoinHandle;

use crate::constants::STOR_TEMP_PREFIX;

/// Streams the short-format directory listing over the data connection, one
/// `name\r\n` line per entry. Dot-prefixed entries are skipped.
pub fn spawn_list_worker(
    mut data: TcpStream,
    mut entries: ReadDir,
) -> JoinHandle<Result<(), std::io::Error>> {
    tokio::spawn(async move {
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.starts_with('.') {
                continue;
            }
            data.write_all(format!("{}\r\n", name).as_bytes()).await?;
        }
        data.shutdown().await
    })
}

/// Streams an already opened file over the data connection in buffered
/// chunks. The transfer ends when the file does; the close signals EOF to
/// the peer.
pub fn spawn_retr_worker(
    mut data: TcpStream,
    mut file: File,
    buffer_size: usize,
) -> JoinHandle<Result<(), std::io::Error>> {
    tokio::spawn(async move {
        let mut buffer = vec![0; buffer_size];
        loop {
            let bytes_read = file.read(&mut buffer).await?;
            if bytes_read == 0 {
                break;
            }
            data.write_all(&buffer[..bytes_read]).await?;
        }
        data.shutdown().await
    })
}

/// Receives the data stream into a staging file and renames it onto the
/// destination on clean EOF. The rename is the commit point: a reader never
/// observes a partial file under the final name. Any failure removes the
/// staging file.
pub fn spawn_stor_worker(
    mut data: TcpStream,
    temp_path: PathBuf,
    final_path: PathBuf,
    buffer_size: usize,
) -> JoinHandle<Result<(), std::io::Error>> {
    tokio::spawn(async move {
        let result = receive_and_commit(&mut data, &temp_path, &final_path, buffer_size).await;
        if result.is_err() {
            let _ = fs::remove_file(&temp_path).await;
        }
        result
    })
}

async fn receive_and_commit(
    data: &mut TcpStream,
    temp_path: &Path,
    final_path: &Path,
    buffer_size: usize,
) -> Result<(), std::io::Error> {
    let mut file = File::create(temp_path).await?;
    let mut buffer = vec![0; buffer_size];
    loop {
        let bytes_read = data.read(&mut buffer).await?;
        if bytes_read == 0 {
            break;
        }
        file.write_all(&buffer[..bytes_read]).await?;
    }
    file.flush().await?;
    drop(file);
    fs::rename(temp_path, final_path).await
}

/// Staging path for a STOR into `dir`: `tmp_<unix-seconds>_<name>`.
pub fn stor_temp_path(dir: &Path, name: &str, unix_seconds: i64) -> PathBuf {
    dir.join(format!("{}{}_{}", STOR_TEMP_PREFIX, unix_seconds, name))
}
