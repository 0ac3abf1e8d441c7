pub mod engine;

use log::error;
use tokio::task::JoinHandle;

/// Waits for a transfer worker and picks the final control reply.
///
/// The session task awaits the worker before reading the next command, which
/// keeps the per-session reply order at 150, transfer, then exactly one final
/// reply. Worker panics are folded into the local-error reply.
pub async fn final_reply(worker: JoinHandle<Result<(), std::io::Error>>) -> &'static [u8] {
    match worker.await {
        Ok(Ok(())) => b"226 Transfer complete.\r\n",
        Ok(Err(e)) => {
            error!("Transfer worker failed: {}", e);
            b"451 Requested action aborted: local error in processing.\r\n"
        }
        Err(e) => {
            error!("Transfer worker did not finish: {}", e);
            b"451 Requested action aborted: local error in processing.\r\n"
        }
    }
}
