use tokio::io::{AsyncWrite, AsyncWriteExt};

/// Formats a single-line control reply: three-digit code, space, text, CRLF.
pub fn format_reply(code: u16, text: &str) -> String {
    format!("{:03} {}\r\n", code, text)
}

/// Sends a reply on the control channel. A write error here is fatal to the
/// session; callers propagate it and the connection task tears down.
pub async fn send_response<W>(writer: &mut W, message: &[u8]) -> Result<(), std::io::Error>
where
    W: AsyncWrite + Unpin,
{
    writer.write_all(message).await?;
    writer.flush().await
}
