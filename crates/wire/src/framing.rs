// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! NUL-terminated line framing shared by the daemon's Unix and TCP line
//! transports (spec.md §6.2): one command line in, one JSON envelope out,
//! each terminated by a single `\0` byte rather than a length prefix.

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

#[derive(Debug, Error)]
pub enum FramingError {
    #[error("connection closed before a terminating NUL byte")]
    UnterminatedFrame,
    #[error("frame was not valid UTF-8")]
    InvalidUtf8,
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Read one NUL-terminated frame, returning its content with the
/// terminator stripped. `None` means the peer closed the connection
/// cleanly with no bytes pending (a fresh read yielding EOF immediately).
pub async fn read_frame<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Option<String>, FramingError> {
    let mut buf = Vec::new();
    let mut byte = [0u8; 1];
    loop {
        let n = reader.read(&mut byte).await?;
        if n == 0 {
            return if buf.is_empty() { Ok(None) } else { Err(FramingError::UnterminatedFrame) };
        }
        if byte[0] == 0 {
            return String::from_utf8(buf).map(Some).map_err(|_| FramingError::InvalidUtf8);
        }
        buf.push(byte[0]);
    }
}

/// Write one NUL-terminated frame.
pub async fn write_frame<W: AsyncWrite + Unpin>(writer: &mut W, payload: &str) -> Result<(), FramingError> {
    writer.write_all(payload.as_bytes()).await?;
    writer.write_all(&[0]).await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
#[path = "framing_tests.rs"]
mod tests;
