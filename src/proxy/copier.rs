//! Bounded body copy.
//!
//! # Responsibilities
//! - Move bytes from an upstream body to the client body
//! - Never hold more than one buffer of payload in memory
//! - Detect short writes and report how far the copy got
//!
//! # Design Decisions
//! - Explicit read/write loop instead of `tokio::io::copy` so a short write
//!   stops the copy instead of being retried
//! - End of stream is the only successful exit

use std::io;

use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Intermediate buffer size for a single copy.
pub const COPY_BUFFER_SIZE: usize = 32 * 1024;

/// Why a copy stopped before end of stream.
#[derive(Debug, Error)]
pub enum CopyError {
    /// The destination accepted fewer bytes than it was given.
    #[error("short write after {written} bytes: accepted {accepted} of {requested}")]
    ShortWrite {
        written: u64,
        accepted: usize,
        requested: usize,
    },

    /// Reading the source failed.
    #[error("stream read failed after {written} bytes: {source}")]
    StreamRead {
        written: u64,
        #[source]
        source: io::Error,
    },

    /// Writing the destination failed.
    #[error("stream write failed after {written} bytes: {source}")]
    StreamWrite {
        written: u64,
        #[source]
        source: io::Error,
    },
}

impl CopyError {
    /// Bytes delivered to the destination before the copy stopped.
    pub fn written(&self) -> u64 {
        match self {
            CopyError::ShortWrite { written, .. }
            | CopyError::StreamRead { written, .. }
            | CopyError::StreamWrite { written, .. } => *written,
        }
    }
}

/// Copy `src` into `dst` until end of stream.
///
/// Returns the total number of bytes written on a clean end of stream.
pub async fn copy_response<R, W>(dst: &mut W, src: &mut R) -> Result<u64, CopyError>
where
    R: AsyncRead + Unpin + ?Sized,
    W: AsyncWrite + Unpin + ?Sized,
{
    let mut buf = vec![0u8; COPY_BUFFER_SIZE];
    let mut written: u64 = 0;

    loop {
        let read = match src.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                tracing::warn!(written, error = %e, "Error during body copy");
                return Err(CopyError::StreamRead { written, source: e });
            }
        };

        if read == 0 {
            dst.flush()
                .await
                .map_err(|source| CopyError::StreamWrite { written, source })?;
            return Ok(written);
        }

        let accepted = dst
            .write(&buf[..read])
            .await
            .map_err(|source| CopyError::StreamWrite { written, source })?;
        written += accepted as u64;

        if accepted != read {
            return Err(CopyError::ShortWrite {
                written,
                accepted,
                requested: read,
            });
        }
    }
}
