//! Client response body fed from a copy task.
//!
//! [`BodyWriter`] is the write half: every write is accepted whole or fails,
//! so a short write here always means something is broken. The read half is
//! an axum [`Body`] that yields chunks as they are written.

use std::io;
use std::pin::Pin;
use std::task::{ready, Context, Poll};

use axum::body::Body;
use bytes::Bytes;
use tokio::io::AsyncWrite;
use tokio::sync::mpsc;
use tokio_util::sync::PollSender;

/// Create a connected writer/body pair.
///
/// At most one chunk waits between the writer and the client, so a slow
/// client slows the copy down.
pub fn body_channel() -> (BodyWriter, Body) {
    let (tx, rx) = mpsc::channel::<io::Result<Bytes>>(1);
    let stream = futures_util::stream::unfold(rx, |mut rx| async move {
        rx.recv().await.map(|chunk| (chunk, rx))
    });
    (
        BodyWriter {
            sender: PollSender::new(tx),
        },
        Body::from_stream(stream),
    )
}

/// Write half of [`body_channel`].
pub struct BodyWriter {
    sender: PollSender<io::Result<Bytes>>,
}

impl BodyWriter {
    /// End the body with an error so the client sees a broken stream rather
    /// than a clean end.
    pub async fn abort(self, error: io::Error) {
        if let Some(tx) = self.sender.get_ref() {
            let _ = tx.send(Err(error)).await;
        }
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "client body closed")
}

impl AsyncWrite for BodyWriter {
    fn poll_write(
        mut self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &[u8],
    ) -> Poll<io::Result<usize>> {
        if buf.is_empty() {
            return Poll::Ready(Ok(0));
        }
        ready!(self.sender.poll_reserve(cx)).map_err(|_| closed())?;
        self.sender
            .send_item(Ok(Bytes::copy_from_slice(buf)))
            .map_err(|_| closed())?;
        Poll::Ready(Ok(buf.len()))
    }

    fn poll_flush(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        Poll::Ready(Ok(()))
    }

    fn poll_shutdown(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<io::Result<()>> {
        self.sender.close();
        Poll::Ready(Ok(()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn writes_arrive_in_order() {
        let (mut writer, body) = body_channel();

        let feeder = tokio::spawn(async move {
            writer.write_all(b"first ").await.unwrap();
            writer.write_all(b"second").await.unwrap();
        });

        let collected = axum::body::to_bytes(body, usize::MAX).await.unwrap();
        feeder.await.unwrap();
        assert_eq!(&collected[..], b"first second");
    }

    #[tokio::test]
    async fn write_after_body_dropped_fails() {
        let (mut writer, body) = body_channel();
        drop(body);

        let err = writer.write(b"lost").await.unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }

    #[tokio::test]
    async fn abort_surfaces_as_body_error() {
        let (mut writer, body) = body_channel();

        let feeder = tokio::spawn(async move {
            writer.write_all(b"partial").await.unwrap();
            writer.abort(io::Error::other("upstream reset")).await;
        });

        let result = axum::body::to_bytes(body, usize::MAX).await;
        feeder.await.unwrap();
        assert!(result.is_err());
    }
}
