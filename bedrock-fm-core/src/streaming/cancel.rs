//! Cancellation for text streams.

use crate::types::TextStream;
use tokio_util::sync::CancellationToken;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. The wrapped stream ends at its next poll and drops
    /// the inner stream, which closes the HTTP response.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

/// Make a text stream cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: TextStream) -> (TextStream, CancelHandle) {
    let handle = CancelHandle::new();
    let token = handle.token.clone();
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    (Box::pin(s), handle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{FmError, Result};
    use futures::StreamExt;

    #[tokio::test]
    async fn cancel_ends_the_stream() {
        let inner: TextStream = Box::pin(futures::stream::iter(
            ["a", "b", "c"].map(|s| Ok::<_, FmError>(s.to_string())),
        ));
        let (mut stream, handle) = make_cancellable_stream(inner);

        assert_eq!(stream.next().await.unwrap().unwrap(), "a");
        handle.cancel();
        assert!(handle.is_cancelled());
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn pending_stream_is_released_on_cancel() {
        let inner: TextStream = Box::pin(futures::stream::pending::<Result<String>>());
        let (mut stream, handle) = make_cancellable_stream(inner);
        let canceller = handle.clone();
        tokio::spawn(async move { canceller.cancel() });
        assert!(stream.next().await.is_none());
        handle.cancelled().await;
    }

    #[test]
    fn cancel_before_first_poll_yields_nothing() {
        let inner: TextStream = Box::pin(futures::stream::iter([Ok("a".to_string())]));
        let (mut stream, handle) = make_cancellable_stream(inner);
        handle.cancel();
        assert!(tokio_test::block_on(stream.next()).is_none());
    }
}
