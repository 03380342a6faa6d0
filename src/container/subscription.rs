//! Per-subscriber change stream.

use std::pin::Pin;
use std::task::{Context, Poll};

use futures_util::Stream;
use tokio::sync::mpsc;

/// Values written to a [`Container`](super::Container) after this
/// subscription was created, in write order.
///
/// Ends once the container is gone and every queued value was taken.
/// Dropping the subscription or calling [`cancel`](Self::cancel) detaches it
/// without affecting other subscribers.
#[derive(Debug)]
pub struct Subscription<S> {
    rx: mpsc::UnboundedReceiver<S>,
}

impl<S> Subscription<S> {
    pub(crate) fn new(rx: mpsc::UnboundedReceiver<S>) -> Self {
        Self { rx }
    }

    /// Wait for the next value.
    pub async fn recv(&mut self) -> Option<S> {
        self.rx.recv().await
    }

    /// Take the next queued value, if one is ready.
    pub fn try_next(&mut self) -> Option<S> {
        self.rx.try_recv().ok()
    }

    /// Stop receiving new values. Values already queued can still be taken.
    pub fn cancel(&mut self) {
        self.rx.close();
    }
}

impl<S> Stream for Subscription<S> {
    type Item = S;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<S>> {
        self.rx.poll_recv(cx)
    }
}
