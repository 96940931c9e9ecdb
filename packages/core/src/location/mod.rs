use async_trait::async_trait;
use punchcard_types::sync::watch;
use tokio::task::JoinHandle;

use crate::geo::GeoPoint;


/// One reading from a device location feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PositionSample {
    Fix(GeoPoint),
    /// The device reported that no fix is available.
    Unavailable,
}

/// A continuous device location feed. `None` means the feed is exhausted and
/// no further samples will arrive.
#[async_trait]
pub trait LocationSource: Send + 'static {
    async fn next_sample(&mut self) -> Option<PositionSample>;
}

/// Fans a [`LocationSource`] out to any number of subscribers through a watch
/// channel. Only the latest fix is retained; intermediate samples a consumer
/// missed are dropped. Dropping the watcher cancels the feed.
pub struct LocationWatcher {
    rx: watch::Receiver<Option<GeoPoint>>,
    task: JoinHandle<()>,
}

impl LocationWatcher {
    pub fn spawn<S: LocationSource>(mut source: S) -> Self {
        let (tx, rx) = watch::channel(None);
        let task = tokio::spawn(async move {
            while let Some(sample) = source.next_sample().await {
                let update = match sample {
                    PositionSample::Fix(point) => Some(point),
                    PositionSample::Unavailable => None,
                };
                tracing::trace!(?update, "position update");
                if tx.send(update).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// A watcher pinned to a single known position, for devices without a
    /// live location feed.
    pub fn fixed(point: GeoPoint) -> Self {
        Self::pinned(Some(point))
    }

    /// A watcher that never produces a fix.
    pub fn unavailable() -> Self {
        Self::pinned(None)
    }

    fn pinned(position: Option<GeoPoint>) -> Self {
        let (tx, rx) = watch::channel(position);
        let task = tokio::spawn(async move {
            tx.closed().await;
        });

        Self { rx, task }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<GeoPoint>> {
        self.rx.clone()
    }

    pub fn latest(&self) -> Option<GeoPoint> {
        *self.rx.borrow()
    }

    /// Cancel the feed. Subscribers observe the channel closing.
    pub fn stop(&self) {
        self.task.abort();
    }
}

impl Drop for LocationWatcher {
    fn drop(&mut self) {
        self.task.abort();
    }
}
