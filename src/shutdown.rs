//! Explicit stop signal for the game loop.

use tokio::sync::watch;

/// Owner side of the shutdown signal
#[derive(Debug)]
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(false);
        Self { tx }
    }

    pub fn subscribe(&self) -> Shutdown {
        Shutdown {
            is_shutdown: *self.tx.borrow(),
            rx: self.tx.subscribe(),
        }
    }

    pub fn trigger(&self) {
        self.tx.send_replace(true);
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Listener side. Fires once the handle is triggered or dropped.
#[derive(Debug, Clone)]
pub struct Shutdown {
    is_shutdown: bool,
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    pub fn is_shutdown(&self) -> bool {
        self.is_shutdown || *self.rx.borrow()
    }

    /// Wait for the signal. Returns immediately if it already fired.
    pub async fn recv(&mut self) {
        if self.is_shutdown {
            return;
        }
        // An error means the handle is gone, which counts as a shutdown
        let _ = self.rx.wait_for(|stop| *stop).await;
        self.is_shutdown = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_trigger_wakes_subscribers() {
        let handle = ShutdownHandle::new();
        let mut first = handle.subscribe();
        let mut second = handle.subscribe();
        assert!(!first.is_shutdown());

        handle.trigger();
        first.recv().await;
        second.recv().await;
        assert!(first.is_shutdown());
        assert!(second.is_shutdown());
    }

    #[tokio::test]
    async fn test_subscribe_after_trigger() {
        let handle = ShutdownHandle::new();
        handle.trigger();
        let mut late = handle.subscribe();
        assert!(late.is_shutdown());
        late.recv().await;
    }

    #[tokio::test]
    async fn test_dropping_handle_counts_as_shutdown() {
        let handle = ShutdownHandle::new();
        let mut shutdown = handle.subscribe();
        drop(handle);
        shutdown.recv().await;
        assert!(shutdown.is_shutdown());
    }

    #[tokio::test(start_paused = true)]
    async fn test_recv_waits_until_triggered() {
        let handle = ShutdownHandle::new();
        let mut shutdown = handle.subscribe();
        let waited = tokio::time::timeout(Duration::from_secs(1), shutdown.recv()).await;
        assert!(waited.is_err());
        assert!(!shutdown.is_shutdown());
    }
}
