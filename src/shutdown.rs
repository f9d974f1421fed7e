//! Cooperative cancellation shared by the sampling tasks and the UI.
//!
//! A [`Shutdown`] is fired exactly once (repeat calls are no-ops) and every
//! [`ShutdownSignal`] observes it. The signal is never reset.

use tokio::sync::watch;
use tracing::info;

/// Trigger side of the cancellation signal.
#[derive(Debug)]
pub struct Shutdown {
    tx: watch::Sender<bool>,
}

/// Observer side of the cancellation signal. Cheap to clone.
#[derive(Debug, Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<bool>,
}

impl Shutdown {
    /// Create an unset signal.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx }
    }

    /// Get an observer for this signal.
    pub fn signal(&self) -> ShutdownSignal {
        ShutdownSignal {
            rx: self.tx.subscribe(),
        }
    }

    /// Fire the signal. Returns true only for the call that actually set it.
    pub fn trigger(&self) -> bool {
        let fired = self.tx.send_if_modified(|set| {
            if *set {
                false
            } else {
                *set = true;
                true
            }
        });
        if fired {
            info!("Shutdown requested");
        }
        fired
    }

    pub fn is_triggered(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl ShutdownSignal {
    /// Non-blocking check.
    pub fn is_triggered(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once the signal is set, immediately if it already is.
    ///
    /// If the [`Shutdown`] is dropped without firing, this never resolves.
    pub async fn triggered(&mut self) {
        let closed = self.rx.wait_for(|set| *set).await.is_err();
        if closed {
            std::future::pending::<()>().await;
        }
    }
}
