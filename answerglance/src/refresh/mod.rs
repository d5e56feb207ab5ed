//! Refresh notification channel.
//!
//! After every successful mutation of the shared store, the core fires a
//! one-way signal telling the host that rendered timelines should be
//! regenerated. The signal is fire-and-forget: the sender never blocks and
//! never learns whether anything was listening, and no correctness in this
//! crate depends on delivery timing.

use tokio::sync::mpsc;

/// Events emitted toward the rendering host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshEvent {
    /// Every host-rendered timeline should be regenerated.
    ReloadAllTimelines,
}

/// Sender half of the refresh channel.
///
/// Cheaply cloneable; clone it freely into every component that mutates the
/// store. All methods are fire-and-forget and silently ignore a closed
/// channel (the host may simply not be listening).
#[derive(Debug, Clone)]
pub struct RefreshClient {
    tx: mpsc::UnboundedSender<RefreshEvent>,
}

impl RefreshClient {
    /// Create a client around the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<RefreshEvent>) -> Self {
        Self { tx }
    }

    #[inline]
    fn send(&self, event: RefreshEvent) {
        // Ignore send errors - the host may have dropped the receiver
        let _ = self.tx.send(event);
    }

    /// Signal that all timelines should be reloaded.
    #[inline]
    pub fn reload_all_timelines(&self) {
        self.send(RefreshEvent::ReloadAllTimelines);
    }
}

/// Receiver half of the refresh channel, held by the rendering host.
pub type RefreshReceiver = mpsc::UnboundedReceiver<RefreshEvent>;

/// Create a connected client/receiver pair.
///
/// The receiver belongs to the rendering host; everything in this crate only
/// ever holds the client.
pub fn channel() -> (RefreshClient, RefreshReceiver) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RefreshClient::new(tx), rx)
}
