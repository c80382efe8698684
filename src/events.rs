//! Lifecycle events and the sinks that receive them.

use futures::channel::mpsc::UnboundedSender;

use crate::error::AdapterError;
use crate::types::PublicKey;

#[derive(Debug, Clone)]
pub enum AdapterEvent {
    Connect(PublicKey),
    Disconnect,
    Error(AdapterError),
}

impl AdapterEvent {
    /// Event name as wallet-adapter listeners know it.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Connect(_) => "connect",
            Self::Disconnect => "disconnect",
            Self::Error(_) => "error",
        }
    }
}

impl std::fmt::Display for AdapterEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connect(pk) => write!(f, "connect({pk})"),
            Self::Disconnect => write!(f, "disconnect"),
            Self::Error(err) => write!(f, "error({err})"),
        }
    }
}

/// Receives adapter events. Called without any adapter lock held.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: AdapterEvent);
}

/// Drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl EventSink for NoopSink {
    fn emit(&self, _event: AdapterEvent) {}
}

impl EventSink for UnboundedSender<AdapterEvent> {
    fn emit(&self, event: AdapterEvent) {
        if let Err(e) = self.unbounded_send(event) {
            log::debug!("event listener gone, dropping {}", e.into_inner().name());
        }
    }
}
