//! Ports for the host message channel.
//!
//! The host pushes snapshots through a [`HostEventSource`] and receives
//! intents through a [`HostSink`]. Outbound messages are fire-and-forget:
//! the host never acknowledges them, it only pushes a later snapshot.

use crate::editor::domain::{HostSnapshot, OutboundMessage};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for host channel operations.
pub type HostChannelResult<T> = Result<T, HostChannelError>;

/// Inbound stream of host snapshots.
#[async_trait]
pub trait HostEventSource: Send {
    /// Waits for the next snapshot.
    ///
    /// Returns `None` once the host side has closed the channel.
    async fn next_snapshot(&mut self) -> Option<HostSnapshot>;
}

/// Outbound sink for intent messages.
pub trait HostSink: Send + Sync {
    /// Posts one message to the host without waiting for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`HostChannelError::Closed`] when the host side is gone, or
    /// [`HostChannelError::Transport`] when the message cannot be delivered.
    fn post(&self, message: &OutboundMessage) -> HostChannelResult<()>;
}

/// Errors raised by host channel adapters.
#[derive(Debug, Clone, Error)]
pub enum HostChannelError {
    /// The host side of the channel has been dropped.
    #[error("host channel closed")]
    Closed,

    /// Transport-level failure.
    #[error("host transport error: {0}")]
    Transport(Arc<dyn std::error::Error + Send + Sync>),
}

impl HostChannelError {
    /// Wraps a transport error.
    pub fn transport(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Transport(Arc::new(err))
    }
}
