//! `tokio` channel bridges between the controller and an embedding host.
//!
//! The host owns the opposite ends: it sends snapshots (typed or as raw
//! JSON frames) and drains intent messages.

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::warn;

use crate::editor::{
    domain::{HostSnapshot, OutboundMessage},
    ports::{HostChannelError, HostChannelResult, HostEventSource, HostSink},
};

/// Event source fed with decoded snapshots.
#[derive(Debug)]
pub struct ChannelHostSource {
    receiver: mpsc::Receiver<HostSnapshot>,
}

impl ChannelHostSource {
    /// Wraps the receiving end of a snapshot channel.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<HostSnapshot>) -> Self {
        Self { receiver }
    }
}

#[async_trait]
impl HostEventSource for ChannelHostSource {
    async fn next_snapshot(&mut self) -> Option<HostSnapshot> {
        self.receiver.recv().await
    }
}

/// Event source fed with raw JSON frames.
///
/// Frames that do not decode as a snapshot are logged and skipped.
#[derive(Debug)]
pub struct JsonFrameHostSource {
    receiver: mpsc::Receiver<String>,
}

impl JsonFrameHostSource {
    /// Wraps the receiving end of a frame channel.
    #[must_use]
    pub const fn new(receiver: mpsc::Receiver<String>) -> Self {
        Self { receiver }
    }
}

#[async_trait]
impl HostEventSource for JsonFrameHostSource {
    async fn next_snapshot(&mut self) -> Option<HostSnapshot> {
        while let Some(frame) = self.receiver.recv().await {
            match HostSnapshot::from_json(&frame) {
                Ok(snapshot) => return Some(snapshot),
                Err(err) => warn!(error = %err, "skipping malformed host frame"),
            }
        }
        None
    }
}

/// Sink forwarding intents over an unbounded channel.
#[derive(Debug, Clone)]
pub struct ChannelHostSink {
    sender: mpsc::UnboundedSender<OutboundMessage>,
}

impl ChannelHostSink {
    /// Wraps the sending end of an intent channel.
    #[must_use]
    pub const fn new(sender: mpsc::UnboundedSender<OutboundMessage>) -> Self {
        Self { sender }
    }
}

impl HostSink for ChannelHostSink {
    fn post(&self, message: &OutboundMessage) -> HostChannelResult<()> {
        self.sender
            .send(message.clone())
            .map_err(|_| HostChannelError::Closed)
    }
}
