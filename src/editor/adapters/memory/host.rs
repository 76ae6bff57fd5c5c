//! In-memory host channel.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use crate::editor::{
    domain::{HostSnapshot, OutboundMessage},
    ports::{HostChannelError, HostChannelResult, HostEventSource, HostSink},
};

/// Host sink that records every posted message.
///
/// Clones share the same recording, so a test can keep one handle while
/// the controller owns another.
#[derive(Debug, Clone, Default)]
pub struct RecordingHostSink {
    messages: Arc<RwLock<Vec<OutboundMessage>>>,
    closed: Arc<AtomicBool>,
}

impl RecordingHostSink {
    /// Creates an open sink with no recorded messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every message posted so far, oldest first.
    ///
    /// Returns an empty list if the internal lock is poisoned.
    #[must_use]
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.messages
            .read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Counts posted messages carrying `command`.
    #[must_use]
    pub fn count_of(&self, command: &str) -> usize {
        self.messages()
            .iter()
            .filter(|message| message.command() == command)
            .count()
    }

    /// Simulates the host going away; later posts fail.
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}

impl HostSink for RecordingHostSink {
    fn post(&self, message: &OutboundMessage) -> HostChannelResult<()> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(HostChannelError::Closed);
        }
        let mut guard = self.messages.write().map_err(|err| {
            HostChannelError::transport(std::io::Error::other(err.to_string()))
        })?;
        guard.push(message.clone());
        Ok(())
    }
}

/// Host event source replaying a fixed list of snapshots.
#[derive(Debug, Clone, Default)]
pub struct ScriptedHostSource {
    pending: VecDeque<HostSnapshot>,
}

impl ScriptedHostSource {
    /// Creates a source that yields `snapshots` in order, then closes.
    #[must_use]
    pub fn new(snapshots: impl IntoIterator<Item = HostSnapshot>) -> Self {
        Self {
            pending: snapshots.into_iter().collect(),
        }
    }

    /// Number of snapshots not yet delivered.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

#[async_trait]
impl HostEventSource for ScriptedHostSource {
    async fn next_snapshot(&mut self) -> Option<HostSnapshot> {
        self.pending.pop_front()
    }
}
