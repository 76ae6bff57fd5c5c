//! State synchronization controller for one editor panel.

use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use crate::editor::{
    config::EditorConfig,
    domain::{
        DraftEdit, EditorDomainError, HostSnapshot, OutboundMessage, PanelState, TaskData,
        WorkingState,
    },
    ports::{HostChannelError, HostEventSource, HostSink, PanelStateStore, StateStoreError},
    validation::{ValidationContext, ValidationReport, validate_draft},
};

use super::EditorSummary;

/// Service-level errors for controller operations.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// A local edit was rejected.
    #[error(transparent)]
    Domain(#[from] EditorDomainError),
    /// An outbound message could not be posted.
    #[error(transparent)]
    Channel(#[from] HostChannelError),
    /// The panel state could not be persisted.
    #[error(transparent)]
    StateStore(#[from] StateStoreError),
    /// No host snapshot has been received yet.
    #[error("the editor has not received a host snapshot yet")]
    NotReady,
    /// The operation needs a loaded task but the editor is creating one.
    #[error("no task is loaded in the editor")]
    NoTaskLoaded,
}

/// Result type for controller operations.
pub type ControllerResult<T> = Result<T, ControllerError>;

/// Outcome of a submit request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The draft was sent to the host and adopted as the new baseline.
    Sent {
        /// Command of the posted message.
        command: &'static str,
    },
    /// Validation failed; nothing was sent and the draft is unchanged.
    Rejected(ValidationReport),
}

impl SubmitOutcome {
    /// Returns `true` when the draft was sent.
    #[must_use]
    pub const fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Owns the working state of one panel and maps host snapshots and local
/// edits onto it.
///
/// Outbound messages are fire-and-forget: the controller never waits for
/// the host and commits submitted drafts optimistically. Every mutation is
/// followed by an overwrite of the persisted state.
pub struct EditorController<K, P, C>
where
    K: HostSink,
    P: PanelStateStore,
    C: Clock + Send + Sync,
{
    sink: Arc<K>,
    store: Arc<P>,
    clock: Arc<C>,
    config: EditorConfig,
    state: PanelState,
}

impl<K, P, C> EditorController<K, P, C>
where
    K: HostSink,
    P: PanelStateStore,
    C: Clock + Send + Sync,
{
    /// Creates a controller, restoring any state saved by `store`.
    ///
    /// A missing or unreadable saved state starts the panel uninitialized.
    #[must_use]
    pub fn new(sink: Arc<K>, store: Arc<P>, clock: Arc<C>, config: EditorConfig) -> Self {
        let state = match store.load() {
            Ok(Some(restored)) => {
                debug!("restored saved panel state");
                restored
            }
            Ok(None) => PanelState::Uninitialized,
            Err(err) => {
                warn!(error = %err, "discarding unreadable panel state");
                PanelState::Uninitialized
            }
        };
        Self {
            sink,
            store,
            clock,
            config,
            state,
        }
    }

    /// Asks the host for the current task and board context.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::Channel`] when the request cannot be
    /// posted.
    pub fn start(&self) -> ControllerResult<()> {
        info!("requesting host snapshot");
        self.post(&OutboundMessage::UpdateMe)
    }

    /// Replaces the working state with a host snapshot.
    ///
    /// The draft is re-derived from scratch; only the presentation flags of
    /// the previous state survive.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::StateStore`] when the new state cannot be
    /// persisted. The state is replaced regardless.
    #[instrument(skip_all, fields(kind = %snapshot.kind))]
    pub fn on_message(&mut self, snapshot: HostSnapshot) -> ControllerResult<()> {
        let working = WorkingState::from_snapshot(
            snapshot,
            self.state.ui(),
            &self.config.fallback_date_format,
            &*self.clock,
        );
        debug!(
            mode = ?working.mode(),
            known_tasks = working.tasks().len(),
            "applied host snapshot"
        );
        self.state = PanelState::Ready(Box::new(working));
        self.persist()
    }

    /// Applies one local edit to the draft.
    ///
    /// Removing the comment currently shown as an editor leaves comment
    /// edit mode; removing an earlier comment shifts the edit index.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot,
    /// [`ControllerError::Domain`] when the edit is rejected, or
    /// [`ControllerError::StateStore`] when persisting fails.
    pub fn edit(&mut self, edit: DraftEdit) -> ControllerResult<()> {
        let removed_comment = match &edit {
            DraftEdit::RemoveComment(index) => Some(*index),
            _ => None,
        };
        let working = self
            .state
            .working_mut()
            .ok_or(ControllerError::NotReady)?;
        working.draft_mut().apply(
            edit,
            &*self.clock,
            &self.config.default_comment_author,
        )?;
        if let Some(removed) = removed_comment {
            let ui = working.ui_mut();
            ui.editing_comment = shift_comment_index(ui.editing_comment, removed);
        }
        self.persist()
    }

    /// Toggles description edit mode.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot, or
    /// [`ControllerError::StateStore`] when persisting fails.
    pub fn set_editing_description(&mut self, editing: bool) -> ControllerResult<()> {
        self.working_mut()?.ui_mut().editing_description = editing;
        self.persist()
    }

    /// Selects the comment shown as an editor, or none.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot, or
    /// [`ControllerError::StateStore`] when persisting fails.
    pub fn set_editing_comment(&mut self, index: Option<usize>) -> ControllerResult<()> {
        self.working_mut()?.ui_mut().editing_comment = index;
        self.persist()
    }

    /// Validates the current draft against the local board snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot.
    pub fn validate(&self) -> ControllerResult<ValidationReport> {
        let working = self.working()?;
        let context = ValidationContext::new(working.tasks(), working.task());
        Ok(validate_draft(working.draft(), &context))
    }

    /// Validates and submits the draft.
    ///
    /// A valid draft is sent as `kanbn.create` when no task is loaded and
    /// as `kanbn.update` otherwise, then adopted as the new baseline
    /// without waiting for the host.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot,
    /// [`ControllerError::Channel`] when the message cannot be posted, or
    /// [`ControllerError::StateStore`] when persisting fails.
    #[instrument(skip_all)]
    pub fn submit(&mut self) -> ControllerResult<SubmitOutcome> {
        let report = self.validate()?;
        if !report.is_empty() {
            debug!(errors = report.error_count(), "submit rejected by validation");
            return Ok(SubmitOutcome::Rejected(report));
        }

        let working = self.working()?;
        let task_data = working.draft().to_task_data();
        let custom_fields = working.custom_fields().to_vec();
        let message = match working.task() {
            Some(loaded) => OutboundMessage::Update {
                task_id: loaded.id.clone(),
                task_data,
                custom_fields,
            },
            None => OutboundMessage::Create {
                task_data,
                custom_fields,
            },
        };
        self.post(&message)?;

        self.working_mut()?.commit_draft();
        self.persist()?;
        Ok(SubmitOutcome::Sent {
            command: message.command(),
        })
    }

    /// Asks the host to delete the loaded task.
    ///
    /// The known-task index is left alone until the host pushes a fresh
    /// snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ControllerError::NotReady`] before the first snapshot,
    /// [`ControllerError::NoTaskLoaded`] when creating, or
    /// [`ControllerError::Channel`] when the message cannot be posted.
    #[instrument(skip_all)]
    pub fn delete(&self) -> ControllerResult<()> {
        let (task_id, task_data) = self.loaded_payload()?;
        self.post(&OutboundMessage::Delete { task_id, task_data })
    }

    /// Asks the host to archive the loaded task.
    ///
    /// # Errors
    ///
    /// Same as [`EditorController::delete`].
    #[instrument(skip_all)]
    pub fn archive(&self) -> ControllerResult<()> {
        let (task_id, task_data) = self.loaded_payload()?;
        self.post(&OutboundMessage::Archive { task_id, task_data })
    }

    /// Drains `source`, applying every snapshot until the host closes it.
    ///
    /// Persistence failures are logged and do not stop the loop. Returns the
    /// number of snapshots applied.
    pub async fn run<S>(&mut self, source: &mut S) -> usize
    where
        S: HostEventSource + ?Sized,
    {
        let mut applied = 0_usize;
        while let Some(snapshot) = source.next_snapshot().await {
            if let Err(err) = self.on_message(snapshot) {
                warn!(error = %err, "snapshot applied but not persisted");
            }
            applied = applied.saturating_add(1);
        }
        info!(applied, "host event source closed");
        applied
    }

    /// Returns `true` when the draft has unsubmitted changes.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.state.working().is_some_and(WorkingState::is_dirty)
    }

    /// Current panel state.
    #[must_use]
    pub const fn state(&self) -> &PanelState {
        &self.state
    }

    /// Working state once the first snapshot has arrived.
    #[must_use]
    pub fn working_state(&self) -> Option<&WorkingState> {
        self.state.working()
    }

    /// View model of the current working state.
    #[must_use]
    pub fn summary(&self) -> Option<EditorSummary> {
        self.state
            .working()
            .map(|working| EditorSummary::from_state(working, &*self.clock))
    }

    /// Configuration in effect.
    #[must_use]
    pub const fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn working(&self) -> ControllerResult<&WorkingState> {
        self.state.working().ok_or(ControllerError::NotReady)
    }

    fn working_mut(&mut self) -> ControllerResult<&mut WorkingState> {
        self.state.working_mut().ok_or(ControllerError::NotReady)
    }

    fn loaded_payload(&self) -> ControllerResult<(String, TaskData)> {
        let working = self.working()?;
        let loaded = working.task().ok_or(ControllerError::NoTaskLoaded)?;
        Ok((loaded.id.clone(), working.draft().to_task_data()))
    }

    fn post(&self, message: &OutboundMessage) -> ControllerResult<()> {
        self.sink.post(message)?;
        debug!(command = message.command(), "posted message to host");
        Ok(())
    }

    fn persist(&self) -> ControllerResult<()> {
        self.store.save(&self.state)?;
        Ok(())
    }
}

fn shift_comment_index(editing: Option<usize>, removed: usize) -> Option<usize> {
    match editing {
        Some(current) if current == removed => None,
        Some(current) if current > removed => current.checked_sub(1),
        other => other,
    }
}
