//! Synchronization error types.

use thiserror::Error;

use crate::ports::TransportError;
use crate::sync::messages;

/// Failures surfaced by [`SyncEngine`](crate::sync::SyncEngine) operations.
///
/// None of these are fatal to the editing session: every variant is also
/// reported through the status line, and the user's next action is the retry.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Post was modified on the server since it was last loaded")]
    Conflict,

    #[error("Post has not been saved yet")]
    NotPersisted,

    #[error("Cancelled by user")]
    Cancelled,

    #[error("Post has been deleted")]
    Deleted,

    #[error("Save failed: {0}")]
    Save(String),

    #[error("Load failed: {0}")]
    Load(String),

    #[error("Publish failed: {0}")]
    Publish(String),

    #[error("Retract failed: {0}")]
    Retract(String),

    #[error("Delete failed: {0}")]
    Delete(String),

    #[error("Image upload failed: {0}")]
    Upload(String),

    #[error("Saving tags failed: {0}")]
    Tags(String),
}

impl SyncError {
    /// True for 409 responses, which need a reload rather than another attempt.
    pub fn is_conflict(&self) -> bool {
        matches!(self, SyncError::Conflict)
    }
}

/// Which operation a transport failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operation {
    Save,
    Load,
    Publish,
    Retract,
    Delete,
    Upload,
    Tags,
}

impl Operation {
    pub(crate) fn fail(self, detail: impl Into<String>) -> SyncError {
        let detail = detail.into();
        match self {
            Operation::Save => SyncError::Save(detail),
            Operation::Load => SyncError::Load(detail),
            Operation::Publish => SyncError::Publish(detail),
            Operation::Retract => SyncError::Retract(detail),
            Operation::Delete => SyncError::Delete(detail),
            Operation::Upload => SyncError::Upload(detail),
            Operation::Tags => SyncError::Tags(detail),
        }
    }

    pub(crate) fn transport(self, err: TransportError) -> SyncError {
        self.fail(err.to_string())
    }

    /// Whether a 409 from this operation means an edit conflict.
    pub(crate) fn detects_conflicts(self) -> bool {
        matches!(
            self,
            Operation::Save | Operation::Publish | Operation::Retract | Operation::Tags
        )
    }

    pub(crate) fn failure_message(self) -> &'static str {
        match self {
            Operation::Save => messages::SAVE_FAILED,
            Operation::Load => messages::LOAD_FAILED,
            Operation::Publish => messages::PUBLISH_FAILED,
            Operation::Retract => messages::RETRACT_FAILED,
            Operation::Delete => messages::DELETE_FAILED,
            Operation::Upload => messages::IMAGE_FAILED,
            Operation::Tags => messages::TAGS_FAILED,
        }
    }

    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Operation::Save => "save",
            Operation::Load => "load",
            Operation::Publish => "publish",
            Operation::Retract => "retract",
            Operation::Delete => "delete",
            Operation::Upload => "upload",
            Operation::Tags => "tags",
        }
    }
}
