//! Status line - transient human-readable state for the editor chrome.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

/// User-facing status texts.
pub mod messages {
    pub const SAVED: &str = "Saved";
    pub const SAVE_FAILED: &str = "Save failed";
    pub const TITLE_REQUIRED: &str = "Title is required";
    pub const CONFLICT: &str = "This post was changed elsewhere. Reload to get the latest version.";
    pub const LOADED: &str = "Post loaded";
    pub const LOAD_FAILED: &str = "Error loading post";
    pub const PUBLISHED: &str = "Post published";
    pub const PUBLISH_FAILED: &str = "Publish failed";
    pub const RETRACTED: &str = "Post retracted";
    pub const RETRACT_FAILED: &str = "Retract failed";
    pub const DELETED: &str = "Post deleted";
    pub const DELETE_FAILED: &str = "Delete failed";
    pub const NOT_SAVED_YET: &str = "Save the post first";
    pub const IMAGE_UPLOADED: &str = "Image uploaded";
    pub const IMAGE_FAILED: &str = "Image upload failed";
    pub const TAGS_FAILED: &str = "Saving tags failed";
}

/// What the status area currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub message: Option<String>,
    pub published: bool,
    pub updated_on: Option<String>,
    pub reported_at: Option<DateTime<Utc>>,
}

impl StatusLine {
    pub fn publish_label(&self) -> &'static str {
        if self.published { "Published" } else { "Draft" }
    }
}

/// Passive status sink. Cheap to clone; clones share one line.
///
/// A new message overwrites the current one and is cleared after
/// `clear_after`. Clear timers are never cancelled; each one only clears the
/// message it was armed for.
#[derive(Clone)]
pub struct StatusReporter {
    line: Arc<watch::Sender<StatusLine>>,
    generation: Arc<AtomicU64>,
    clear_after: Duration,
}

impl StatusReporter {
    pub fn new(clear_after: Duration) -> Self {
        let (line, _) = watch::channel(StatusLine::default());
        Self {
            line: Arc::new(line),
            generation: Arc::new(AtomicU64::new(0)),
            clear_after,
        }
    }

    pub fn report(&self, message: impl Into<String>) {
        let message = message.into();
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::info!(status = %message, "Status");

        self.line.send_modify(|line| {
            line.message = Some(message);
            line.reported_at = Some(Utc::now());
        });

        // Outside a runtime the message simply stays until overwritten.
        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            return;
        };
        let line = self.line.clone();
        let current = self.generation.clone();
        let clear_after = self.clear_after;
        runtime.spawn(async move {
            tokio::time::sleep(clear_after).await;
            line.send_if_modified(|line| {
                if current.load(Ordering::SeqCst) != generation || line.message.is_none() {
                    return false;
                }
                line.message = None;
                true
            });
        });
    }

    /// Update the published indicator and last-saved token.
    pub fn post_state(&self, published: bool, updated_on: Option<&str>) {
        tracing::debug!(published, updated_on = ?updated_on, "Post state");
        self.line.send_modify(|line| {
            line.published = published;
            line.updated_on = updated_on.map(str::to_string);
        });
    }

    pub fn current(&self) -> StatusLine {
        self.line.borrow().clone()
    }

    pub fn message(&self) -> Option<String> {
        self.line.borrow().message.clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<StatusLine> {
        self.line.subscribe()
    }
}
