//! Debounced autosave for title and body edits.

use std::sync::Arc;

use futures::FutureExt;

use crate::sync::debounce::{DebouncedAction, Debouncer};
use crate::sync::engine::SyncEngine;

/// Turns edit events into at most one pending save.
///
/// Title and body edits share this one scheduler, so either resets the timer.
/// The title and content are read from the editor when the timer fires, not
/// when the edit happened.
pub struct AutosaveScheduler {
    debouncer: Debouncer,
}

impl AutosaveScheduler {
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        let delay = engine.config().autosave_delay;
        let action: DebouncedAction = Arc::new(move || {
            let engine = engine.clone();
            async move {
                let title = engine.editor().title();
                let content = engine.editor().content();
                if let Err(e) = engine.save(&title, &content).await {
                    tracing::debug!(error = %e, "Autosave did not complete");
                }
            }
            .boxed()
        });

        Self {
            debouncer: Debouncer::new(delay, action),
        }
    }

    /// Title or body changed.
    pub fn on_edit(&self) {
        self.debouncer.trigger();
    }

    /// Save right away instead of waiting out the quiet period.
    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    pub fn cancel(&self) -> bool {
        self.debouncer.cancel()
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }
}
