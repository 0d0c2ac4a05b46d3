//! Tag editing with its own, shorter autosave.

use std::sync::{Arc, Mutex, PoisonError};

use futures::FutureExt;

use crate::domain::TagSet;
use crate::sync::debounce::{DebouncedAction, Debouncer};
use crate::sync::engine::SyncEngine;

/// Editable tag list bound to the session's post.
///
/// Every change re-arms a debounced tag save. Changes made before the post
/// has an id are kept locally and go out with the first change after it is
/// persisted.
pub struct TagEditor {
    engine: Arc<SyncEngine>,
    tags: Arc<Mutex<TagSet>>,
    debouncer: Debouncer,
}

impl TagEditor {
    pub fn new(engine: Arc<SyncEngine>) -> Self {
        let tags = Arc::new(Mutex::new(TagSet::from_tags(
            engine.store().snapshot().tags,
        )));

        let action: DebouncedAction = {
            let engine = engine.clone();
            let tags = tags.clone();
            Arc::new(move || {
                let engine = engine.clone();
                let tags = tags.clone();
                async move {
                    let snapshot = tags.lock().unwrap_or_else(PoisonError::into_inner).clone();
                    if let Err(e) = engine.save_tags(&snapshot).await {
                        tracing::debug!(error = %e, "Tag save did not complete");
                    }
                }
                .boxed()
            })
        };

        let delay = engine.config().tag_save_delay;
        Self {
            engine,
            tags,
            debouncer: Debouncer::new(delay, action),
        }
    }

    pub fn add(&self, raw: &str) -> bool {
        let added = self.lock().insert(raw);
        if added {
            self.schedule();
        }
        added
    }

    pub fn remove(&self, raw: &str) -> bool {
        let removed = self.lock().remove(raw);
        if removed {
            self.schedule();
        }
        removed
    }

    /// Backspace on an empty input drops the last tag.
    pub fn pop_last(&self) -> Option<String> {
        let popped = self.lock().pop();
        if popped.is_some() {
            self.schedule();
        }
        popped
    }

    /// Replace the list without saving (e.g. after a load).
    pub fn reset_from_store(&self) {
        *self.lock() = TagSet::from_tags(self.engine.store().snapshot().tags);
    }

    pub fn current(&self) -> TagSet {
        self.lock().clone()
    }

    pub async fn flush(&self) {
        self.debouncer.flush().await;
    }

    pub fn is_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    fn schedule(&self) {
        if !self.engine.store().snapshot().is_persisted() {
            return;
        }
        self.debouncer.trigger();
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, TagSet> {
        self.tags.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
