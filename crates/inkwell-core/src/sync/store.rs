//! Post state store - the per-session record of the post being edited.

use std::sync::atomic::{AtomicU64, Ordering};

use inkwell_shared::PostId;
use tokio::sync::watch;

use crate::domain::PostRecord;

/// Sequence number handed out before a request is issued.
///
/// A response is only applied if its ticket is newer than the last applied
/// one, so a slow response cannot overwrite fresher metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

/// Observable post record with response fencing.
pub struct PostStore {
    record: watch::Sender<PostRecord>,
    issued: AtomicU64,
    applied: AtomicU64,
}

impl PostStore {
    pub fn new() -> Self {
        let (record, _) = watch::channel(PostRecord::default());
        Self {
            record,
            issued: AtomicU64::new(0),
            applied: AtomicU64::new(0),
        }
    }

    pub fn snapshot(&self) -> PostRecord {
        self.record.borrow().clone()
    }

    pub fn id(&self) -> Option<PostId> {
        self.record.borrow().id.clone()
    }

    pub fn is_deleted(&self) -> bool {
        self.record.borrow().deleted
    }

    pub fn subscribe(&self) -> watch::Receiver<PostRecord> {
        self.record.subscribe()
    }

    pub fn ticket(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    /// Apply a server-confirmed change if `ticket` is the newest seen so far.
    ///
    /// Returns `None` (and leaves the record untouched) for stale tickets and
    /// once the post is deleted.
    pub fn apply<R>(&self, ticket: Ticket, change: impl FnOnce(&mut PostRecord) -> R) -> Option<R> {
        let mut outcome = None;
        self.record.send_if_modified(|record| {
            // Checked under the channel's write lock, so check-and-set is atomic
            // with respect to other writers.
            if record.deleted || ticket.0 <= self.applied.load(Ordering::SeqCst) {
                return false;
            }
            self.applied.store(ticket.0, Ordering::SeqCst);
            outcome = Some(change(record));
            true
        });
        outcome
    }

    /// Discard the record after a confirmed delete.
    ///
    /// Every ticket issued so far is retired, so responses still in flight
    /// cannot bring the record back.
    pub fn mark_deleted(&self) {
        self.record.send_modify(|record| {
            self.applied
                .fetch_max(self.issued.load(Ordering::SeqCst), Ordering::SeqCst);
            *record = PostRecord {
                deleted: true,
                ..PostRecord::default()
            };
        });
    }
}

impl Default for PostStore {
    fn default() -> Self {
        Self::new()
    }
}
