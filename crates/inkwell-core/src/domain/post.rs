use inkwell_shared::PostId;

/// Identity and synchronization metadata of the post being edited.
///
/// The markdown body is deliberately absent: it lives in the editor surface
/// and is only snapshotted on save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostRecord {
    /// `None` until the first successful create.
    pub id: Option<PostId>,
    pub title: String,
    pub published: bool,
    /// Last `updated_on` confirmed by the server. Never computed locally.
    pub updated_on: Option<String>,
    pub tags: Vec<String>,
    /// Set by a successful retract, cleared by publish.
    pub retracted: bool,
    /// Terminal. Set once the server confirmed the delete.
    pub deleted: bool,
}

/// Lifecycle of a post from the synchronization engine's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostPhase {
    Unsaved,
    Saved,
    Published,
    Retracted,
    Deleted,
}

impl PostRecord {
    pub fn phase(&self) -> PostPhase {
        if self.deleted {
            return PostPhase::Deleted;
        }
        match (&self.id, self.published, self.retracted) {
            (None, _, _) => PostPhase::Unsaved,
            (Some(_), true, _) => PostPhase::Published,
            (Some(_), false, true) => PostPhase::Retracted,
            (Some(_), false, false) => PostPhase::Saved,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some() && !self.deleted
    }

    /// Assign the server id unless one is already held. Returns `true` if assigned.
    pub(crate) fn assign_id(&mut self, id: PostId) -> bool {
        if self.id.is_some() {
            return false;
        }
        self.id = Some(id);
        true
    }

    /// Label for the published indicator.
    pub fn publish_label(&self) -> &'static str {
        if self.published { "Published" } else { "Draft" }
    }
}
