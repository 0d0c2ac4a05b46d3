//! Command bar - named editor actions whose visibility follows the post.

use tokio::sync::watch;

use crate::domain::PostRecord;

/// Predicate deciding whether a command is offered for the current post.
pub type Visibility = fn(&PostRecord) -> bool;

/// One named action.
#[derive(Debug, Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    pub title: &'static str,
    visible_when: Option<Visibility>,
}

impl Command {
    /// A command that is always offered.
    pub const fn new(name: &'static str, title: &'static str) -> Self {
        Self {
            name,
            title,
            visible_when: None,
        }
    }

    pub const fn visible_when(mut self, predicate: Visibility) -> Self {
        self.visible_when = Some(predicate);
        self
    }

    pub fn is_visible(&self, record: &PostRecord) -> bool {
        if record.deleted {
            return false;
        }
        self.visible_when.is_none_or(|visible| visible(record))
    }
}

/// Declarative action list subscribed to the post store.
///
/// Visibility is read from the latest record on demand; [`changed`](Self::changed)
/// wakes when the record changes so a front end can redraw.
pub struct CommandBar {
    commands: Vec<Command>,
    post: watch::Receiver<PostRecord>,
}

impl CommandBar {
    pub fn new(post: watch::Receiver<PostRecord>) -> Self {
        Self {
            commands: Vec::new(),
            post,
        }
    }

    /// The editor's stock actions.
    pub fn standard(post: watch::Receiver<PostRecord>) -> Self {
        Self::new(post)
            .with(Command::new("save", "Save"))
            .with(Command::new("publish", "Publish").visible_when(|p| p.is_persisted() && !p.published))
            .with(Command::new("retract", "Retract").visible_when(|p| p.is_persisted() && p.published))
            .with(Command::new("delete", "Delete").visible_when(PostRecord::is_persisted))
            .with(Command::new("upload-image", "Insert image"))
    }

    pub fn with(mut self, command: Command) -> Self {
        self.commands.push(command);
        self
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Names of the commands offered right now.
    pub fn visible(&self) -> Vec<&'static str> {
        let record = self.post.borrow();
        self.commands
            .iter()
            .filter(|command| command.is_visible(&record))
            .map(|command| command.name)
            .collect()
    }

    pub fn is_visible(&self, name: &str) -> bool {
        let record = self.post.borrow();
        self.commands
            .iter()
            .any(|command| command.name == name && command.is_visible(&record))
    }

    /// Wait for the post to change. Returns `false` once the store is gone.
    pub async fn changed(&mut self) -> bool {
        self.post.changed().await.is_ok()
    }
}
