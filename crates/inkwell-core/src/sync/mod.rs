//! Synchronization core - store, scheduling, engine, and the passive
//! surfaces (status line, command bar) that observe it.

mod autosave;
mod commands;
mod debounce;
mod engine;
pub mod routes;
mod status;
mod store;
mod tags;

pub use autosave::AutosaveScheduler;
pub use commands::{Command, CommandBar};
pub use debounce::{DebouncedAction, Debouncer};
pub use engine::{SyncConfig, SyncEngine};
pub use status::{StatusLine, StatusReporter, messages};
pub use store::{PostStore, Ticket};
pub use tags::TagEditor;
