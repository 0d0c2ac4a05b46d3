//! # Inkwell Core
//!
//! The synchronization layer of the Inkwell editing client.
//! Holds the post record, decides when editor state is persisted, and
//! reconciles it with the backend through the `updated_on` witness.
//! All I/O goes through the traits in [`ports`].

pub mod domain;
pub mod error;
pub mod ports;
pub mod sync;

#[cfg(test)]
mod testing;

pub use error::SyncError;
pub use inkwell_shared::PostId;
