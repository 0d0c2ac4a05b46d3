//! # Inkwell Infrastructure
//!
//! Concrete implementations of the ports defined in `inkwell-core`:
//! an HTTP transport over `reqwest`, a URL-backed address bar, an in-memory
//! editor buffer, and confirmation prompts.

pub mod address;
pub mod confirm;
pub mod editor;
pub mod error;
pub mod http;

pub use address::UrlAddressBar;
pub use confirm::{AutoConfirm, PromptConfirm, is_yes};
pub use editor::BufferEditor;
pub use error::InfraError;
pub use http::{HttpConfig, ReqwestTransport};
