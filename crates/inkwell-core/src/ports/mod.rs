//! Ports - trait definitions for the client's collaborators.
//! Infrastructure (HTTP, address bar, editor widget, prompts) implements these.

mod address;
mod confirm;
mod editor;
mod transport;

pub use address::AddressBar;
pub use confirm::Confirm;
pub use editor::EditorSurface;
pub use transport::{ApiRequest, ApiResponse, Method, RequestBody, Transport, TransportError};
