//! # Inkwell Shared
//!
//! Wire types for the blog backend's `/api/v1` surface.
//! Request bodies, response bodies, and the error body the server returns.

pub mod dto;
pub mod response;

pub use dto::{PostId, PostResponse, PublishRequest, SavePostRequest, TagsRequest, UploadResponse};
pub use response::ErrorBody;
