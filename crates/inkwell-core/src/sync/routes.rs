//! Backend paths. Trailing slashes differ per endpoint and are kept as the
//! server routes them.

use inkwell_shared::PostId;

pub const POST_COLLECTION: &str = "/api/v1/post/";
pub const UPLOAD: &str = "/api/v1/upload";

/// Load, update, publish, and tags.
pub fn post(id: &PostId) -> String {
    format!("/api/v1/post/{}", id)
}

/// Retract and delete.
pub fn post_slash(id: &PostId) -> String {
    format!("/api/v1/post/{}/", id)
}
