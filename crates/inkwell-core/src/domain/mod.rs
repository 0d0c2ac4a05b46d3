//! Domain types - the post being edited and its tags.

mod post;
mod tags;

pub use post::{PostPhase, PostRecord};
pub use tags::TagSet;
