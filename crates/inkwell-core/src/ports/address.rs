use inkwell_shared::PostId;

/// The page address the editor was opened at.
pub trait AddressBar: Send + Sync {
    /// Post id embedded in the address, if any.
    fn current_post_id(&self) -> Option<PostId>;

    /// Rewrite the address in place so reloads resolve to `id`. Not a navigation.
    fn replace_post_id(&self, id: &PostId);

    /// Leave the editor (after a delete).
    fn navigate(&self, location: &str);
}
