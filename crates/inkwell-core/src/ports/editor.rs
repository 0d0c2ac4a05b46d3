/// The editing widget: a title field and a markdown body.
///
/// The synchronization engine reads snapshots from it and only writes back
/// when hydrating a loaded post or inserting an uploaded image.
pub trait EditorSurface: Send + Sync {
    fn title(&self) -> String;

    fn set_title(&self, title: &str);

    fn content(&self) -> String;

    fn set_content(&self, content: &str);

    /// Replace the current selection (or insert at the caret) with `text`.
    fn insert_at_selection(&self, text: &str);
}
