//! Synchronization engine - create-or-update, conflict detection, and the
//! publish/retract/delete lifecycle.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use inkwell_shared::{
    ErrorBody, PostId, PostResponse, PublishRequest, SavePostRequest, TagsRequest, UploadResponse,
};

use crate::domain::{PostRecord, TagSet};
use crate::error::{Operation, SyncError};
use crate::ports::{AddressBar, ApiRequest, ApiResponse, Confirm, EditorSurface, Method, Transport};
use crate::sync::routes;
use crate::sync::status::{StatusReporter, messages};
use crate::sync::store::PostStore;

const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// Timing and navigation knobs for an editing session.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Quiet period before an edit burst is saved.
    pub autosave_delay: Duration,
    /// Quiet period before tag changes are saved.
    pub tag_save_delay: Duration,
    /// How long a status message stays up.
    pub status_clear_after: Duration,
    /// Where to go once the post is deleted.
    pub after_delete_location: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            autosave_delay: Duration::from_millis(3000),
            tag_save_delay: Duration::from_millis(1000),
            status_clear_after: Duration::from_millis(3000),
            after_delete_location: "/admin/dashboard".to_string(),
        }
    }
}

/// Keeps one post in sync with the backend.
///
/// Owns the session's [`PostStore`] and [`StatusReporter`]. Every operation
/// runs at most one request, reports its outcome on the status line, and
/// returns the error as well; nothing is retried.
pub struct SyncEngine {
    config: SyncConfig,
    transport: Arc<dyn Transport>,
    editor: Arc<dyn EditorSurface>,
    address: Arc<dyn AddressBar>,
    confirm: Arc<dyn Confirm>,
    store: PostStore,
    status: StatusReporter,
}

impl SyncEngine {
    pub fn new(
        config: SyncConfig,
        transport: Arc<dyn Transport>,
        editor: Arc<dyn EditorSurface>,
        address: Arc<dyn AddressBar>,
        confirm: Arc<dyn Confirm>,
    ) -> Self {
        let status = StatusReporter::new(config.status_clear_after);
        Self {
            config,
            transport,
            editor,
            address,
            confirm,
            store: PostStore::new(),
            status,
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &PostStore {
        &self.store
    }

    pub fn status(&self) -> &StatusReporter {
        &self.status
    }

    pub fn editor(&self) -> &Arc<dyn EditorSurface> {
        &self.editor
    }

    /// Create the post, or update it if it already has an id.
    pub async fn save(&self, title: &str, content: &str) -> Result<(), SyncError> {
        self.ensure_live()?;
        if title.trim().is_empty() {
            self.status.report(messages::TITLE_REQUIRED);
            return Err(SyncError::Validation("title is required".to_string()));
        }

        let snapshot = self.store.snapshot();
        let body = SavePostRequest {
            title: title.to_string(),
            markdown_content: content.to_string(),
            updated_on: snapshot.updated_on.clone(),
        };
        let request = match &snapshot.id {
            None => ApiRequest::new(Method::Post, routes::POST_COLLECTION),
            Some(id) => ApiRequest::new(Method::Patch, routes::post(id)),
        }
        .json(&body)
        .map_err(|e| Operation::Save.transport(e))?;

        let ticket = self.store.ticket();
        let response = self.dispatch(Operation::Save, request).await?;

        let echo = match (&snapshot.id, response.decode::<PostResponse>()) {
            (_, Ok(post)) => Some(post),
            (Some(_), Err(_)) => None,
            (None, Err(e)) => {
                // A create without an id in the body cannot be followed up.
                tracing::error!(error = %e, "Create response had no usable post body");
                self.status.report(messages::SAVE_FAILED);
                return Err(SyncError::Save(e.to_string()));
            }
        };

        let outcome = self.store.apply(ticket, |record| {
            let assigned = echo
                .as_ref()
                .is_some_and(|post| record.assign_id(post.id.clone()));
            record.title = title.to_string();
            // A create answered for some other post carries that post's witness.
            let echo = echo
                .as_ref()
                .filter(|post| record.id.as_ref() == Some(&post.id));
            absorb(record, echo);
            if let Some(post) = echo {
                record.published = post.published;
            }
            assigned
        });

        match outcome {
            Some(assigned) => {
                let record = self.store.snapshot();
                if let (true, Some(id)) = (assigned, &record.id) {
                    tracing::info!(post_id = %id, "Post created");
                    self.address.replace_post_id(id);
                }
                self.status.report(messages::SAVED);
                self.status
                    .post_state(record.published, record.updated_on.as_deref());
            }
            None => tracing::debug!(?ticket, "Discarding stale save response"),
        }
        Ok(())
    }

    /// Mark the post published.
    pub async fn publish(&self) -> Result<(), SyncError> {
        let id = self.require_id()?;
        let witness = self.store.snapshot().updated_on;
        let request = ApiRequest::new(Method::Patch, routes::post(&id))
            .json(&PublishRequest {
                published: true,
                updated_on: witness,
            })
            .map_err(|e| Operation::Publish.transport(e))?;

        let ticket = self.store.ticket();
        let response = self.dispatch(Operation::Publish, request).await?;
        let echo = response.decode::<PostResponse>().ok();

        if self
            .store
            .apply(ticket, |record| {
                record.published = true;
                record.retracted = false;
                absorb(record, echo.as_ref());
            })
            .is_some()
        {
            tracing::info!(post_id = %id, "Post published");
            self.report_state(messages::PUBLISHED);
        }
        Ok(())
    }

    /// Take a published post back to draft, after confirmation.
    pub async fn retract(&self) -> Result<(), SyncError> {
        let id = self.require_id()?;
        if !self
            .confirm
            .confirm("Retract this post? It will no longer be publicly visible.")
            .await
        {
            tracing::debug!(post_id = %id, "Retract cancelled");
            return Err(SyncError::Cancelled);
        }

        let witness = self.store.snapshot().updated_on;
        let request = ApiRequest::new(Method::Patch, routes::post_slash(&id))
            .json(&PublishRequest {
                published: false,
                updated_on: witness,
            })
            .map_err(|e| Operation::Retract.transport(e))?;

        let ticket = self.store.ticket();
        let response = self.dispatch(Operation::Retract, request).await?;
        let echo = response.decode::<PostResponse>().ok();

        if self
            .store
            .apply(ticket, |record| {
                record.published = false;
                record.retracted = true;
                absorb(record, echo.as_ref());
            })
            .is_some()
        {
            tracing::info!(post_id = %id, "Post retracted");
            self.report_state(messages::RETRACTED);
        }
        Ok(())
    }

    /// Delete the post, after confirmation. Only a 204 counts as success.
    pub async fn delete(&self) -> Result<(), SyncError> {
        let id = self.require_id()?;
        if !self
            .confirm
            .confirm("Delete this post? This cannot be undone.")
            .await
        {
            tracing::debug!(post_id = %id, "Delete cancelled");
            return Err(SyncError::Cancelled);
        }

        let request = ApiRequest::new(Method::Delete, routes::post_slash(&id));
        let response = self.dispatch(Operation::Delete, request).await?;
        if response.status != 204 {
            return Err(self.reject(Operation::Delete, &response));
        }

        tracing::info!(post_id = %id, "Post deleted");
        self.store.mark_deleted();
        self.status.report(messages::DELETED);
        self.address.navigate(&self.config.after_delete_location);
        Ok(())
    }

    /// Fetch a post and hand its title and body to the editor.
    ///
    /// On failure the record is left as it was, so the editor stays usable as
    /// a fresh draft.
    pub async fn load(&self, id: &PostId) -> Result<(), SyncError> {
        self.ensure_live()?;
        let ticket = self.store.ticket();
        let response = self
            .dispatch(Operation::Load, ApiRequest::new(Method::Get, routes::post(id)))
            .await?;
        let post = response.decode::<PostResponse>().map_err(|e| {
            tracing::error!(post_id = %id, error = %e, "Unreadable post body");
            self.status.report(messages::LOAD_FAILED);
            SyncError::Load(e.to_string())
        })?;

        let title = post.title.clone().unwrap_or_default();
        let content = post.markdown_content.clone().unwrap_or_default();
        let applied = self.store.apply(ticket, |record| {
            *record = PostRecord {
                id: Some(post.id.clone()),
                title: title.clone(),
                published: post.published,
                updated_on: post.updated_on.clone(),
                tags: post
                    .tags
                    .as_deref()
                    .map(|raw| TagSet::parse(raw).as_slice().to_vec())
                    .unwrap_or_default(),
                retracted: false,
                deleted: false,
            };
        });
        if applied.is_none() {
            tracing::debug!(?ticket, "Discarding stale load response");
            return Ok(());
        }

        self.editor.set_title(&title);
        self.editor.set_content(&content);
        tracing::info!(post_id = %post.id, "Post loaded");
        self.report_state(messages::LOADED);
        Ok(())
    }

    /// Load the post named by the page address, if there is one.
    ///
    /// Returns `Ok(false)` when the address carries no id (new draft).
    pub async fn load_from_address(&self) -> Result<bool, SyncError> {
        match self.address.current_post_id() {
            Some(id) => self.load(&id).await.map(|()| true),
            None => Ok(false),
        }
    }

    /// Upload an image and insert a markdown reference at the selection.
    ///
    /// Returns the server path. On failure the editor is left untouched.
    pub async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<String, SyncError> {
        self.ensure_live()?;
        let path = Path::new(file_name);
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let Some((_, content_type)) = IMAGE_EXTENSIONS.iter().find(|(ext, _)| *ext == extension)
        else {
            self.status.report(messages::IMAGE_FAILED);
            return Err(SyncError::Validation(format!(
                "unsupported image type: {}",
                file_name
            )));
        };
        if bytes.is_empty() {
            self.status.report(messages::IMAGE_FAILED);
            return Err(SyncError::Validation("image is empty".to_string()));
        }

        let request = ApiRequest::new(Method::Post, routes::UPLOAD).multipart(
            "image",
            file_name,
            *content_type,
            bytes,
        );
        let response = self.dispatch(Operation::Upload, request).await?;
        let uploaded = response.decode::<UploadResponse>().map_err(|e| {
            tracing::error!(error = %e, "Unreadable upload response");
            self.status.report(messages::IMAGE_FAILED);
            SyncError::Upload(e.to_string())
        })?;

        let alt = path
            .file_stem()
            .and_then(|stem| stem.to_str())
            .unwrap_or("image");
        self.editor
            .insert_at_selection(&format!("![{}]({})", alt, uploaded.path));
        tracing::info!(path = %uploaded.path, "Image uploaded");
        self.status.report(messages::IMAGE_UPLOADED);
        Ok(uploaded.path)
    }

    /// Persist the tag list. Drafts without an id are skipped.
    pub async fn save_tags(&self, tags: &TagSet) -> Result<(), SyncError> {
        self.ensure_live()?;
        let snapshot = self.store.snapshot();
        let Some(id) = snapshot.id else {
            tracing::debug!("Post not saved yet, skipping tag save");
            return Ok(());
        };

        let request = ApiRequest::new(Method::Patch, routes::post(&id))
            .json(&TagsRequest {
                tags: tags.to_wire(),
                updated_on: snapshot.updated_on,
            })
            .map_err(|e| Operation::Tags.transport(e))?;

        let ticket = self.store.ticket();
        let response = self.dispatch(Operation::Tags, request).await?;
        let echo = response.decode::<PostResponse>().ok();

        if self
            .store
            .apply(ticket, |record| {
                record.tags = tags.as_slice().to_vec();
                absorb(record, echo.as_ref());
            })
            .is_some()
        {
            tracing::info!(post_id = %id, tags = %tags, "Tags saved");
            let record = self.store.snapshot();
            self.status
                .post_state(record.published, record.updated_on.as_deref());
        }
        Ok(())
    }

    /// Send one request and sort the response into success, conflict, or failure.
    async fn dispatch(&self, op: Operation, request: ApiRequest) -> Result<ApiResponse, SyncError> {
        tracing::debug!(
            operation = op.as_str(),
            method = request.method.as_str(),
            path = %request.path,
            "Sending request"
        );

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(operation = op.as_str(), error = %e, "Request failed");
                self.status.report(op.failure_message());
                return Err(op.transport(e));
            }
        };

        if response.status == 409 && op.detects_conflicts() {
            tracing::warn!(
                operation = op.as_str(),
                "Post changed on the server, keeping local edits"
            );
            self.status.report(messages::CONFLICT);
            return Err(SyncError::Conflict);
        }
        if !response.is_success() {
            return Err(self.reject(op, &response));
        }
        Ok(response)
    }

    fn reject(&self, op: Operation, response: &ApiResponse) -> SyncError {
        let detail = ErrorBody::parse(&response.body)
            .map(|body| body.message())
            .unwrap_or_else(|| format!("HTTP {}", response.status));
        tracing::error!(
            operation = op.as_str(),
            status = response.status,
            detail = %detail,
            "Request rejected"
        );
        self.status.report(op.failure_message());
        op.fail(detail)
    }

    fn ensure_live(&self) -> Result<(), SyncError> {
        if self.store.is_deleted() {
            return Err(SyncError::Deleted);
        }
        Ok(())
    }

    fn require_id(&self) -> Result<PostId, SyncError> {
        self.ensure_live()?;
        self.store.id().ok_or_else(|| {
            self.status.report(messages::NOT_SAVED_YET);
            SyncError::NotPersisted
        })
    }

    fn report_state(&self, message: &str) {
        let record = self.store.snapshot();
        self.status.report(message);
        self.status
            .post_state(record.published, record.updated_on.as_deref());
    }
}

/// Take the server's witness from a response body, if it carried one.
fn absorb(record: &mut PostRecord, echo: Option<&PostResponse>) {
    if let Some(updated_on) = echo.and_then(|post| post.updated_on.clone()) {
        record.updated_on = Some(updated_on);
    }
}
