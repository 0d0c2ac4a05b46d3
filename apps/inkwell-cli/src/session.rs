//! Wiring of one editing session: engine plus the concrete adapters.

use std::sync::Arc;

use inkwell_core::ports::{Confirm, EditorSurface};
use inkwell_core::sync::{SyncEngine, StatusLine};
use inkwell_infra::{BufferEditor, ReqwestTransport, UrlAddressBar};

use crate::config::AppConfig;

pub struct Session {
    pub engine: Arc<SyncEngine>,
    pub editor: Arc<BufferEditor>,
    pub address: Arc<UrlAddressBar>,
}

impl Session {
    /// Build a session on the editor page for `id` (or a fresh draft).
    pub fn open(
        config: &AppConfig,
        id: Option<&str>,
        confirm: Arc<dyn Confirm>,
    ) -> anyhow::Result<Self> {
        let transport = Arc::new(ReqwestTransport::new(&config.http)?);
        let address = Arc::new(UrlAddressBar::parse(&config.editor_address(id))?);
        let editor = Arc::new(BufferEditor::new());

        let engine = Arc::new(SyncEngine::new(
            config.sync.clone(),
            transport,
            editor.clone(),
            address.clone(),
            confirm,
        ));

        tracing::debug!(address = %address.current(), "Session opened");
        Ok(Self {
            engine,
            editor,
            address,
        })
    }

    /// Load the post named by the address, if any.
    pub async fn load(&self) -> anyhow::Result<bool> {
        Ok(self.engine.load_from_address().await?)
    }

    /// Save whatever the editor currently holds.
    pub async fn save(&self) -> anyhow::Result<()> {
        let title = self.editor.title();
        let content = self.editor.content();
        self.engine.save(&title, &content).await?;
        Ok(())
    }

    /// One-line summary of the post for terminal output.
    pub fn summary(&self) -> String {
        let record = self.engine.store().snapshot();
        let id = record
            .id
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "-".to_string());
        format!(
            "#{} {} [{}] updated_on={} tags={}",
            id,
            record.title,
            record.publish_label(),
            record.updated_on.as_deref().unwrap_or("-"),
            record.tags.join(",")
        )
    }
}

/// Render a status line as `[Draft | T1] Saved`.
pub fn render_status(line: &StatusLine) -> String {
    let stamp = line.updated_on.as_deref().unwrap_or("never saved");
    match &line.message {
        Some(message) => format!("[{} | {}] {}", line.publish_label(), stamp, message),
        None => format!("[{} | {}]", line.publish_label(), stamp),
    }
}
