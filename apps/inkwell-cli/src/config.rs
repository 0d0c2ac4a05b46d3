//! Application configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use inkwell_core::sync::SyncConfig;
use inkwell_infra::HttpConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub http: HttpConfig,
    pub sync: SyncConfig,
    /// Editor page path; post ids are appended as a path segment.
    pub editor_path: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = SyncConfig::default();
        let sync = SyncConfig {
            autosave_delay: millis("INKWELL_AUTOSAVE_MS").unwrap_or(defaults.autosave_delay),
            tag_save_delay: millis("INKWELL_TAG_SAVE_MS").unwrap_or(defaults.tag_save_delay),
            status_clear_after: millis("INKWELL_STATUS_CLEAR_MS")
                .unwrap_or(defaults.status_clear_after),
            after_delete_location: env::var("INKWELL_AFTER_DELETE_PATH")
                .unwrap_or(defaults.after_delete_location),
        };

        Self {
            http: HttpConfig::from_env(),
            sync,
            editor_path: env::var("INKWELL_EDITOR_PATH")
                .unwrap_or_else(|_| "/admin/post".to_string()),
        }
    }

    /// Address of the editor page, optionally for an existing post.
    pub fn editor_address(&self, id: Option<&str>) -> String {
        let base = self.http.base_url.trim_end_matches('/');
        let path = self.editor_path.trim_end_matches('/');
        match id {
            Some(id) => format!("{}{}/{}", base, path, id),
            None => format!("{}{}", base, path),
        }
    }
}

fn millis(key: &str) -> Option<Duration> {
    env::var(key)
        .ok()
        .and_then(|s| s.parse().ok())
        .map(Duration::from_millis)
}
