//! Address bar backed by a parsed URL.

use std::sync::{Mutex, PoisonError};

use url::Url;

use inkwell_core::PostId;
use inkwell_core::ports::AddressBar;

use crate::error::InfraError;

/// Tracks the editor's page address.
///
/// The post id is read from an `id` query parameter, or from the segment
/// following `post` in the path (`/admin/post/42`).
pub struct UrlAddressBar {
    current: Mutex<Url>,
}

impl UrlAddressBar {
    pub fn parse(address: &str) -> Result<Self, InfraError> {
        let url = Url::parse(address).map_err(|e| InfraError::InvalidUrl {
            url: address.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::new(url))
    }

    pub fn new(url: Url) -> Self {
        Self {
            current: Mutex::new(url),
        }
    }

    pub fn current(&self) -> Url {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Url> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn query_id(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, value)| key == "id" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
}

fn path_id(url: &Url) -> Option<String> {
    let segments: Vec<&str> = url.path_segments()?.filter(|s| !s.is_empty()).collect();
    match segments.as_slice() {
        [.., "post", id] => Some((*id).to_string()),
        _ => None,
    }
}

impl AddressBar for UrlAddressBar {
    fn current_post_id(&self) -> Option<PostId> {
        let url = self.lock();
        query_id(&url).or_else(|| path_id(&url)).map(PostId::new)
    }

    fn replace_post_id(&self, id: &PostId) {
        let mut url = self.lock();

        if url.query_pairs().any(|(key, _)| key == "id") {
            let pairs: Vec<(String, String)> = url
                .query_pairs()
                .map(|(key, value)| {
                    let value = if key == "id" { id.to_string() } else { value.into_owned() };
                    (key.into_owned(), value)
                })
                .collect();
            url.query_pairs_mut().clear().extend_pairs(pairs);
        } else if url
            .path_segments()
            .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
            == Some("post")
        {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().push(id.as_str());
            }
        } else {
            url.query_pairs_mut().append_pair("id", id.as_str());
        }

        tracing::debug!(address = %url, "Address updated in place");
    }

    fn navigate(&self, location: &str) {
        let mut url = self.lock();
        match url.join(location) {
            Ok(next) => {
                tracing::info!(from = %url, to = %next, "Navigating");
                *url = next;
            }
            Err(e) => tracing::warn!(location, error = %e, "Ignoring invalid navigation target"),
        }
    }
}
