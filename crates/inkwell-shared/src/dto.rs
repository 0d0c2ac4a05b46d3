//! Data Transfer Objects - request/response bodies for the post API.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Server-assigned post identifier.
///
/// The backend issues integer ids, but the client treats them as opaque and
/// accepts either a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PostId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl Serialize for PostId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for PostId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Str(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(n) => Ok(Self(n.to_string())),
            Raw::Str(s) if !s.trim().is_empty() => Ok(Self(s)),
            Raw::Str(_) => Err(serde::de::Error::custom("post id must not be empty")),
        }
    }
}

/// Body for create (`POST /api/v1/post/`) and update (`PATCH /api/v1/post/{id}`).
///
/// `updated_on` is the concurrency witness: the last value the client saw,
/// `null` for a brand new draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavePostRequest {
    pub title: String,
    pub markdown_content: String,
    pub updated_on: Option<String>,
}

/// Body for publish and retract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub published: bool,
    pub updated_on: Option<String>,
}

/// Body for a tag-only update. Tags travel as one comma-joined string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagsRequest {
    pub tags: String,
    pub updated_on: Option<String>,
}

/// A post as returned by the backend.
///
/// Only `id` is guaranteed; partial bodies (e.g. a PATCH echo) leave the
/// rest at their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: PostId,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub markdown_content: Option<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub updated_on: Option<String>,
    #[serde(default)]
    pub tags: Option<String>,
}

/// Response of `POST /api/v1/upload`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub path: String,
    #[serde(default)]
    pub filename: Option<String>,
}
