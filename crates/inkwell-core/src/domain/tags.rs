use std::fmt;

/// Ordered, normalized set of post tags.
///
/// Tags are trimmed and lowercased; blanks and duplicates are dropped.
/// The wire form is a single comma-joined string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagSet {
    tags: Vec<String>,
}

impl TagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-separated list as stored by the backend.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for tag in raw.split(',') {
            set.insert(tag);
        }
        set
    }

    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = Self::new();
        for tag in tags {
            set.insert(tag.as_ref());
        }
        set
    }

    /// Returns `true` if the tag was new.
    pub fn insert(&mut self, raw: &str) -> bool {
        let tag = raw.trim().to_lowercase();
        if tag.is_empty() || self.tags.contains(&tag) {
            return false;
        }
        self.tags.push(tag);
        true
    }

    pub fn remove(&mut self, raw: &str) -> bool {
        let tag = raw.trim().to_lowercase();
        let before = self.tags.len();
        self.tags.retain(|t| *t != tag);
        self.tags.len() != before
    }

    /// Remove the most recently added tag (backspace on an empty input).
    pub fn pop(&mut self) -> Option<String> {
        self.tags.pop()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn to_wire(&self) -> String {
        self.tags.join(",")
    }
}

impl fmt::Display for TagSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tags.join(", "))
    }
}
