//! Document-level metadata.

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// The recognised core-property keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Document title
    Title,
    /// Author
    Author,
    /// Subject
    Subject,
    /// Keywords
    Keywords,
    /// Comments
    Comments,
    /// Category
    Category,
    /// Content status
    ContentStatus,
    /// Identifier
    Identifier,
    /// Language
    Language,
    /// Version
    Version,
    /// Creation timestamp
    Created,
    /// Modification timestamp
    Modified,
    /// Revision number
    Revision,
}

impl MetadataKey {
    /// All keys, in serialization order.
    pub const ALL: [MetadataKey; 13] = [
        MetadataKey::Title,
        MetadataKey::Author,
        MetadataKey::Subject,
        MetadataKey::Keywords,
        MetadataKey::Comments,
        MetadataKey::Category,
        MetadataKey::ContentStatus,
        MetadataKey::Identifier,
        MetadataKey::Language,
        MetadataKey::Version,
        MetadataKey::Created,
        MetadataKey::Modified,
        MetadataKey::Revision,
    ];

    /// Attribute name as used by the collaborator.
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Title => "title",
            MetadataKey::Author => "author",
            MetadataKey::Subject => "subject",
            MetadataKey::Keywords => "keywords",
            MetadataKey::Comments => "comments",
            MetadataKey::Category => "category",
            MetadataKey::ContentStatus => "content_status",
            MetadataKey::Identifier => "identifier",
            MetadataKey::Language => "language",
            MetadataKey::Version => "version",
            MetadataKey::Created => "created",
            MetadataKey::Modified => "modified",
            MetadataKey::Revision => "revision",
        }
    }

    /// Look up a key by attribute name.
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Core properties of a word-processor document.
///
/// Every key has a defined default: empty string for text fields and
/// absent timestamps, zero for the revision.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// Document title
    pub title: String,
    /// Author
    pub author: String,
    /// Subject
    pub subject: String,
    /// Keywords
    pub keywords: String,
    /// Comments
    pub comments: String,
    /// Category
    pub category: String,
    /// Content status
    pub content_status: String,
    /// Identifier
    pub identifier: String,
    /// Language
    pub language: String,
    /// Version
    pub version: String,
    /// Creation timestamp
    #[serde(with = "iso_or_empty")]
    pub created: Option<DateTime<FixedOffset>>,
    /// Last modification timestamp
    #[serde(with = "iso_or_empty")]
    pub modified: Option<DateTime<FixedOffset>>,
    /// Revision number
    pub revision: i64,
}

impl Metadata {
    /// Create empty metadata.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build metadata from an attribute map, ignoring unknown keys.
    pub fn from_properties<K, V>(props: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut metadata = Self::default();
        for (name, value) in props {
            match MetadataKey::parse(name.as_ref()) {
                Some(key) => metadata.set(key, value.as_ref()),
                None => log::debug!("ignoring unknown metadata key '{}'", name.as_ref()),
            }
        }
        metadata
    }

    /// Get a value as its string form.
    pub fn get(&self, key: MetadataKey) -> String {
        match key {
            MetadataKey::Title => self.title.clone(),
            MetadataKey::Author => self.author.clone(),
            MetadataKey::Subject => self.subject.clone(),
            MetadataKey::Keywords => self.keywords.clone(),
            MetadataKey::Comments => self.comments.clone(),
            MetadataKey::Category => self.category.clone(),
            MetadataKey::ContentStatus => self.content_status.clone(),
            MetadataKey::Identifier => self.identifier.clone(),
            MetadataKey::Language => self.language.clone(),
            MetadataKey::Version => self.version.clone(),
            MetadataKey::Created => format_timestamp(self.created.as_ref()),
            MetadataKey::Modified => format_timestamp(self.modified.as_ref()),
            MetadataKey::Revision => self.revision.to_string(),
        }
    }

    /// Set a value from its string form. Unparseable timestamps and
    /// revisions fall back to their defaults.
    pub fn set(&mut self, key: MetadataKey, value: &str) {
        let value = value.trim();
        match key {
            MetadataKey::Title => self.title = value.to_string(),
            MetadataKey::Author => self.author = value.to_string(),
            MetadataKey::Subject => self.subject = value.to_string(),
            MetadataKey::Keywords => self.keywords = value.to_string(),
            MetadataKey::Comments => self.comments = value.to_string(),
            MetadataKey::Category => self.category = value.to_string(),
            MetadataKey::ContentStatus => self.content_status = value.to_string(),
            MetadataKey::Identifier => self.identifier = value.to_string(),
            MetadataKey::Language => self.language = value.to_string(),
            MetadataKey::Version => self.version = value.to_string(),
            MetadataKey::Created => self.created = parse_timestamp(value),
            MetadataKey::Modified => self.modified = parse_timestamp(value),
            MetadataKey::Revision => {
                self.revision = value.parse().unwrap_or_else(|_| {
                    if !value.is_empty() {
                        log::warn!("invalid revision '{}', using 0", value);
                    }
                    0
                })
            }
        }
    }

    /// All keys with their string values.
    pub fn to_map(&self) -> HashMap<&'static str, String> {
        MetadataKey::ALL
            .iter()
            .map(|key| (key.as_str(), self.get(*key)))
            .collect()
    }

    /// Check if a title is present.
    pub fn has_title(&self) -> bool {
        !self.title.trim().is_empty()
    }
}

fn format_timestamp(ts: Option<&DateTime<FixedOffset>>) -> String {
    ts.map(|t| t.to_rfc3339()).unwrap_or_default()
}

/// Parse RFC 3339, falling back to a naive ISO-8601 timestamp taken as UTC.
fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    if value.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts);
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, fmt) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    log::warn!("invalid timestamp '{}', leaving it empty", value);
    None
}

/// Serde adapter: `Option<DateTime>` as an ISO-8601 string or `""`.
mod iso_or_empty {
    use chrono::{DateTime, FixedOffset};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<FixedOffset>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&super::format_timestamp(value.as_ref()))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<FixedOffset>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| super::parse_timestamp(s.trim())))
    }
}
