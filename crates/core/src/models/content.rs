//! Canonical content representation
//!
//! Upstream catalog APIs disagree on almost everything: field names, type
//! signaling, and how playback links are encoded. These records are the one
//! shape the rest of the system consumes. They are immutable value records
//! produced once per fetch; nothing mutates a fetched item in place.

use serde::{Deserialize, Serialize};

/// One movie or series, normalized from an upstream catalog record.
///
/// `id` and `title` are always present; the mapper rejects records that
/// cannot satisfy this. Image URLs are never empty, a deterministic
/// placeholder is synthesized when the upstream omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    /// Identifier, unique within one aggregation run
    pub id: String,
    /// Display title
    pub title: String,
    /// Description, with a fixed placeholder when the upstream is blank
    pub description: String,
    /// Poster image URL
    pub poster_url: String,
    /// Backdrop image URL
    pub backdrop_url: String,
    /// Ordered cast names
    #[serde(default)]
    pub cast: Vec<String>,
    /// Ordered director names
    #[serde(default)]
    pub directors: Vec<String>,
    /// User rating on a 0-10 scale
    pub rating: Option<f32>,
    /// Genre tags
    #[serde(default)]
    pub genres: Vec<String>,
    /// Release year
    pub release_year: Option<i32>,
    /// Free-text runtime or remark string (e.g. "2h 30m", "Episode 12")
    pub remarks: Option<String>,
    /// Content kind classification
    pub kind: ContentKind,
    /// Available quality labels (e.g. "1080p"), unset when unknown
    pub qualities: Option<Vec<String>>,
    /// Playback source groups; `None` rather than an empty list when the
    /// record carried no resolvable links
    pub playback_sources: Option<Vec<PlaybackSourceGroup>>,
}

/// Content kind classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Movie,
    Series,
}

/// One named line/route offering one or more playable entries.
///
/// A group with zero resolvable entries is never constructed; the parser
/// drops such groups instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackSourceGroup {
    /// Source/line label as reported by the upstream
    pub name: String,
    /// Ordered playable entries, non-empty
    pub entries: Vec<PlaybackEntry>,
}

/// One concrete (display name, URL) pair for a single watchable unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackEntry {
    pub name: String,
    pub url: String,
}

/// One upstream catalog category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Identifier of the synthetic "All" category
pub const ALL_CATEGORY_ID: &str = "all";

impl Category {
    /// The synthetic "All" category, prepended to every category listing
    pub fn all() -> Self {
        Self {
            id: ALL_CATEGORY_ID.to_string(),
            name: "All".to_string(),
        }
    }

    pub fn is_all(&self) -> bool {
        self.id == ALL_CATEGORY_ID
    }
}
