//! Configuration for catalog sources and content-kind classification
//!
//! Source configuration is externally owned (the UI keeps it in a simple
//! key-value store) and passed into the catalog components as explicit
//! parameters; this module provides the record types plus an env-driven
//! loader for headless use. All environment variables use the `CINEVIEW_`
//! prefix.
//!
//! # Environment Variables
//!
//! - `CINEVIEW_SOURCES` (optional): semicolon-separated source entries, each
//!   `id|name|url` (e.g. `s1|Main|https://api.example.com/provide/vod`)
//! - `CINEVIEW_ACTIVE_SOURCE` (optional): id of the preferred source for
//!   id-based lookups

use crate::CoreError;
use serde::{Deserialize, Serialize};
use url::Url;

/// Load a `.env` file if one exists. Missing files are not an error.
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

/// Configuration loader trait
///
/// Standardized loading and validation of configuration from environment
/// variables.
pub trait ConfigLoader: Sized {
    /// Load configuration from `CINEVIEW_`-prefixed environment variables.
    fn from_env() -> Result<Self, CoreError>;

    /// Validate configuration values.
    fn validate(&self) -> Result<(), CoreError>;
}

/// One configured upstream catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable identifier chosen by the user
    pub id: String,
    /// Display name
    pub name: String,
    /// Base URL of the source's catalog endpoint
    pub url: String,
}

/// Full catalog configuration: the source set and the active source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub sources: Vec<SourceConfig>,
    /// Source preferred for id-based lookups, with the rest as fallback
    pub active_source_id: Option<String>,
}

impl ConfigLoader for CatalogConfig {
    fn from_env() -> Result<Self, CoreError> {
        let sources = match std::env::var("CINEVIEW_SOURCES") {
            Ok(raw) => parse_sources(&raw)?,
            Err(_) => Vec::new(),
        };

        let active_source_id = std::env::var("CINEVIEW_ACTIVE_SOURCE")
            .ok()
            .filter(|id| !id.trim().is_empty());

        Ok(Self {
            sources,
            active_source_id,
        })
    }

    fn validate(&self) -> Result<(), CoreError> {
        for source in &self.sources {
            if source.id.trim().is_empty() {
                return Err(CoreError::Configuration(
                    "source id must not be empty".to_string(),
                ));
            }
            Url::parse(&source.url).map_err(|e| CoreError::InvalidSourceUrl {
                url: source.url.clone(),
                reason: e.to_string(),
            })?;
        }

        if let Some(active) = &self.active_source_id {
            if !self.sources.iter().any(|s| &s.id == active) {
                return Err(CoreError::Configuration(format!(
                    "active source '{active}' is not in the configured source set"
                )));
            }
        }

        Ok(())
    }
}

fn parse_sources(raw: &str) -> Result<Vec<SourceConfig>, CoreError> {
    raw.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            let mut fields = entry.splitn(3, '|');
            match (fields.next(), fields.next(), fields.next()) {
                (Some(id), Some(name), Some(url)) => Ok(SourceConfig {
                    id: id.trim().to_string(),
                    name: name.trim().to_string(),
                    url: url.trim().to_string(),
                }),
                _ => Err(CoreError::Configuration(format!(
                    "malformed source entry '{entry}', expected 'id|name|url'"
                ))),
            }
        })
        .collect()
}

/// Rules for classifying upstream content as movie or series.
///
/// The upstream type signal is either a free-text category string or a
/// numeric type id; neither is documented anywhere, so both heuristics are
/// carried as data with the observed defaults rather than hardcoded logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KindRules {
    /// Substrings of the free-text category that indicate a series
    /// (compared lowercased)
    pub series_keywords: Vec<String>,
    /// Inclusive numeric type-id ranges that indicate a series, consulted
    /// only when no free-text category is present
    pub series_type_id_ranges: Vec<(i64, i64)>,
}

impl Default for KindRules {
    fn default() -> Self {
        Self {
            series_keywords: [
                "剧",
                "电视剧",
                "动漫",
                "综艺",
                "series",
                "show",
                "animation",
                "anime",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            series_type_id_ranges: vec![(2, 4), (10, 50)],
        }
    }
}

impl KindRules {
    /// True when the free-text category contains any series keyword.
    pub fn text_indicates_series(&self, category_text: &str) -> bool {
        let lowered = category_text.to_lowercase();
        self.series_keywords.iter().any(|kw| lowered.contains(kw))
    }

    /// True when the numeric type id falls in a known series range.
    pub fn type_id_indicates_series(&self, type_id: i64) -> bool {
        self.series_type_id_ranges
            .iter()
            .any(|(lo, hi)| (*lo..=*hi).contains(&type_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sources() {
        let sources =
            parse_sources("s1|Main|https://a.example/vod; s2|Backup|https://b.example/vod")
                .unwrap();
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].id, "s1");
        assert_eq!(sources[1].name, "Backup");
        assert_eq!(sources[1].url, "https://b.example/vod");
    }

    #[test]
    fn test_parse_sources_rejects_malformed_entry() {
        assert!(parse_sources("just-an-id").is_err());
    }

    #[test]
    fn test_validate_rejects_unknown_active_source() {
        let config = CatalogConfig {
            sources: vec![SourceConfig {
                id: "s1".to_string(),
                name: "Main".to_string(),
                url: "https://a.example/vod".to_string(),
            }],
            active_source_id: Some("missing".to_string()),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_kind_rules_keywords() {
        let rules = KindRules::default();
        assert!(rules.text_indicates_series("国产电视剧"));
        assert!(rules.text_indicates_series("Anime Show"));
        assert!(!rules.text_indicates_series("动作片"));
    }

    #[test]
    fn test_kind_rules_type_ids() {
        let rules = KindRules::default();
        for tid in [2, 3, 4, 10, 30, 50] {
            assert!(rules.type_id_indicates_series(tid), "tid {tid}");
        }
        for tid in [1, 5, 9, 51] {
            assert!(!rules.type_id_indicates_series(tid), "tid {tid}");
        }
    }
}
