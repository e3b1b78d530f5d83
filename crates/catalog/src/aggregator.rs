//! Cross-source aggregation: fan-out, merge, dedupe, fallback
//!
//! `fetch_all` fans page-1 queries out across every configured source
//! concurrently; one slow or failing source never stalls or aborts the
//! others. `fetch_by_id` walks sources sequentially so precedence stays
//! deterministic and losing sources are not hit unnecessarily. Both fall
//! back to the built-in sample catalog when every source comes up empty.

use crate::gateway::{CatalogQuery, SourceGateway};
use crate::sample;
use cineview_core::{ContentItem, SourceConfig};
use futures::future::join_all;
use std::collections::HashMap;

/// Aggregates catalog queries across the configured source set.
///
/// The source set and the active source id are externally owned and passed
/// in per call; the aggregator holds no source state of its own.
pub struct Aggregator {
    gateway: SourceGateway,
}

impl Aggregator {
    pub fn new(gateway: SourceGateway) -> Self {
        Self { gateway }
    }

    pub fn gateway(&self) -> &SourceGateway {
        &self.gateway
    }

    /// Find one item by id across the source set.
    ///
    /// The active source is tried first, then every remaining source in
    /// caller-supplied order, then the sample catalog. `None` only when no
    /// source and no sample data has the id.
    ///
    /// Lookups are strictly sequential. No cancellation is modeled: a caller
    /// that issues a superseding lookup (the user navigated elsewhere) must
    /// discard this result itself by checking it still matches the
    /// currently-requested id.
    pub async fn fetch_by_id(
        &self,
        sources: &[SourceConfig],
        active_source_id: Option<&str>,
        id: &str,
    ) -> Option<ContentItem> {
        let active = active_source_id.and_then(|aid| sources.iter().find(|s| s.id == aid));

        if let Some(source) = active {
            tracing::debug!(source = %source.id, id, "trying active source");
            if let Some(item) = self.gateway.fetch_item(&source.url, id).await {
                return Some(item);
            }
        }

        for source in sources {
            if active.is_some_and(|a| a.id == source.id) {
                continue;
            }
            tracing::debug!(source = %source.id, id, "trying fallback source");
            if let Some(item) = self.gateway.fetch_item(&source.url, id).await {
                return Some(item);
            }
        }

        tracing::debug!(id, "item not in any source, trying sample catalog");
        sample::item_by_id(id)
    }

    /// Fetch page 1 from every source concurrently and merge.
    ///
    /// Per-source failures contribute empty pages rather than aborting the
    /// aggregation. The merged list is deduplicated by id with
    /// last-write-wins semantics (see [`dedupe_by_id`]). An empty source
    /// set, or all sources returning nothing, yields the sample catalog.
    pub async fn fetch_all(&self, sources: &[SourceConfig]) -> Vec<ContentItem> {
        if sources.is_empty() {
            tracing::warn!("no sources configured, serving sample catalog");
            return sample::content_items();
        }

        let page_one = CatalogQuery::page(1);
        let queries = sources
            .iter()
            .map(|source| self.gateway.query(&source.url, &page_one));
        let pages = join_all(queries).await;

        let combined: Vec<ContentItem> = pages.into_iter().flat_map(|page| page.items).collect();

        if combined.is_empty() {
            tracing::warn!("all sources returned no content, serving sample catalog");
            return sample::content_items();
        }

        dedupe_by_id(combined)
    }
}

/// Deduplicate by id, keeping the first occurrence's position and the last
/// occurrence's value (later sources silently override earlier ones).
///
/// NOTE: whether "later source wins" is the intended precedence policy or
/// an accident of the original map-based dedupe is an open product
/// question; the observed semantics are preserved here.
fn dedupe_by_id(items: Vec<ContentItem>) -> Vec<ContentItem> {
    let mut position_by_id: HashMap<String, usize> = HashMap::with_capacity(items.len());
    let mut unique: Vec<ContentItem> = Vec::with_capacity(items.len());

    for item in items {
        match position_by_id.get(&item.id) {
            Some(&position) => unique[position] = item,
            None => {
                position_by_id.insert(item.id.clone(), unique.len());
                unique.push(item);
            }
        }
    }

    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use cineview_core::ContentKind;

    fn item(id: &str, title: &str) -> ContentItem {
        ContentItem {
            id: id.to_string(),
            title: title.to_string(),
            description: String::new(),
            poster_url: String::new(),
            backdrop_url: String::new(),
            cast: Vec::new(),
            directors: Vec::new(),
            rating: None,
            genres: Vec::new(),
            release_year: None,
            remarks: None,
            kind: ContentKind::Movie,
            qualities: None,
            playback_sources: None,
        }
    }

    #[test]
    fn test_dedupe_last_value_wins_first_position_kept() {
        let merged = dedupe_by_id(vec![
            item("42", "from source one"),
            item("7", "unique"),
            item("42", "from source two"),
        ]);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0].id, "42");
        assert_eq!(merged[0].title, "from source two");
        assert_eq!(merged[1].id, "7");
    }

    #[test]
    fn test_dedupe_preserves_order_without_duplicates() {
        let merged = dedupe_by_id(vec![item("a", "A"), item("b", "B"), item("c", "C")]);
        let ids: Vec<&str> = merged.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }
}
