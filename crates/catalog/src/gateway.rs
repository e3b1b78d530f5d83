//! Source gateway: normalized catalog queries against one upstream source
//!
//! One gateway serves every configured source; the base URL is a call
//! parameter, not construction state, because the source set is externally
//! owned and changes at runtime. Transport failures never leave this module:
//! a failed or malformed response collapses to the all-defaults empty
//! [`Page`] so the aggregator can try other sources.

use crate::mapper::{self, map_record};
use crate::transport::{HttpTransport, Transport, TransportResult};
use cineview_core::{Category, ContentItem, KindRules, Page, DEFAULT_LIMIT};
use moka::future::Cache;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

const RESPONSE_CACHE_CAPACITY: u64 = 1_000;
const RESPONSE_CACHE_TTL: Duration = Duration::from_secs(300);

/// One normalized catalog query.
///
/// `ByIds` and `List` are mutually exclusive by construction; an id lookup
/// carries no page/category/search parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogQuery {
    /// Page listing, optionally filtered by category and/or search term
    List {
        page: u32,
        /// Category filter; `None` or `"all"` means no filter
        category_id: Option<String>,
        search_term: Option<String>,
    },
    /// Direct lookup of one or more upstream ids
    ByIds(Vec<String>),
}

impl CatalogQuery {
    /// Plain page listing with no filters.
    pub fn page(page: u32) -> Self {
        Self::List {
            page,
            category_id: None,
            search_term: None,
        }
    }

    /// Search query on page 1.
    pub fn search(term: impl Into<String>) -> Self {
        Self::List {
            page: 1,
            category_id: None,
            search_term: Some(term.into()),
        }
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::ByIds(vec![id.into()])
    }
}

/// Gateway over one upstream source's catalog endpoint.
///
/// Raw responses are cached briefly by full request URL, the way upstream
/// CDNs expect these endpoints to be polled.
pub struct SourceGateway {
    transport: Arc<dyn Transport>,
    cache: Cache<String, Value>,
    kind_rules: KindRules,
}

impl SourceGateway {
    pub fn new() -> Self {
        Self::with_transport(Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        let cache = Cache::builder()
            .max_capacity(RESPONSE_CACHE_CAPACITY)
            .time_to_live(RESPONSE_CACHE_TTL)
            .build();

        Self {
            transport,
            cache,
            kind_rules: KindRules::default(),
        }
    }

    pub fn with_kind_rules(mut self, kind_rules: KindRules) -> Self {
        self.kind_rules = kind_rules;
        self
    }

    /// Query the source's catalog endpoint.
    ///
    /// Returns the empty default page on any transport or shape failure;
    /// errors are logged, never propagated.
    pub async fn query(&self, base_url: &str, query: &CatalogQuery) -> Page<ContentItem> {
        let url = match build_request_url(base_url, query) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(base_url, error = %e, "invalid source base URL");
                return Page::empty();
            }
        };

        tracing::debug!(url = %url, "querying catalog source");

        match self.fetch_cached(&url).await {
            Ok(raw) => parse_content_page(&raw, &self.kind_rules),
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "catalog query failed, returning empty page");
                Page::empty()
            }
        }
    }

    /// Look up a single item by upstream id. `None` when the source does
    /// not have it (or failed).
    pub async fn fetch_item(&self, base_url: &str, id: &str) -> Option<ContentItem> {
        self.query(base_url, &CatalogQuery::by_id(id))
            .await
            .items
            .into_iter()
            .next()
    }

    /// Fetch the source's category listing.
    ///
    /// The synthetic "All" category is prepended when the upstream does not
    /// provide one; on total failure the result degrades to a single-element
    /// list rather than an empty one.
    pub async fn categories(&self, base_url: &str) -> Vec<Category> {
        let url = match Url::parse(base_url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(base_url, error = %e, "invalid source base URL");
                return vec![Category::all()];
            }
        };

        let raw = match self.fetch_cached(&url).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(url = %url, error = %e, "category fetch failed, degrading to All");
                return vec![Category::all()];
            }
        };

        let Some(class) = raw.get("class").and_then(Value::as_array) else {
            tracing::warn!(url = %url, "no class array in category response");
            return vec![Category::all()];
        };

        let mut categories: Vec<Category> = class
            .iter()
            .filter_map(|entry| {
                let id = mapper::extract_text(entry, "type_id")?;
                let name = mapper::extract_text(entry, "type_name")?;
                Some(Category { id, name })
            })
            .collect();

        if !categories.iter().any(Category::is_all) {
            categories.insert(0, Category::all());
        }

        categories
    }

    async fn fetch_cached(&self, url: &Url) -> TransportResult<Value> {
        let key = url.as_str().to_string();
        if let Some(hit) = self.cache.get(&key).await {
            return Ok(hit);
        }

        let value = self.transport.get_json(url).await?;
        self.cache.insert(key, value.clone()).await;
        Ok(value)
    }
}

impl Default for SourceGateway {
    fn default() -> Self {
        Self::new()
    }
}

fn build_request_url(base_url: &str, query: &CatalogQuery) -> Result<Url, url::ParseError> {
    let mut url = Url::parse(base_url)?;

    {
        let mut pairs = url.query_pairs_mut();
        pairs.append_pair("ac", "detail");

        match query {
            CatalogQuery::ByIds(ids) => {
                pairs.append_pair("ids", &ids.join(","));
            }
            CatalogQuery::List {
                page,
                category_id,
                search_term,
            } => {
                if *page > 0 {
                    pairs.append_pair("pg", &page.to_string());
                }
                // "all" means no category filter
                if let Some(category) = category_id.as_deref().filter(|c| *c != "all") {
                    pairs.append_pair("t", category);
                }
                if let Some(term) = search_term {
                    pairs.append_pair("wd", term);
                }
            }
        }
    }

    Ok(url)
}

/// Parse a raw catalog response into a page, mapping each record and
/// discarding rejects. Numeric pagination fields are parsed defensively.
fn parse_content_page(raw: &Value, rules: &KindRules) -> Page<ContentItem> {
    let items: Vec<ContentItem> = raw
        .get("list")
        .and_then(Value::as_array)
        .map(|list| {
            list.iter()
                .filter_map(|record| map_record(record, rules))
                .collect()
        })
        .unwrap_or_default();

    let page = lenient_u32(raw, &["page"]).filter(|p| *p >= 1).unwrap_or(1);
    let page_count = lenient_u32(raw, &["pagecount", "page_count"])
        .filter(|p| *p >= 1)
        .unwrap_or(1);
    let total = lenient_u32(raw, &["total"])
        .map(u64::from)
        .unwrap_or(items.len() as u64);
    let limit = lenient_u32(raw, &["limit"]).unwrap_or_else(|| {
        if items.is_empty() {
            DEFAULT_LIMIT
        } else {
            items.len() as u32
        }
    });

    Page {
        items,
        page,
        page_count,
        limit,
        total,
    }
}

fn lenient_u32(raw: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter()
        .find_map(|key| mapper::lenient_i64(raw, key))
        .and_then(|n| u32::try_from(n).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_build_url_list_query() {
        let url = build_request_url(
            "https://api.example.com/provide/vod",
            &CatalogQuery::List {
                page: 2,
                category_id: Some("6".to_string()),
                search_term: Some("hero".to_string()),
            },
        )
        .unwrap();

        let query = url.query().unwrap();
        assert!(query.contains("ac=detail"));
        assert!(query.contains("pg=2"));
        assert!(query.contains("t=6"));
        assert!(query.contains("wd=hero"));
    }

    #[test]
    fn test_build_url_omits_all_category() {
        let url = build_request_url(
            "https://api.example.com/provide/vod",
            &CatalogQuery::List {
                page: 1,
                category_id: Some("all".to_string()),
                search_term: None,
            },
        )
        .unwrap();
        assert!(!url.query().unwrap().contains("t="));
    }

    #[test]
    fn test_build_url_ids_take_precedence_shape() {
        let url = build_request_url(
            "https://api.example.com/provide/vod",
            &CatalogQuery::ByIds(vec!["7".to_string(), "9".to_string()]),
        )
        .unwrap();
        let query = url.query().unwrap();
        assert!(query.contains("ids=7%2C9") || query.contains("ids=7,9"));
        assert!(!query.contains("pg="));
        assert!(!query.contains("wd="));
    }

    #[test]
    fn test_parse_page_defensive_numeric_fields() {
        let raw = json!({
            "list": [
                { "vod_id": "1", "vod_name": "A" },
                { "vod_id": "2", "vod_name": "B" },
                { "bad": "record" },
            ],
            "page": "3",
            "pagecount": "not-a-number",
            "total": 120,
        });

        let page = parse_content_page(&raw, &KindRules::default());
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.page, 3);
        assert_eq!(page.page_count, 1);
        assert_eq!(page.total, 120);
        assert_eq!(page.limit, 2);
    }

    #[test]
    fn test_parse_page_without_list() {
        let page = parse_content_page(&json!({ "msg": "error" }), &KindRules::default());
        assert_eq!(page, Page::empty());
    }

    #[test]
    fn test_parse_page_accepts_page_count_alias() {
        let raw = json!({ "list": [], "page_count": 7 });
        let page = parse_content_page(&raw, &KindRules::default());
        assert_eq!(page.page_count, 7);
    }
}
