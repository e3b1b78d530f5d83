//! Built-in sample catalog
//!
//! Terminal fallback for the aggregator: served when no sources are
//! configured, when every source fails or returns nothing, and when an id
//! lookup misses everywhere. The streams point at well-known public test
//! assets so playback still works end to end.

use cineview_core::{Category, ContentItem, ContentKind, PlaybackEntry, PlaybackSourceGroup};

/// All built-in sample items.
pub fn content_items() -> Vec<ContentItem> {
    vec![sample_movie(), sample_series()]
}

/// Look up one sample item by id.
pub fn item_by_id(id: &str) -> Option<ContentItem> {
    content_items().into_iter().find(|item| item.id == id)
}

/// Sample category listing, always led by the synthetic "All" entry.
pub fn categories() -> Vec<Category> {
    vec![
        Category::all(),
        Category {
            id: "sample-movies".to_string(),
            name: "Popular Movies (Sample)".to_string(),
        },
        Category {
            id: "sample-series".to_string(),
            name: "Latest Series (Sample)".to_string(),
        },
    ]
}

fn sample_movie() -> ContentItem {
    ContentItem {
        id: "sample-1".to_string(),
        title: "Interstellar Voyage (Sample)".to_string(),
        description: "An epic science-fiction journey into the far reaches of \
                      space. Facing extinction, a crew of astronauts sets out \
                      on a voyage into the unknown."
            .to_string(),
        poster_url: "https://placehold.co/400x600.png?text=Interstellar%20Voyage".to_string(),
        backdrop_url: "https://placehold.co/1280x720.png?text=Interstellar%20Voyage".to_string(),
        cast: vec![
            "Alex Chen".to_string(),
            "Maria Santos".to_string(),
            "David Park".to_string(),
        ],
        directors: vec!["Sofia Reyes".to_string()],
        rating: Some(8.5),
        genres: vec!["Sci-Fi".to_string(), "Adventure".to_string()],
        release_year: Some(2023),
        remarks: Some("2h 30m".to_string()),
        kind: ContentKind::Movie,
        qualities: Some(vec!["1080p".to_string(), "4K".to_string()]),
        playback_sources: Some(vec![
            PlaybackSourceGroup {
                name: "Line 1 (m3u8)".to_string(),
                entries: vec![
                    PlaybackEntry {
                        name: "Part 1".to_string(),
                        url: "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8".to_string(),
                    },
                    PlaybackEntry {
                        name: "Part 2".to_string(),
                        url: "https://test-streams.mux.dev/x36xhzz/x36xhzz.m3u8".to_string(),
                    },
                ],
            },
            PlaybackSourceGroup {
                name: "Backup line (mp4)".to_string(),
                entries: vec![PlaybackEntry {
                    name: "HD".to_string(),
                    url: "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/BigBuckBunny.mp4"
                        .to_string(),
                }],
            },
        ]),
    }
}

fn sample_series() -> ContentItem {
    ContentItem {
        id: "sample-2".to_string(),
        title: "Cold Case Unit (Sample)".to_string(),
        description: "A veteran detective peels back layers of deception to \
                      track down the culprits behind the city's strangest \
                      cases. A new mystery every episode."
            .to_string(),
        poster_url: "https://placehold.co/400x600.png?text=Cold%20Case%20Unit".to_string(),
        backdrop_url: "https://placehold.co/1280x720.png?text=Cold%20Case%20Unit".to_string(),
        cast: vec![
            "James Liu".to_string(),
            "Elena Petrov".to_string(),
            "Sam Okafor".to_string(),
        ],
        directors: Vec::new(),
        rating: Some(9.0),
        genres: vec![
            "Mystery".to_string(),
            "Drama".to_string(),
            "Crime".to_string(),
        ],
        release_year: Some(2024),
        remarks: None,
        kind: ContentKind::Series,
        qualities: Some(vec!["1080p".to_string(), "720p".to_string()]),
        playback_sources: Some(vec![PlaybackSourceGroup {
            name: "HD source (mp4)".to_string(),
            entries: vec![
                PlaybackEntry {
                    name: "S01E01".to_string(),
                    url: "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ElephantsDream.mp4"
                        .to_string(),
                },
                PlaybackEntry {
                    name: "S01E02".to_string(),
                    url: "http://commondatastorage.googleapis.com/gtv-videos-bucket/sample/ForBiggerBlazes.mp4"
                        .to_string(),
                },
            ],
        }]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_lookup() {
        assert!(item_by_id("sample-1").is_some());
        assert!(item_by_id("sample-2").is_some());
        assert!(item_by_id("nope").is_none());
    }

    #[test]
    fn test_categories_start_with_all() {
        let categories = categories();
        assert!(categories[0].is_all());
    }

    #[test]
    fn test_sample_groups_are_never_empty() {
        for item in content_items() {
            for group in item.playback_sources.unwrap() {
                assert!(!group.entries.is_empty());
            }
        }
    }
}
