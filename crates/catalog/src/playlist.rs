//! Playback-group micro-format parser
//!
//! Upstream sources encode playback links as two parallel delimiter-encoded
//! strings: a group-name list and a URL-group list, both separated by `$$$`.
//! Within one URL group, `#` separates entries and `$` separates an entry's
//! fields (name, url). The format is fragile and ad hoc, so it is treated as
//! a three-level tokenizer with an explicit validity predicate at each
//! level:
//!
//! 1. groups: split both strings on `$$$`, pair by index; a blank name or a
//!    name with no corresponding URL blob emits no group
//! 2. entries: split one blob on `#`
//! 3. fields: split one entry on `$`; two or more fields are (name, url,
//!    ...ignored), a single field is a bare URL
//!
//! Entries whose URL does not look resolvable are discarded, never
//! defaulted; groups left with no entries are dropped.

use cineview_core::{PlaybackEntry, PlaybackSourceGroup};

const GROUP_SEPARATOR: &str = "$$$";
const ENTRY_SEPARATOR: char = '#';
const FIELD_SEPARATOR: char = '$';

/// True when the string looks like a resolvable stream reference: an
/// absolute HTTP(S) URL, or something carrying a manifest/container hint.
pub fn looks_resolvable(url: &str) -> bool {
    url.starts_with("http://")
        || url.starts_with("https://")
        || url.contains(".m3u8")
        || url.contains(".mp4")
}

/// Parse the parallel (source-name list, URL-group list) pair into ordered
/// playback source groups.
///
/// Group order and 1:1 index correspondence with the name list are preserved
/// exactly; groups sharing a name are never merged. Empty inputs yield an
/// empty list.
pub fn parse_playback_groups(source_names: &str, url_groups: &str) -> Vec<PlaybackSourceGroup> {
    let blobs: Vec<&str> = url_groups.split(GROUP_SEPARATOR).collect();

    source_names
        .split(GROUP_SEPARATOR)
        .enumerate()
        .filter_map(|(index, raw_name)| {
            let name = raw_name.trim();
            let blob = blobs.get(index)?;
            if name.is_empty() {
                return None;
            }
            let entries = parse_entries(blob);
            if entries.is_empty() {
                return None;
            }
            Some(PlaybackSourceGroup {
                name: name.to_string(),
                entries,
            })
        })
        .collect()
}

fn parse_entries(blob: &str) -> Vec<PlaybackEntry> {
    blob.split(ENTRY_SEPARATOR)
        .enumerate()
        .filter_map(|(index, token)| parse_entry(token, index))
        .collect()
}

/// Parse one entry token. `position` is the 0-based position within the
/// group, used to synthesize a name for bare URLs.
fn parse_entry(token: &str, position: usize) -> Option<PlaybackEntry> {
    let mut fields = token.split(FIELD_SEPARATOR);
    let first = fields.next()?.trim();

    let (name, url) = match fields.next() {
        // Two or more fields: (name, url, ...ignored)
        Some(second) => (first, second.trim()),
        // Single field: a bare URL, or garbage
        None => ("", first),
    };

    if !looks_resolvable(url) {
        return None;
    }

    let name = if name.is_empty() {
        format!("Stream {}", position + 1)
    } else {
        name.to_string()
    };

    Some(PlaybackEntry {
        name,
        url: url.to_string(),
    })
}
