//! Payload mapper: one raw upstream record → one canonical content item
//!
//! Upstream records are MacCMS-style JSON objects with ad-hoc field names
//! (`vod_id`, `vod_name`, `vod_play_url`, ...) and inconsistent type
//! signaling: numbers arrive as strings, strings as numbers, and most fields
//! are optional. Mapping is best-effort and pure: no I/O, no input mutation,
//! deterministic. Records that cannot produce a valid item are rejected with
//! `None` and skipped by the caller; they never fail a batch.

use crate::playlist::parse_playback_groups;
use cineview_core::{ContentItem, ContentKind, KindRules};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static QUALITY_LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[0-9]+[pP]").expect("Failed to compile quality label regex"));

const NO_DESCRIPTION_PLACEHOLDER: &str = "No description available.";

/// Map one raw upstream record into a canonical item.
///
/// Returns `None` when the record lacks a usable identifier or title.
pub fn map_record(record: &Value, rules: &KindRules) -> Option<ContentItem> {
    let id = extract_text(record, "vod_id");
    let title = extract_text(record, "vod_name");

    let (Some(id), Some(title)) = (id, title) else {
        tracing::debug!(record = %record, "skipping record with missing vod_id/vod_name");
        return None;
    };

    let description = extract_text(record, "vod_blurb")
        .or_else(|| extract_text(record, "vod_content"))
        .unwrap_or_else(|| NO_DESCRIPTION_PLACEHOLDER.to_string());

    let poster_url = extract_text(record, "vod_pic")
        .unwrap_or_else(|| placeholder_image(400, 600, &title));
    let backdrop_url = extract_text(record, "vod_pic_slide")
        .or_else(|| extract_text(record, "vod_pic"))
        .unwrap_or_else(|| placeholder_image(1280, 720, &title));

    let cast = extract_text(record, "vod_actor")
        .map(|s| split_name_list(&s))
        .unwrap_or_default();
    let directors = extract_text(record, "vod_director")
        .map(|s| split_name_list(&s))
        .unwrap_or_default();

    let genres = extract_text(record, "vod_class")
        .or_else(|| extract_text(record, "type_name"))
        .map(|s| split_name_list(&s))
        .unwrap_or_default();

    // Two candidate rating fields, tried in priority order; the first one
    // parsing to a finite number wins.
    let rating = lenient_f64(record, "vod_douban_score")
        .or_else(|| lenient_f64(record, "vod_score"))
        .map(|r| r as f32);

    let release_year = lenient_i64(record, "vod_year").map(|y| y as i32);

    let remarks =
        extract_text(record, "vod_duration").or_else(|| extract_text(record, "vod_remarks"));

    let kind = classify_kind(record, rules);
    let qualities = extract_qualities(record);

    let playback_sources = match (
        extract_text(record, "vod_play_from"),
        extract_text(record, "vod_play_url"),
    ) {
        (Some(from), Some(urls)) => {
            let groups = parse_playback_groups(&from, &urls);
            if groups.is_empty() {
                None
            } else {
                Some(groups)
            }
        }
        _ => None,
    };

    Some(ContentItem {
        id,
        title,
        description,
        poster_url,
        backdrop_url,
        cast,
        directors,
        rating,
        genres,
        release_year,
        remarks,
        kind,
        qualities,
        playback_sources,
    })
}

/// Classify the content kind from the free-text category, falling back to
/// the numeric type id only when no category text is present.
fn classify_kind(record: &Value, rules: &KindRules) -> ContentKind {
    if let Some(text) =
        extract_text(record, "type_name").or_else(|| extract_text(record, "vod_class"))
    {
        if rules.text_indicates_series(&text) {
            return ContentKind::Series;
        }
        return ContentKind::Movie;
    }

    match lenient_i64(record, "tid") {
        Some(tid) if rules.type_id_indicates_series(tid) => ContentKind::Series,
        _ => ContentKind::Movie,
    }
}

/// Quality labels from the dedicated field, else mined out of the remarks
/// string ("更新至1080P" and friends), else unset.
fn extract_qualities(record: &Value) -> Option<Vec<String>> {
    if let Some(raw) = extract_text(record, "vod_quality") {
        let labels: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !labels.is_empty() {
            return Some(labels);
        }
    }

    let remarks = extract_text(record, "vod_remarks")?;
    let labels: Vec<String> = QUALITY_LABEL_REGEX
        .find_iter(&remarks)
        .map(|m| m.as_str().to_string())
        .collect();
    if labels.is_empty() {
        None
    } else {
        Some(labels)
    }
}

fn placeholder_image(width: u32, height: u32, title: &str) -> String {
    format!(
        "https://placehold.co/{width}x{height}.png?text={}",
        urlencoding::encode(title)
    )
}

/// Split a people/genre field on the common separator set: ASCII comma,
/// fullwidth comma, ideographic comma, and whitespace runs.
fn split_name_list(raw: &str) -> Vec<String> {
    raw.split(|c: char| c == ',' || c == '，' || c == '、' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract a field as trimmed non-empty text, coercing JSON numbers to
/// their string form (upstream ids arrive both ways).
pub(crate) fn extract_text(record: &Value, key: &str) -> Option<String> {
    match record.get(key)? {
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a field as f64, accepting numbers, numeric strings, and strings
/// with a numeric prefix ("8.5分"). Non-finite values are rejected.
pub(crate) fn lenient_f64(record: &Value, key: &str) -> Option<f64> {
    let parsed = match record.get(key)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_leading_f64(s),
        _ => None,
    };
    parsed.filter(|n| n.is_finite())
}

/// Parse a field as i64, accepting numbers, numeric strings, and strings
/// with a numeric prefix ("2023年上映").
pub(crate) fn lenient_i64(record: &Value, key: &str) -> Option<i64> {
    match record.get(key)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => parse_leading_i64(s),
        _ => None,
    }
}

fn parse_leading_f64(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let prefix_len = numeric_prefix_len(trimmed, true);
    trimmed[..prefix_len].parse().ok()
}

fn parse_leading_i64(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    let prefix_len = numeric_prefix_len(trimmed, false);
    trimmed[..prefix_len].parse().ok()
}

fn numeric_prefix_len(s: &str, allow_decimal_point: bool) -> usize {
    let mut len = 0;
    let mut seen_point = false;
    for (index, c) in s.char_indices() {
        let accepted = c.is_ascii_digit()
            || (index == 0 && (c == '-' || c == '+'))
            || (allow_decimal_point && c == '.' && !seen_point);
        if !accepted {
            break;
        }
        if c == '.' {
            seen_point = true;
        }
        len = index + c.len_utf8();
    }
    len
}
