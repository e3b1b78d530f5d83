//! Playback session state machine
//!
//! One session per viewed content item, single-writer: only UI-thread
//! callbacks mutate it, so every transition is atomic with respect to the
//! event loop and no locking is needed. The session is reset whenever the
//! viewed item changes and discarded when the detail view unmounts.
//!
//! Phases: `Idle` (nothing chosen) → `Selecting` (stream committed, player
//! not ready) → `Ready`, `Errored`, or `Fallback`. The latter three are
//! terminal for one stream choice; any new selection unconditionally resets
//! to `Selecting`.

use crate::error::{classify, ErrorDisposition, PlayerError};
use cineview_core::{ContentItem, PlaybackSourceGroup};
use serde::{Deserialize, Serialize};

/// Session phase with respect to the currently selected stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    Idle,
    Selecting,
    Ready,
    Errored,
    Fallback,
}

/// Rendering strategy for the presentation layer to dispatch on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderStrategy {
    /// Native media player
    Native,
    /// Generic embeddable viewport, for URL classes the native player
    /// cannot render
    EmbeddedFrame,
}

/// Playback session for one content item
#[derive(Debug, Clone)]
pub struct PlaybackSession {
    item_title: String,
    groups: Vec<PlaybackSourceGroup>,
    phase: SessionPhase,
    selected: Option<(usize, usize)>,
    current_url: Option<String>,
    current_title: Option<String>,
    error_message: Option<String>,
}

impl PlaybackSession {
    /// Start a fresh session for a content item.
    pub fn new(item: &ContentItem) -> Self {
        Self {
            item_title: item.title.clone(),
            groups: item.playback_sources.clone().unwrap_or_default(),
            phase: SessionPhase::Idle,
            selected: None,
            current_url: None,
            current_title: None,
            error_message: None,
        }
    }

    /// Commit a stream choice. Always legal; clears any error and fallback
    /// state and moves to `Selecting`.
    ///
    /// Returns `false` (leaving the session untouched) when the indices do
    /// not address an entry.
    pub fn select_stream(&mut self, group_index: usize, entry_index: usize) -> bool {
        let Some(entry) = self
            .groups
            .get(group_index)
            .and_then(|group| group.entries.get(entry_index))
        else {
            tracing::warn!(group_index, entry_index, "stream selection out of range");
            return false;
        };

        self.selected = Some((group_index, entry_index));
        self.current_url = Some(entry.url.clone());
        self.current_title = Some(format!("{} - {}", self.item_title, entry.name));
        self.error_message = None;
        self.phase = SessionPhase::Selecting;
        true
    }

    /// Player confirmed it can play the committed stream.
    pub fn report_ready(&mut self) {
        if self.phase == SessionPhase::Selecting {
            self.phase = SessionPhase::Ready;
        }
    }

    /// Player reported actual playback. Legal from any state: a stream that
    /// recovers mid-session clears its error and fallback flags here.
    pub fn report_playing(&mut self) {
        if self.selected.is_some() {
            self.error_message = None;
            self.phase = SessionPhase::Ready;
        }
    }

    /// Classify and absorb a player error. Never panics, never leaves the
    /// session in an unhandled state.
    pub fn report_error(&mut self, error: &PlayerError) {
        match classify(error) {
            ErrorDisposition::Display(message) => {
                tracing::debug!(%message, "player error");
                self.error_message = Some(message);
                self.phase = SessionPhase::Errored;
            }
            ErrorDisposition::Recovering(message) => {
                // Transient: surface the message but keep the phase
                tracing::debug!(%message, "player recovering");
                self.error_message = Some(message);
            }
            ErrorDisposition::Fallback => {
                tracing::debug!("switching to embedded-frame fallback");
                self.error_message = None;
                self.phase = SessionPhase::Fallback;
            }
        }
    }

    /// The entry before the current one: prior entry in the same group, or
    /// the last entry of the prior non-empty group. `None` at the start.
    pub fn previous_target(&self) -> Option<(usize, usize)> {
        let (group, entry) = self.selected?;

        if entry > 0 {
            return Some((group, entry - 1));
        }

        self.groups[..group]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, g)| !g.entries.is_empty())
            .map(|(index, g)| (index, g.entries.len() - 1))
    }

    /// The entry after the current one: next entry in the same group, or
    /// the first entry of the next non-empty group. `None` at the end.
    pub fn next_target(&self) -> Option<(usize, usize)> {
        let (group, entry) = self.selected?;

        if entry + 1 < self.groups.get(group)?.entries.len() {
            return Some((group, entry + 1));
        }

        self.groups
            .iter()
            .enumerate()
            .skip(group + 1)
            .find(|(_, g)| !g.entries.is_empty())
            .map(|(index, _)| (index, 0))
    }

    /// Navigate to the previous entry, if any.
    pub fn play_previous(&mut self) -> bool {
        match self.previous_target() {
            Some((group, entry)) => self.select_stream(group, entry),
            None => false,
        }
    }

    /// Navigate to the next entry, if any.
    pub fn play_next(&mut self) -> bool {
        match self.next_target() {
            Some((group, entry)) => self.select_stream(group, entry),
            None => false,
        }
    }

    // Read-only surface consumed by the presentation layer

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn current_url(&self) -> Option<&str> {
        self.current_url.as_deref()
    }

    pub fn current_title(&self) -> Option<&str> {
        self.current_title.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn selected(&self) -> Option<(usize, usize)> {
        self.selected
    }

    pub fn is_ready(&self) -> bool {
        self.phase == SessionPhase::Ready
    }

    pub fn has_previous(&self) -> bool {
        self.previous_target().is_some()
    }

    pub fn has_next(&self) -> bool {
        self.next_target().is_some()
    }

    /// Rendering strategy derived from the phase.
    pub fn render_strategy(&self) -> RenderStrategy {
        match self.phase {
            SessionPhase::Fallback => RenderStrategy::EmbeddedFrame,
            _ => RenderStrategy::Native,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MediaErrorKind;
    use cineview_core::{ContentKind, PlaybackEntry};

    fn item_with_groups(groups: Vec<(&str, Vec<(&str, &str)>)>) -> ContentItem {
        let groups: Vec<PlaybackSourceGroup> = groups
            .into_iter()
            .map(|(name, entries)| PlaybackSourceGroup {
                name: name.to_string(),
                entries: entries
                    .into_iter()
                    .map(|(name, url)| PlaybackEntry {
                        name: name.to_string(),
                        url: url.to_string(),
                    })
                    .collect(),
            })
            .collect();

        ContentItem {
            id: "7".to_string(),
            title: "Test".to_string(),
            description: String::new(),
            poster_url: String::new(),
            backdrop_url: String::new(),
            cast: Vec::new(),
            directors: Vec::new(),
            rating: None,
            genres: Vec::new(),
            release_year: None,
            remarks: None,
            kind: ContentKind::Series,
            qualities: None,
            playback_sources: if groups.is_empty() {
                None
            } else {
                Some(groups)
            },
        }
    }

    fn two_group_session() -> PlaybackSession {
        PlaybackSession::new(&item_with_groups(vec![
            (
                "A",
                vec![("Ep1", "http://x/1.m3u8"), ("Ep2", "http://x/2.m3u8")],
            ),
            ("B", vec![("HD", "http://y/3.mp4")]),
        ]))
    }

    #[test]
    fn test_fresh_session_is_idle() {
        let session = two_group_session();
        assert_eq!(session.phase(), SessionPhase::Idle);
        assert!(session.current_url().is_none());
        assert!(!session.has_previous());
        assert!(!session.has_next());
    }

    #[test]
    fn test_select_stream_commits_url_and_title() {
        let mut session = two_group_session();
        assert!(session.select_stream(0, 1));
        assert_eq!(session.phase(), SessionPhase::Selecting);
        assert_eq!(session.current_url(), Some("http://x/2.m3u8"));
        assert_eq!(session.current_title(), Some("Test - Ep2"));
    }

    #[test]
    fn test_out_of_range_selection_is_rejected() {
        let mut session = two_group_session();
        assert!(!session.select_stream(5, 0));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_ready_transition() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_ready();
        assert!(session.is_ready());
    }

    #[test]
    fn test_decode_error_moves_to_errored() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_error(&PlayerError::Media {
            kind: MediaErrorKind::Decode,
        });
        assert_eq!(session.phase(), SessionPhase::Errored);
        assert!(session.error_message().is_some());
        assert_eq!(session.render_strategy(), RenderStrategy::Native);
    }

    #[test]
    fn test_opaque_error_goes_to_fallback_not_errored() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_error(&PlayerError::Opaque);
        assert_eq!(session.phase(), SessionPhase::Fallback);
        assert!(session.error_message().is_none());
        assert_eq!(session.render_strategy(), RenderStrategy::EmbeddedFrame);
    }

    #[test]
    fn test_src_not_supported_goes_to_fallback() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_error(&PlayerError::Media {
            kind: MediaErrorKind::SrcNotSupported,
        });
        assert_eq!(session.phase(), SessionPhase::Fallback);
    }

    #[test]
    fn test_recoverable_hls_warning_keeps_phase() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_ready();
        session.report_error(&PlayerError::Hls {
            kind: "mediaError".to_string(),
            details: Some("bufferStalledError".to_string()),
            fatal: false,
        });
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.error_message().unwrap().contains("recover"));
    }

    #[test]
    fn test_playing_recovers_from_error_and_fallback() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_error(&PlayerError::Opaque);
        assert_eq!(session.phase(), SessionPhase::Fallback);

        session.report_playing();
        assert_eq!(session.phase(), SessionPhase::Ready);
        assert!(session.error_message().is_none());
        assert_eq!(session.render_strategy(), RenderStrategy::Native);
    }

    #[test]
    fn test_new_selection_resets_error_state() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        session.report_error(&PlayerError::Media {
            kind: MediaErrorKind::Network,
        });
        assert_eq!(session.phase(), SessionPhase::Errored);

        session.select_stream(1, 0);
        assert_eq!(session.phase(), SessionPhase::Selecting);
        assert!(session.error_message().is_none());
    }

    #[test]
    fn test_navigation_within_group() {
        let mut session = two_group_session();
        session.select_stream(0, 1);
        assert_eq!(session.previous_target(), Some((0, 0)));
        assert_eq!(session.next_target(), Some((1, 0)));
    }

    #[test]
    fn test_navigation_crosses_group_boundary() {
        let mut session = two_group_session();
        session.select_stream(1, 0);
        // Previous steps to the last entry of the prior group
        assert_eq!(session.previous_target(), Some((0, 1)));
        assert!(session.play_previous());
        assert_eq!(session.current_url(), Some("http://x/2.m3u8"));
    }

    #[test]
    fn test_navigation_boundaries_return_no_target() {
        let mut session = two_group_session();
        session.select_stream(0, 0);
        assert_eq!(session.previous_target(), None);
        assert!(!session.play_previous());

        session.select_stream(1, 0);
        assert_eq!(session.next_target(), None);
        assert!(!session.play_next());
    }

    #[test]
    fn test_navigation_without_selection() {
        let session = two_group_session();
        assert_eq!(session.previous_target(), None);
        assert_eq!(session.next_target(), None);
    }

    #[test]
    fn test_session_for_item_without_sources() {
        let mut session = PlaybackSession::new(&item_with_groups(vec![]));
        assert!(!session.select_stream(0, 0));
        assert_eq!(session.phase(), SessionPhase::Idle);
    }

    #[test]
    fn test_next_walks_through_every_entry_in_order() {
        let mut session = two_group_session();
        session.select_stream(0, 0);

        let mut played = vec![session.current_url().unwrap().to_string()];
        while session.play_next() {
            played.push(session.current_url().unwrap().to_string());
        }

        assert_eq!(
            played,
            vec!["http://x/1.m3u8", "http://x/2.m3u8", "http://y/3.mp4"]
        );
    }
}
