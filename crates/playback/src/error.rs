//! Player error classification
//!
//! The player reports errors in several unrelated shapes: HTML media-element
//! error codes, streaming-protocol (HLS-style) events with a fatality flag,
//! bare message strings, and sometimes an empty object with no diagnosable
//! fields at all. [`classify`] folds all of them into one of three
//! dispositions the session can act on.

use serde::{Deserialize, Serialize};

/// Media-element error kinds, mirroring the HTML `MediaError` codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaErrorKind {
    Aborted,
    Network,
    Decode,
    SrcNotSupported,
    Other(u32),
}

impl MediaErrorKind {
    /// Map a raw `MediaError.code` value.
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => Self::Aborted,
            2 => Self::Network,
            3 => Self::Decode,
            4 => Self::SrcNotSupported,
            other => Self::Other(other),
        }
    }
}

/// One player-reported error, already shaped by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlayerError {
    /// Media-element error with a known code
    Media { kind: MediaErrorKind },
    /// Streaming-protocol event (HLS-style), fatal or recoverable
    Hls {
        kind: String,
        details: Option<String>,
        fatal: bool,
    },
    /// Free-form message from the player
    Message { text: String },
    /// An error payload with no diagnosable fields at all
    Opaque,
}

/// What the session should do with a classified error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDisposition {
    /// Unrecoverable for this stream: show the message
    Display(String),
    /// Transient: show the message, keep the current phase
    Recovering(String),
    /// The native player cannot render this URL class at all; switch to the
    /// embedded-frame strategy
    Fallback,
}

/// Classify a player error into a disposition.
pub fn classify(error: &PlayerError) -> ErrorDisposition {
    match error {
        PlayerError::Media { kind } => classify_media(*kind),
        PlayerError::Hls {
            kind,
            details,
            fatal,
        } => classify_hls(kind, details.as_deref(), *fatal),
        PlayerError::Message { text } => {
            ErrorDisposition::Display(format!("Player reported an error: {text}"))
        }
        // Nothing diagnosable: assume the native player cannot handle this
        // URL class and an embedded frame might
        PlayerError::Opaque => ErrorDisposition::Fallback,
    }
}

fn classify_media(kind: MediaErrorKind) -> ErrorDisposition {
    match kind {
        MediaErrorKind::Aborted => {
            ErrorDisposition::Display("Video loading was aborted.".to_string())
        }
        MediaErrorKind::Network => {
            ErrorDisposition::Display("A network error interrupted video loading.".to_string())
        }
        MediaErrorKind::Decode => {
            ErrorDisposition::Display("The video could not be decoded.".to_string())
        }
        MediaErrorKind::SrcNotSupported => ErrorDisposition::Fallback,
        MediaErrorKind::Other(code) => {
            ErrorDisposition::Display(format!("Media error (code {code})."))
        }
    }
}

fn classify_hls(kind: &str, details: Option<&str>, fatal: bool) -> ErrorDisposition {
    if fatal {
        let details = details.map(|d| format!(": {d}")).unwrap_or_default();
        return ErrorDisposition::Display(format!(
            "Streaming error ({kind}{details}), cannot recover."
        ));
    }

    let message = match (kind, details) {
        ("networkError", Some("fragLoadError")) => {
            "Video segment failed to load, attempting to recover...".to_string()
        }
        ("mediaError", Some("bufferStalledError")) => {
            "Video buffering stalled, attempting to recover...".to_string()
        }
        (kind, details) => {
            let details = details.map(|d| format!(": {d}")).unwrap_or_default();
            format!("Streaming error ({kind}{details}), attempting to recover...")
        }
    };

    ErrorDisposition::Recovering(message)
}
