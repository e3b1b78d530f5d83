//! Domain models for the canonical content catalog

pub mod content;

pub use content::{Category, ContentItem, ContentKind, PlaybackEntry, PlaybackSourceGroup};
