//! # CineView Core
//!
//! Core data structures and shared types for the CineView content platform.
//!
//! This crate provides the canonical content model produced by the catalog
//! pipeline, pagination types matching the upstream page shape, source
//! configuration, and logging initialization.
//!
//! ## Modules
//!
//! - `models`: Canonical content item, playback groups, and categories
//! - `pagination`: Paginated result type with safe defaults
//! - `config`: Source configuration and content-kind classification rules
//! - `logging`: Structured logging setup built on `tracing-subscriber`

pub mod config;
pub mod logging;
pub mod models;
pub mod pagination;

pub use config::{CatalogConfig, KindRules, SourceConfig};
pub use logging::init_logging;
pub use models::{Category, ContentItem, ContentKind, PlaybackEntry, PlaybackSourceGroup};
pub use pagination::{Page, DEFAULT_LIMIT};

/// Common error type for core operations
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid source URL '{url}': {reason}")]
    InvalidSourceUrl { url: String, reason: String },

    #[error("Logging initialization failed: {0}")]
    Logging(String),
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
