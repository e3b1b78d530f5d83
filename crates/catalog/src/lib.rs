//! CineView catalog aggregation pipeline
//!
//! Turns arbitrary upstream catalog payloads into the canonical content
//! model and fans queries out across every configured source:
//!
//! - `mapper`: one raw upstream record → one canonical item, or rejection
//! - `playlist`: the delimiter-encoded playback-source micro-format
//! - `transport`: the network seam (trait + reqwest implementation)
//! - `gateway`: normalized catalog queries against one source
//! - `aggregator`: fan-out, merge, dedupe, and fallback across sources
//! - `sample`: built-in sample catalog used as the terminal fallback
//!
//! Failures never cross this crate's boundary as errors: transport problems
//! collapse to empty pages at the gateway, malformed records are skipped by
//! the mapper, and aggregation exhaustion falls back to the sample catalog.

pub mod aggregator;
pub mod gateway;
pub mod mapper;
pub mod playlist;
pub mod sample;
pub mod transport;

pub use aggregator::Aggregator;
pub use gateway::{CatalogQuery, SourceGateway};
pub use mapper::map_record;
pub use playlist::parse_playback_groups;
pub use transport::{HttpTransport, Transport, TransportError, TransportResult};
