//! Voice Search - multi-signal relevance ranking over voice recordings.
//!
//! Each of a user's recordings is scored against a free-text query using
//! independent signals:
//!
//! - **Exact phrase**: the whole query occurs in the recording's text
//! - **Semantic overlap**: query terms widened through a static thesaurus
//! - **Topics**: a topic tag contains a query term
//! - **Memory titles**: a linked memory's title contains a query term
//! - **Recency**: a small bonus fading over the first 30 days
//!
//! The weighted sum is capped at 1.0; recordings scoring above 0.3 are
//! returned best first with an excerpt of the matching text.
//!
//! # Architecture
//!
//! The service is built around trait abstractions for testability:
//!
//! - `RecordingSource` - Loads a user's recordings (PostgreSQL, mocks)
//! - `MemoryTitleSource` - Resolves linked memory titles (PostgreSQL, mocks)
//! - [`RecordingSearch`] - What the HTTP layer calls
//!
//! # Example
//!
//! ```ignore
//! use memoir_api::domain::search::{SearchConfig, VoiceSearchService};
//! use memoir_api::domain::search::repository::PgRecordingStore;
//!
//! let store = Arc::new(PgRecordingStore::new(pool));
//! let service = VoiceSearchService::new(store.clone(), store, SearchConfig::default());
//!
//! let results = service.search(&user_id, "graduation ceremony", Some(10)).await?;
//! ```

mod context;
mod enricher;
mod matchers;
mod parser;
mod scorer;
mod service;
mod synonyms;
mod traits;
mod types;

pub mod repository;

// Re-export main types
pub use enricher::{EnricherConfig, EnrichmentFailurePolicy};
pub use service::{SearchConfig, VoiceSearchService};
pub use traits::{RecordingSearch, SearchError};
pub use types::{EnrichedRecording, ScoredRecording};
