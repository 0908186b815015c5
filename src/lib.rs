//! Football fixtures aggregated from several league feeds.
//!
//! [`MatchesStore`] is the entry point: it fetches and normalizes fixtures through a
//! [`FixtureSource`] (normally [`FootballDataClient`]), derives the searchable and
//! paginated views, and keeps a persisted set of tracked matches refreshed.

pub use aggregator::{sort_matches, Aggregator};
pub use client::{FixtureSource, FootballDataClient};
pub use config::Config;
pub use error::{MatchdayError, Result};
pub use feed::normalize::normalize;
pub use model::*;
pub use sample::sample_matches;
pub use scheduler::LiveUpdates;
pub use storage::{BlobStore, FileBlobStore, MemoryBlobStore};
pub use store::{MatchesStore, StoreSnapshot};
pub use tracked::TrackedSet;

pub mod aggregator;
pub mod client;
pub mod config;
pub mod error;
pub(crate) mod feed;
pub mod model;
pub mod query;
pub mod sample;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod tracked;
